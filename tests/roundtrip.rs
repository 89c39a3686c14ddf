use bare::prelude::*;
use bare_strategy::arb_bytes;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Bare, Clone, Debug, PartialEq)]
struct Reading {
    sensor: String,
    at: Uint,
    offset: Int,
    value: f64,
    flags: [bool; 3],
    raw: Bytes,
    tags: BTreeMap<String, i32>,
    previous: Option<Box<Reading>>,
}

fn arb_reading() -> impl Strategy<Value = Reading> {
    let leaf = (
        ".{0,12}",
        any::<u64>(),
        any::<i64>(),
        proptest::num::f64::NORMAL,
        any::<[bool; 3]>(),
        arb_bytes(),
        prop::collection::btree_map(".{0,6}", any::<i32>(), 0..8),
    )
        .prop_map(|(sensor, at, offset, value, flags, raw, tags)| Reading {
            sensor,
            at: Uint(at),
            offset: Int(offset),
            value,
            flags,
            raw,
            tags,
            previous: None,
        });
    leaf.prop_recursive(3, 3, 1, |inner| {
        (inner.clone(), inner).prop_map(|(mut r, prev)| {
            r.previous = Some(Box::new(prev));
            r
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn uints(x in any::<u64>()) {
        let enc = marshal(&Uint(x)).unwrap();
        prop_assert!(enc.len() <= 10);
        prop_assert_eq!(unmarshal::<Uint>(&enc).unwrap(), Uint(x));
    }

    #[test]
    fn ints(x in any::<i64>()) {
        prop_assert_eq!(unmarshal::<Int>(&marshal(&Int(x)).unwrap()).unwrap(), Int(x));
    }

    #[test]
    fn strings(s in ".*") {
        prop_assert_eq!(unmarshal::<String>(&marshal(&s).unwrap()).unwrap(), s);
    }

    #[test]
    fn readings(r in arb_reading()) {
        let enc = marshal(&r).unwrap();
        prop_assert_eq!(unmarshal::<Reading>(&enc).unwrap(), r);
    }

    #[test]
    fn trailing_input_is_ignored(r in arb_reading(), extra in arb_bytes()) {
        let mut enc = marshal(&r).unwrap();
        enc.extend_from_slice(&extra);
        prop_assert_eq!(unmarshal::<Reading>(&enc).unwrap(), r);
    }

    #[test]
    fn every_prefix_is_short(r in arb_reading()) {
        let enc = marshal(&r).unwrap();
        for cut in 0..enc.len() {
            match unmarshal::<Reading>(&enc[..cut]) {
                Err(Error::UnexpectedEndOfInput) => {}
                other => prop_assert!(false, "cut at {}: {:?}", cut, other),
            }
        }
    }

    #[test]
    fn arbitrary_input_never_panics(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = unmarshal::<Reading>(&input);
    }
}
