use bare::{
    prelude::*,
    Limit,
    schema::{schema_for, Primitive, StructField, Type},
};

#[derive(Bare, Debug, PartialEq)]
struct Point {
    x: Uint,
    y: Uint,
    z: Uint,
}

#[derive(Bare, Debug, Default, PartialEq)]
struct Labelled {
    x: Uint,
    #[bare(skip)]
    label: String,
    y: Uint,
}

#[derive(Bare, Debug, PartialEq)]
struct Meters(f32);

#[derive(Bare, Debug, PartialEq)]
struct Pair(u8, u16);

#[derive(Bare, Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
enum Department {
    Accounting,
    Administration,
    CustomerService,
    Development = 99,
    JsmithDepartment,
}

#[derive(Bare, Debug, PartialEq)]
struct Employee {
    name: String,
    department: Department,
    #[bare(rename = "hireDate")]
    hire_date: Option<String>,
    meta: VecMap<String, Bytes>,
}

#[test]
fn struct_fields_in_order() {
    let p = Point {
        x: Uint(1),
        y: Uint(2),
        z: Uint(3),
    };
    assert_eq!(marshal(&p).unwrap(), vec![0x01, 0x02, 0x03]);
    assert_eq!(unmarshal::<Point>(&[0x01, 0x02, 0x03]).unwrap(), p);
}

#[test]
fn skipped_fields_are_not_written() {
    let l = Labelled {
        x: Uint(1),
        label: "not on the wire".to_string(),
        y: Uint(2),
    };
    assert_eq!(marshal(&l).unwrap(), vec![0x01, 0x02]);

    let back: Labelled = unmarshal(&[0x01, 0x02]).unwrap();
    assert_eq!(back.label, "");
    assert_eq!(back.y, Uint(2));
}

#[test]
fn tuple_structs() {
    assert_eq!(marshal(&Meters(1.0)).unwrap(), vec![0x00, 0x00, 0x80, 0x3f]);
    assert_eq!(marshal(&Pair(7, 0x0102)).unwrap(), vec![0x07, 0x02, 0x01]);
    assert_eq!(unmarshal::<Pair>(&[0x07, 0x02, 0x01]).unwrap(), Pair(7, 0x0102));
}

#[test]
fn enums_as_values() {
    assert_eq!(marshal(&Department::Accounting).unwrap(), vec![0x00]);
    assert_eq!(marshal(&Department::Development).unwrap(), vec![99]);
    assert_eq!(marshal(&Department::JsmithDepartment).unwrap(), vec![100]);
    assert_eq!(
        unmarshal::<Department>(&[0x02]).unwrap(),
        Department::CustomerService
    );

    match unmarshal::<Department>(&[0x05]) {
        Err(Error::UnknownEnumValue { value: 5, .. }) => {}
        other => panic!("expected an unknown enum value, got {:?}", other),
    }
}

#[test]
fn enum_names() {
    assert_eq!(Department::CustomerService.to_string(), "CUSTOMER_SERVICE");
    assert_eq!(Department::Development.value(), 99);
    assert_eq!(Department::from_value(1), Some(Department::Administration));
    assert_eq!(Department::from_value(3), None);
}

#[test]
fn nested_values() {
    let mut meta = VecMap::new();
    meta.insert("badge".to_string(), Bytes::from_static(&[0xca, 0xfe]));
    let e = Employee {
        name: "Jo".to_string(),
        department: Department::Development,
        hire_date: None,
        meta,
    };

    let encoded = marshal(&e).unwrap();
    assert_eq!(
        encoded,
        vec![
            0x02, b'J', b'o', // name
            99,   // department
            0x00, // hire_date
            0x01, 0x05, b'b', b'a', b'd', b'g', b'e', 0x02, 0xca, 0xfe, // meta
        ]
    );
    assert_eq!(unmarshal::<Employee>(&encoded).unwrap(), e);
}

#[test]
fn truncated_struct() {
    match unmarshal::<Point>(&[0x01, 0x02]) {
        Err(Error::UnexpectedEndOfInput) => {}
        other => panic!("expected end of input, got {:?}", other),
    }
}

#[test]
fn derived_schema_types() {
    let field = |name: &str, ty| StructField {
        name: name.to_string(),
        ty,
    };

    assert_eq!(
        schema_for::<Point>(),
        Type::Struct(vec![
            field("x", Type::Primitive(Primitive::Uint)),
            field("y", Type::Primitive(Primitive::Uint)),
            field("z", Type::Primitive(Primitive::Uint)),
        ])
    );
    assert_eq!(schema_for::<Meters>(), Type::Primitive(Primitive::F32));
    assert_eq!(
        schema_for::<Pair>(),
        Type::Struct(vec![
            field("f0", Type::Primitive(Primitive::U8)),
            field("f1", Type::Primitive(Primitive::U16)),
        ])
    );
    assert_eq!(
        schema_for::<Employee>(),
        Type::Struct(vec![
            field("name", Type::Primitive(Primitive::String)),
            field("department", Type::Named("Department".to_string())),
            field(
                "hireDate",
                Type::Optional(Box::new(Type::Primitive(Primitive::String)))
            ),
            field(
                "meta",
                Type::Map {
                    key: Box::new(Type::Primitive(Primitive::String)),
                    value: Box::new(Type::Data(None)),
                }
            ),
        ])
    );
}

#[derive(Bare, Debug, PartialEq)]
struct Chain {
    next: Option<Box<Chain>>,
}

#[test]
fn deep_chains_hit_the_depth_limit() {
    let input = vec![0x01; 1 << 20];
    match unmarshal::<Chain>(&input) {
        Err(Error::LimitExceeded { limit, value, max }) => {
            assert_eq!(limit, Limit::Depth);
            assert_eq!((value, max), (257, 256));
        }
        other => panic!("expected a depth error, got {:?}", other.map(|_| ())),
    }

    let mut short = vec![0x01; 10];
    short.push(0x00);
    let mut chain = unmarshal::<Chain>(&short).unwrap();
    let mut links = 0;
    while let Some(next) = chain.next {
        chain = *next;
        links += 1;
    }
    assert_eq!(links, 10);
}
