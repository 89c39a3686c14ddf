use bare::{prelude::*, schema::{schema_for, Type}};

#[derive(Bare, Debug, PartialEq)]
struct Name(String);

#[derive(Bare, Debug, PartialEq)]
struct Age(Int);

#[derive(Bare, Debug, PartialEq)]
enum Person {
    Name(Name),
    Age(Age),
}

#[derive(Bare, Debug, PartialEq)]
struct Ping;

#[derive(Bare, Debug, PartialEq)]
struct Payload {
    body: Bytes,
}

#[derive(Bare, Debug, PartialEq)]
enum Message {
    #[bare(tag = 3)]
    Ping(Ping),
    Payload(Payload),
    #[bare(tag = 0)]
    Text(String),
}

fn init() { let _ = env_logger::builder().is_test(true).try_init(); }

#[test]
fn global_registration() {
    init();
    register::<Person>();
    register::<Person>();
    assert!(Context::global().is_registered::<Person>());

    let enc = marshal(&Person::Age(Age(Int(24)))).unwrap();
    assert_eq!(enc, vec![0x01, 0x30]);
    assert_eq!(
        unmarshal::<Person>(&enc).unwrap(),
        Person::Age(Age(Int(24)))
    );

    let enc = marshal(&Person::Name(Name("Mary".to_string()))).unwrap();
    assert_eq!(enc, vec![0x00, 0x04, b'M', b'a', b'r', b'y']);
}

#[test]
fn unions_inside_containers() {
    init();
    register::<Person>();

    let people = vec![
        Some(Person::Name(Name("Al".to_string()))),
        None,
        Some(Person::Age(Age(Int(-1)))),
    ];
    let enc = marshal(&people).unwrap();
    assert_eq!(
        enc,
        vec![0x03, 0x01, 0x00, 0x02, b'A', b'l', 0x00, 0x01, 0x01, 0x01]
    );
    assert_eq!(unmarshal::<Vec<Option<Person>>>(&enc).unwrap(), people);
}

#[test]
fn explicit_and_following_tags() {
    init();
    let cx = Context::new();
    cx.register::<Message>();

    assert_eq!(cx.tag_for(&Message::Ping(Ping)).unwrap(), 3);
    assert_eq!(
        cx.tag_for(&Message::Payload(Payload {
            body: Bytes::new()
        }))
        .unwrap(),
        4
    );
    assert_eq!(cx.tag_for(&Message::Text(String::new())).unwrap(), 0);

    let msg = Message::Payload(Payload {
        body: Bytes::from_static(b"hi"),
    });
    let enc = cx.marshal(&msg).unwrap();
    assert_eq!(enc, vec![0x04, 0x02, b'h', b'i']);
    assert_eq!(cx.unmarshal::<Message>(&enc).unwrap(), msg);

    assert_eq!(cx.resolve::<Message>(0).unwrap().tag(), 0);
    match cx.resolve::<Message>(1) {
        Err(Error::UnknownUnionTag { tag: 1, .. }) => {}
        other => panic!("expected an unknown tag, got {:?}", other.map(|m| m.tag())),
    }
}

#[test]
fn contexts_are_independent() {
    init();
    let cx = Context::new();
    match cx.marshal(&Message::Ping(Ping)) {
        Err(Error::UnregisteredUnion(_)) => {}
        other => panic!("expected an unregistered union, got {:?}", other),
    }
    match cx.unmarshal::<Message>(&[0x03]) {
        Err(Error::UnregisteredUnion(_)) => {}
        other => panic!("expected an unregistered union, got {:?}", other),
    }

    cx.register::<Message>();
    assert!(cx.is_registered::<Message>());
    assert_eq!(cx.unmarshal::<Message>(&[0x03]).unwrap(), Message::Ping(Ping));
}

#[test]
fn explicit_member_list() {
    init();
    let cx = Context::new();
    cx.register_union(vec![
        Member::<Person>::of::<Age>(7),
        Member::<Person>::of::<Name>(9),
    ]);

    let enc = cx.marshal(&Person::Age(Age(Int(1)))).unwrap();
    assert_eq!(enc, vec![0x07, 0x02]);
    assert_eq!(
        cx.unmarshal::<Person>(&[0x09, 0x01, b'Z']).unwrap(),
        Person::Name(Name("Z".to_string()))
    );
}

#[test]
#[should_panic]
fn conflicting_registration() {
    let cx = Context::new();
    cx.register::<Person>();
    cx.register_union(vec![
        Member::<Person>::of::<Name>(1),
        Member::<Person>::of::<Age>(0),
    ]);
}

#[test]
fn unions_are_named_in_schemas() {
    assert_eq!(schema_for::<Message>(), Type::Named("Message".to_string()));
}
