#[macro_use]
extern crate criterion;

use bare::prelude::*;
use criterion::{black_box, Criterion};
use std::collections::BTreeMap;

#[derive(Bare, Clone, Debug, PartialEq)]
struct Order {
    order_id: i64,
    quantity: i32,
}

#[derive(Bare, Clone, Debug, PartialEq)]
struct Customer {
    name: String,
    email: String,
    address: [String; 4],
    orders: Vec<Order>,
    metadata: BTreeMap<String, Bytes>,
}

fn customer(orders: usize) -> Customer {
    let mut metadata = BTreeMap::new();
    metadata.insert("avatar".to_string(), Bytes::from(vec![0xab; 512]));
    Customer {
        name: "James Smith".to_string(),
        email: "jsmith@example.org".to_string(),
        address: [
            "123 Main St".to_string(),
            "".to_string(),
            "".to_string(),
            "".to_string(),
        ],
        orders: (0..orders as i64)
            .map(|i| Order {
                order_id: 4_242_424_242 + i,
                quantity: (i % 7) as i32,
            })
            .collect(),
        metadata,
    }
}

fn uints(c: &mut Criterion) {
    for &x in [0u64, 300, u64::MAX].iter() {
        c.bench_function(&format!("marshal uint {}", x), move |b| {
            b.iter(|| marshal(black_box(&Uint(x))))
        });
        let enc = marshal(&Uint(x)).unwrap();
        c.bench_function(&format!("unmarshal uint {}", x), move |b| {
            b.iter(|| unmarshal::<Uint>(black_box(&enc)))
        });
    }
}

fn customers(c: &mut Criterion) {
    for &n in [1usize, 100, 1000].iter() {
        let cust = customer(n);
        c.bench_function(&format!("marshal customer {} orders", n), move |b| {
            b.iter(|| marshal(black_box(&cust)))
        });
        let enc = marshal(&customer(n)).unwrap();
        c.bench_function(&format!("unmarshal customer {} orders", n), move |b| {
            b.iter(|| unmarshal::<Customer>(black_box(&enc)))
        });
    }
}

fn schema(c: &mut Criterion) {
    let src = "type Customer {\n\tname: string\n\temail: string\n\taddress: [4]string\n\torders: \
               []{\n\t\torderId: i64\n\t\tquantity: i32\n\t}\n\tmetadata: map[string]data\n}\n"
        .repeat(50);
    c.bench_function("parse schema", move |b| {
        b.iter(|| bare::schema::parse(black_box(&src)))
    });
}

criterion_group!(benches, uints, customers, schema);
criterion_main!(benches);
