#[macro_use]
extern crate criterion;

use bytes::Bytes;
use criterion::{black_box, Criterion};

use spanwire_protocols::{compose, encode_header, ErspanHeader};

// Minimal Ethernet II frame: broadcast dst, zero src, IPv4 ethertype, 46 zero bytes
fn ethernet_frame() -> Bytes {
    let mut frame = vec![0u8; 60];
    frame[..6].copy_from_slice(&[0xff; 6]);
    frame[12] = 0x08;
    Bytes::from(frame)
}

fn benchmark_encode_header(c: &mut Criterion) {
    c.bench_function("erspan_encode_header", |b| {
        b.iter(|| black_box(encode_header(black_box(1), black_box(100))))
    });
}

fn benchmark_decode_header(c: &mut Criterion) {
    let header = encode_header(1, 100);
    c.bench_function("erspan_decode_header", |b| {
        b.iter(|| black_box(ErspanHeader::decode(&header)).unwrap())
    });
}

fn benchmark_compose(c: &mut Criterion) {
    let frame = ethernet_frame();
    let header = encode_header(1, 100);

    c.bench_function("erspan_compose", |b| {
        b.iter(|| black_box(compose(header, &frame).wire_len()))
    });
}

criterion_group!(
    benches,
    benchmark_encode_header,
    benchmark_decode_header,
    benchmark_compose
);
criterion_main!(benches);
