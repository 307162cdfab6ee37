use bacnet_codec::{new_cack, new_iam, new_read_property, new_whois, new_write_property, parse};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn encode_benchmark(c: &mut Criterion) {
    c.bench_function("encode_whois", |b| b.iter(|| black_box(new_whois())));
    c.bench_function("encode_iam", |b| b.iter(|| black_box(new_iam(321, 1))));
    c.bench_function("encode_read_property", |b| {
        b.iter(|| black_box(new_read_property(1, 0, 85)))
    });
    c.bench_function("encode_write_property", |b| {
        b.iter(|| black_box(new_write_property(1, 0, 85, 2.5)))
    });
    c.bench_function("encode_complex_ack", |b| {
        b.iter(|| black_box(new_cack(12, 1, 1, 85, 1.1)))
    });
}

fn decode_benchmark(c: &mut Criterion) {
    let whois = new_whois();
    let iam = new_iam(321, 1);
    let read_property = new_read_property(1, 0, 85);

    c.bench_function("decode_whois", |b| b.iter(|| black_box(parse(&whois).unwrap())));
    c.bench_function("decode_iam", |b| b.iter(|| black_box(parse(&iam).unwrap())));
    c.bench_function("decode_read_property", |b| {
        b.iter(|| black_box(parse(&read_property).unwrap()))
    });
}

criterion_group!(benches, encode_benchmark, decode_benchmark);
criterion_main!(benches);
