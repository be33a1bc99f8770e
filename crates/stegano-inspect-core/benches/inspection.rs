use criterion::{criterion_group, criterion_main, Criterion};
use stegano_inspect_core::search::{search, PatternQuery};
use stegano_inspect_core::{hex_dump, offset};

fn prepare_noise(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x2545_F491;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

pub fn pattern_search(c: &mut Criterion) {
    c.bench_function("Pattern Search 4 MiB", |b| {
        let buffer = prepare_noise(4 * 1024 * 1024);
        let query = PatternQuery::parse("FF D8 FF").expect("Pattern is valid hex");

        b.iter(|| search(&buffer, &query))
    });
}

pub fn dump_formatting(c: &mut Criterion) {
    c.bench_function("Hex Dump 1 KiB", |b| {
        let buffer = prepare_noise(64 * 1024);

        b.iter(|| hex_dump::format(&buffer, 4096, 1024))
    });
}

pub fn offset_resolving(c: &mut Criterion) {
    c.bench_function("Offset Resolve PNG without IDAT", |b| {
        let mut buffer = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        buffer.extend(prepare_noise(1024 * 1024).into_iter().map(|byte| byte & 0x3F));

        b.iter(|| offset::resolve(&buffer))
    });
}

criterion_group!(benches, pattern_search, dump_formatting, offset_resolving);
criterion_main!(benches);
