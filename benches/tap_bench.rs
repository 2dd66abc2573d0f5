use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zxtap::tap::{build_tap, TapOptions};
use zxtap::{encode_block, inject, FileType, FLAG_DATA, INJECT_MARKER};

fn bench_encode_block(c: &mut Criterion) {
    let data = vec![0x5au8; 48 * 1024];
    c.bench_function("encode_block_48k", |b| b.iter(|| encode_block(FLAG_DATA, black_box(&data))));
}

fn bench_build_tap(c: &mut Criterion) {
    let data = vec![0xc9u8; 32 * 1024];
    let opts = TapOptions { file_type: FileType::Code, start: Some(0x8000), ..TapOptions::default() };
    c.bench_function("build_tap_32k_code", |b| b.iter(|| build_tap(black_box(&data), &opts)));
}

fn bench_inject(c: &mut Criterion) {
    let mut listing = vec![0x00u8; 8 * 1024];
    listing.extend_from_slice(&[0x00, 0x0a, 0x0d, 0x00]);
    listing.extend_from_slice(INJECT_MARKER);
    listing.extend_from_slice(&[0x00u8; 1024]);
    let payload = vec![0x76u8; 16 * 1024];

    c.bench_function("inject_16k_into_9k_listing", |b| {
        b.iter(|| inject(black_box(&listing), black_box(&payload)))
    });
}

criterion_group!(benches, bench_encode_block, bench_build_tap, bench_inject);
criterion_main!(benches);
