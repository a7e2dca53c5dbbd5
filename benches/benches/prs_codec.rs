//! Benchmark suite for the PRS image codec.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use marble_benches::{generate_flat_image, generate_noise_image, sizes};
use marble_types::file::FLAG_DELTA_FILTER;
use marble_types::file::prs::{decode, encode};

fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("prs_encode");

	let (width, height) = sizes::GAME;
	let flat = generate_flat_image(width, height);
	let noise = generate_noise_image(width, height);

	group.throughput(Throughput::Bytes(flat.len() as u64));
	group.bench_with_input(BenchmarkId::new("flat", "640x480"), &flat, |b, pixels| {
		b.iter(|| encode::compress(black_box(pixels), width, height, 3, FLAG_DELTA_FILTER));
	});

	group.throughput(Throughput::Bytes(noise.len() as u64));
	group.bench_with_input(BenchmarkId::new("noise", "640x480"), &noise, |b, pixels| {
		b.iter(|| encode::compress(black_box(pixels), width, height, 4, 0));
	});

	group.finish();
}

fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("prs_decode");

	let (width, height) = sizes::GAME;
	let flat = generate_flat_image(width, height);
	let packed = encode::compress(&flat, width, height, 3, FLAG_DELTA_FILTER).unwrap();

	group.throughput(Throughput::Bytes(flat.len() as u64));
	group.bench_with_input(BenchmarkId::new("flat", "640x480"), &packed, |b, data| {
		b.iter(|| decode::decompress(black_box(data)));
	});

	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
