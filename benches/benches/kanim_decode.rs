//! Benchmark suite for kanim container decoding
//!
//! Measures the binary stream decoders, the string layer they sit on, and the
//! full reader including texture export.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use image::RgbaImage;
use kanim_benches::{generate_anim_data, generate_build_data, generate_pstrings};
use kanim_types::file::FileType;
use kanim_types::file::kanim::io::StreamReader;
use kanim_types::file::kanim::{KanimReader, decode_anim, decode_build};
use kanim_types::id_map::build_id_map;
use kanim_types::source::AnimationSource;
use std::hint::black_box;

/// Benchmark build stream decoding at several symbol counts
fn bench_decode_build(c: &mut Criterion) {
	let mut group = c.benchmark_group("kanim_build");

	for symbols in [8, 64, 512] {
		let data = generate_build_data(symbols, 8);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("decode", symbols), &data, |b, data| {
			b.iter(|| {
				let result = decode_build(black_box(data.as_slice()));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark anim stream decoding and id resolution
fn bench_decode_anim(c: &mut Criterion) {
	let mut group = c.benchmark_group("kanim_anim");

	for banks in [4, 32] {
		let data = generate_anim_data(banks, 30, 16);
		group.throughput(Throughput::Elements((banks * 30 * 16) as u64));
		group.bench_with_input(BenchmarkId::new("decode", banks), &data, |b, data| {
			b.iter(|| {
				let result = decode_anim(black_box(data.as_slice()));
				black_box(result)
			});
		});
	}

	let (anim, hashes) = match decode_anim(generate_anim_data(32, 30, 16).as_slice()) {
		Ok(decoded) => decoded,
		Err(e) => {
			eprintln!("Warning: could not decode synthetic anim: {e}");
			return;
		}
	};
	group.bench_function("build_id_map", |b| {
		b.iter(|| black_box(build_id_map(black_box(&anim), &hashes)));
	});

	group.finish();
}

/// Benchmark length-prefixed string reads
fn bench_pstrings(c: &mut Criterion) {
	let mut group = c.benchmark_group("kanim_pstring");

	for len in [8, 200] {
		let data = generate_pstrings(1000, len);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::new("read", len), &data, |b, data| {
			b.iter(|| {
				let mut reader = StreamReader::new(black_box(data.as_slice()), FileType::Build);
				for _ in 0..1000 {
					black_box(reader.read_pstring().ok());
				}
			});
		});
	}

	group.finish();
}

/// Full end-to-end benchmark: decode, build table and crop every sprite
fn bench_realistic_workload(c: &mut Criterion) {
	let mut group = c.benchmark_group("kanim_realistic");
	group.sample_size(50);

	let build = generate_build_data(64, 8);
	let anim = generate_anim_data(8, 30, 16);
	let atlas = RgbaImage::new(1024, 1024);

	group.bench_function("full_decode_pipeline", |b| {
		b.iter(|| {
			let mut reader = KanimReader::new(build.as_slice(), anim.as_slice(), atlas.clone());
			let build = reader.produce_build();
			let anim = reader.produce_anim();
			black_box((build.is_ok(), anim.is_ok()))
		});
	});

	group.finish();
}

criterion_group!(benches, bench_decode_build, bench_decode_anim, bench_pstrings, bench_realistic_workload);

criterion_main!(benches);
