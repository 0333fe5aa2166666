//! Benchmark helper utilities for kanim-rs
//!
//! This module generates synthetic build and anim streams so the decoders can be
//! measured without shipping real game assets.

use kanim_types::file::kanim::io::{write_hash_table, write_pstring};
use kanim_types::hash::klei_hash;
use kanim_types::model::Hashes;

fn put_i32(data: &mut Vec<u8>, value: i32) {
	data.extend_from_slice(&value.to_le_bytes());
}

fn put_f32(data: &mut Vec<u8>, value: f32) {
	data.extend_from_slice(&value.to_le_bytes());
}

fn symbol_name(index: usize) -> String {
	format!("symbol_{index}")
}

/// Generates a version 10 build stream with `symbols` symbols of `frames` frames each.
///
/// Frames tile a square atlas row by row; names are `symbol_{n}`.
pub fn generate_build_data(symbols: usize, frames: usize) -> Vec<u8> {
	let mut data = Vec::new();
	data.extend_from_slice(b"BILD");
	put_i32(&mut data, 10);
	put_i32(&mut data, symbols as i32);
	put_i32(&mut data, (symbols * frames) as i32);
	write_pstring(&mut data, "bench").expect("writing to a Vec cannot fail");

	let cells = (symbols * frames).max(1).isqrt() + 1;
	let cell = 1.0 / cells as f32;
	let mut hashes = Hashes::new();

	for s in 0..symbols {
		let name = symbol_name(s);
		let hash = klei_hash(&name);
		hashes.insert(hash, name);

		put_i32(&mut data, hash);
		put_i32(&mut data, hash);
		put_i32(&mut data, 0);
		put_i32(&mut data, 0);
		put_i32(&mut data, frames as i32);
		for f in 0..frames {
			let slot = s * frames + f;
			let x1 = (slot % cells) as f32 * cell;
			let y1 = (slot / cells) as f32 * cell;
			put_i32(&mut data, f as i32);
			put_i32(&mut data, 1);
			put_i32(&mut data, 0);
			for value in [0.0, 0.0, 32.0, 32.0, x1, y1, x1 + cell, y1 + cell] {
				put_f32(&mut data, value);
			}
		}
	}

	write_hash_table(&mut data, &hashes).expect("writing to a Vec cannot fail");
	data
}

/// Generates a version 5 anim stream with `banks` banks of `frames` frames, each
/// frame holding `elements` elements that reference the symbols of
/// [`generate_build_data`].
pub fn generate_anim_data(banks: usize, frames: usize, elements: usize) -> Vec<u8> {
	let mut data = Vec::new();
	data.extend_from_slice(b"ANIM");
	put_i32(&mut data, 5);
	put_i32(&mut data, (banks * frames * elements) as i32);
	put_i32(&mut data, (banks * frames) as i32);
	put_i32(&mut data, banks as i32);

	let mut hashes = Hashes::new();
	for b in 0..banks {
		let name = format!("anim_{b}");
		let hash = klei_hash(&name);
		write_pstring(&mut data, &name).expect("writing to a Vec cannot fail");
		put_i32(&mut data, hash);
		hashes.insert(hash, name);
		put_f32(&mut data, 30.0);
		put_i32(&mut data, frames as i32);

		for _ in 0..frames {
			for value in [0.0, 0.0, 64.0, 64.0] {
				put_f32(&mut data, value);
			}
			put_i32(&mut data, elements as i32);
			for e in 0..elements {
				let name = symbol_name(e);
				let image = klei_hash(&name);
				hashes.insert(image, name);
				put_i32(&mut data, image);
				put_i32(&mut data, 0);
				put_i32(&mut data, image);
				put_i32(&mut data, 0);
				for value in [1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, e as f32, 0.0, 0.0] {
					put_f32(&mut data, value);
				}
			}
		}
	}

	put_i32(&mut data, elements as i32);
	write_hash_table(&mut data, &hashes).expect("writing to a Vec cannot fail");
	data
}

/// Generates a strings-only payload: `count` length-prefixed strings of `len` bytes.
pub fn generate_pstrings(count: usize, len: usize) -> Vec<u8> {
	let text = "k".repeat(len);
	let mut data = Vec::new();
	for _ in 0..count {
		write_pstring(&mut data, &text).expect("writing to a Vec cannot fail");
	}
	data
}
