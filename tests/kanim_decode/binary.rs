//! binary container tests

use std::io::Cursor;

use image::{Rgba, RgbaImage};
use kanim_rs::file::kanim::io::{write_hash_table, write_pstring};
use kanim_rs::file::kanim::{decode_anim, decode_build, export_textures};
use kanim_rs::prelude::*;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn put_i32(data: &mut Vec<u8>, value: i32) {
	data.extend_from_slice(&value.to_le_bytes());
}

fn put_f32s(data: &mut Vec<u8>, values: &[f32]) {
	for value in values {
		data.extend_from_slice(&value.to_le_bytes());
	}
}

/// "arm" with two frames covering the left and right halves of the atlas.
fn build_bytes() -> Vec<u8> {
	let arm = klei_hash("arm");
	let mut data = b"BILD".to_vec();
	put_i32(&mut data, 10);
	put_i32(&mut data, 1);
	put_i32(&mut data, 2);
	write_pstring(&mut data, "hero").unwrap();

	put_i32(&mut data, arm);
	put_i32(&mut data, arm);
	put_i32(&mut data, 0);
	put_i32(&mut data, 0);
	put_i32(&mut data, 2);
	for (index, x1) in [(0, 0.0), (1, 0.5)] {
		put_i32(&mut data, index);
		put_i32(&mut data, 2);
		put_i32(&mut data, 0);
		put_f32s(&mut data, &[-4.0, 4.0, 8.0, 8.0, x1, 0.0, x1 + 0.5, 1.0]);
	}

	let mut hashes = Hashes::new();
	hashes.insert(arm, "arm");
	write_hash_table(&mut data, &hashes).unwrap();
	data
}

/// "wave": two frames showing arm_0 then arm_1, plus a repeated arm_0.
fn anim_bytes() -> Vec<u8> {
	let arm = klei_hash("arm");
	let wave = klei_hash("wave");
	let mut data = b"ANIM".to_vec();
	put_i32(&mut data, 5);
	put_i32(&mut data, 3);
	put_i32(&mut data, 2);
	put_i32(&mut data, 1);

	write_pstring(&mut data, "wave").unwrap();
	put_i32(&mut data, wave);
	put_f32s(&mut data, &[15.0]);
	put_i32(&mut data, 2);
	for indices in [&[0][..], &[1, 0][..]] {
		put_f32s(&mut data, &[0.0, 0.0, 8.0, 8.0]);
		put_i32(&mut data, indices.len() as i32);
		for &index in indices {
			put_i32(&mut data, arm);
			put_i32(&mut data, index);
			put_i32(&mut data, arm);
			put_i32(&mut data, 0);
			put_f32s(&mut data, &[0.5, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 2.0, -2.0, 0.0]);
		}
	}
	put_i32(&mut data, 2);

	let mut hashes = Hashes::new();
	hashes.insert(arm, "arm");
	hashes.insert(wave, "wave");
	write_hash_table(&mut data, &hashes).unwrap();
	data
}

fn reader(atlas: RgbaImage) -> KanimReader<Cursor<Vec<u8>>, Cursor<Vec<u8>>> {
	KanimReader::new(Cursor::new(build_bytes()), Cursor::new(anim_bytes()), atlas)
}

fn atlas() -> RgbaImage {
	RgbaImage::from_fn(8, 4, |x, _| if x < 4 { RED } else { BLUE })
}

#[test_log::test]
fn test_reader_produces_build_table_and_sprites() {
	let mut reader = reader(atlas());
	let decoded = reader.produce_build().unwrap();

	assert_eq!(decoded.build.name, "hero");
	assert_eq!(decoded.build.symbol_count(), 1);
	assert_eq!(decoded.build.frame_count(), 2);
	let times: Vec<_> = decoded.build.symbols[0].frames().iter().map(|f| f.time).collect();
	assert_eq!(times, vec![0, 2]);

	let rows = decoded.table.rows();
	assert_eq!(rows.len(), 2);
	assert_eq!((rows[1].x, rows[1].y, rows[1].width, rows[1].height), (4.0, 4.0, 4.0, 4.0));

	let names: Vec<_> = decoded.sprites.iter().map(|s| s.name.as_str()).collect();
	assert_eq!(names, vec!["arm_0", "arm_1"]);
	assert!(decoded.sprites[0].image.pixels().all(|p| *p == RED));
	assert!(decoded.sprites[1].image.pixels().all(|p| *p == BLUE));
}

#[test]
fn test_reader_produces_anim_and_ids() {
	let mut reader = reader(atlas());
	let decoded = reader.produce_anim().unwrap();

	let anim = &decoded.anim;
	assert_eq!(anim.anim_count(), 1);
	assert_eq!(anim.total_elements(), 3);
	assert_eq!(anim.max_visible_symbol_frames, 2);
	assert_eq!(anim.banks[0].name, "wave");
	assert_eq!(anim.banks[0].rate, 15.0);

	let element = &anim.banks[0].frames[0].elements[0];
	assert_eq!((element.a, element.r), (0.5, 1.0));
	assert_eq!((element.m5, element.m6), (2.0, -2.0));

	assert_eq!(decoded.id_map.len(), 2);
	assert_eq!(decoded.id_map.get(&AnimIdMap::key("arm", 0, "arm")), Some(0));
	assert_eq!(decoded.id_map.get(&AnimIdMap::key("arm", 1, "arm")), Some(1));
}

#[test]
fn test_swapped_streams_are_rejected() {
	let err = decode_build(anim_bytes().as_slice()).unwrap_err();
	assert_eq!(err.to_string(), "build header mismatch: expected \"BILD\" but got \"ANIM\"");

	let err = decode_anim(build_bytes().as_slice()).unwrap_err();
	assert!(matches!(
		err,
		KanimError::HeaderMismatch {
			file_type: FileType::Anim,
			..
		}
	));
}

#[test]
fn test_atlas_too_small_for_table() {
	let (build, hashes) = decode_build(build_bytes().as_slice()).unwrap();
	let table = BuildTable::new(&build, &hashes, 16, 4).unwrap();
	assert_eq!((table.rows()[1].x, table.rows()[1].width), (8.0, 8.0));

	let err = export_textures(&RgbaImage::new(12, 4), &table).unwrap_err();
	assert!(matches!(
		err,
		KanimError::CropOutOfBounds {
			x: 8,
			width: 8,
			..
		}
	));
}

#[test]
fn test_sprites_save_as_png() {
	let dir = tempfile::tempdir().unwrap();
	let mut reader = reader(atlas());
	let decoded = reader.produce_build().unwrap();

	for sprite in &decoded.sprites {
		let path = sprite.save_png(dir.path()).unwrap();
		let reloaded = image::open(&path).unwrap().to_rgba8();
		assert_eq!(reloaded, sprite.image);
	}
	assert!(dir.path().join("arm_1.png").is_file());
}
