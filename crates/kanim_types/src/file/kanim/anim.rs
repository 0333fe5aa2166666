//! Anim stream (`ANIM`) decoding.

use std::io::Read;

use crate::file::{FileType, KanimError, ReferenceKind};
use crate::model::{Anim, AnimBank, AnimFrame, Element, Hashes};

use super::constants::ANIM_MAGIC;
use super::io::StreamReader;

/// Decodes an anim stream into an [`Anim`] and its hash table.
///
/// The header's `element_count`/`frame_count` are kept as declared; converters are
/// known to write zeros there, so they are not checked against the records.
///
/// # Errors
///
/// - [`KanimError::HeaderMismatch`] if the stream does not start with `ANIM`
/// - [`KanimError::MissingReference`] if an element's image or layer hash is not in
///   the hash table
/// - IO errors for truncated streams
pub fn decode_anim<R: Read>(reader: R) -> Result<(Anim, Hashes), KanimError> {
	let mut r = StreamReader::new(reader, FileType::Anim);
	r.expect_magic(ANIM_MAGIC)?;

	let version = r.read_i32()?;
	let element_count = r.read_i32()?;
	let frame_count = r.read_i32()?;
	let anim_count = r.read_count("anim_count")?;

	let mut banks = Vec::new();
	for _ in 0..anim_count {
		banks.push(read_bank(&mut r)?);
	}

	let max_visible_symbol_frames = r.read_i32()?;
	let hashes = r.read_hash_table()?;

	let anim = Anim {
		version,
		element_count,
		frame_count,
		max_visible_symbol_frames,
		banks,
	};

	for element in anim.elements() {
		if !hashes.contains(element.image) {
			return Err(KanimError::missing(ReferenceKind::ImageHash, element.image));
		}
		if !hashes.contains(element.layer) {
			return Err(KanimError::missing(ReferenceKind::LayerHash, element.layer));
		}
	}

	Ok((anim, hashes))
}

fn read_bank<R: Read>(r: &mut StreamReader<R>) -> Result<AnimBank, KanimError> {
	let name = r.read_pstring()?;
	let hash = r.read_i32()?;
	let rate = r.read_f32()?;
	let frame_count = r.read_count("bank frame_count")?;
	log::debug!("bank \"{name}\" (hash {hash}): {frame_count} frames at {rate} fps");

	let mut frames = Vec::new();
	for _ in 0..frame_count {
		let x = r.read_f32()?;
		let y = r.read_f32()?;
		let width = r.read_f32()?;
		let height = r.read_f32()?;
		let element_count = r.read_count("frame element_count")?;

		let mut elements = Vec::new();
		for _ in 0..element_count {
			elements.push(read_element(r)?);
		}

		frames.push(AnimFrame {
			x,
			y,
			width,
			height,
			elements,
		});
	}

	Ok(AnimBank {
		name,
		hash,
		rate,
		frames,
	})
}

fn read_element<R: Read>(r: &mut StreamReader<R>) -> Result<Element, KanimError> {
	let image = r.read_i32()?;
	let index = r.read_i32()?;
	let layer = r.read_i32()?;
	let flags = r.read_i32()?;
	// Colour channels are stored alpha first
	let a = r.read_f32()?;
	let b = r.read_f32()?;
	let g = r.read_f32()?;
	let red = r.read_f32()?;

	Ok(Element {
		image,
		index,
		layer,
		flags,
		r: red,
		g,
		b,
		a,
		m1: r.read_f32()?,
		m2: r.read_f32()?,
		m3: r.read_f32()?,
		m4: r.read_f32()?,
		m5: r.read_f32()?,
		m6: r.read_f32()?,
		order: r.read_f32()?,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::kanim::io::{write_hash_table, write_pstring};

	fn put_i32(buf: &mut Vec<u8>, v: i32) {
		buf.extend_from_slice(&v.to_le_bytes());
	}

	fn put_f32(buf: &mut Vec<u8>, v: f32) {
		buf.extend_from_slice(&v.to_le_bytes());
	}

	fn put_element(buf: &mut Vec<u8>, image: i32, layer: i32) {
		put_i32(buf, image);
		put_i32(buf, 1);
		put_i32(buf, layer);
		put_i32(buf, 0);
		// a, b, g, r
		for v in [0.5, 0.25, 0.75, 1.0] {
			put_f32(buf, v);
		}
		for v in [1.0, 0.0, 0.0, 1.0, 10.0, -20.0, 0.0] {
			put_f32(buf, v);
		}
	}

	fn anim_bytes(layer: i32) -> Vec<u8> {
		let mut buf = b"ANIM".to_vec();
		put_i32(&mut buf, 5);
		put_i32(&mut buf, 0);
		put_i32(&mut buf, 0);
		put_i32(&mut buf, 1);

		write_pstring(&mut buf, "idle").unwrap();
		put_i32(&mut buf, 42);
		put_f32(&mut buf, 30.0);
		put_i32(&mut buf, 2);
		for elements in [1, 2] {
			for v in [1.0, 2.0, 3.0, 4.0] {
				put_f32(&mut buf, v);
			}
			put_i32(&mut buf, elements);
			for _ in 0..elements {
				put_element(&mut buf, 7, layer);
			}
		}

		put_i32(&mut buf, 2);
		let hashes: Hashes = [(7, "head".to_string()), (42, "idle".to_string())].into_iter().collect();
		write_hash_table(&mut buf, &hashes).unwrap();
		buf
	}

	#[test]
	fn test_decode_anim() {
		let (anim, hashes) = decode_anim(anim_bytes(7).as_slice()).unwrap();

		assert_eq!(anim.version, 5);
		assert_eq!(anim.anim_count(), 1);
		assert_eq!(anim.max_visible_symbol_frames, 2);
		assert_eq!(anim.total_elements(), 3);
		assert_eq!(hashes.name(42), Some("idle"));

		let bank = &anim.banks[0];
		assert_eq!((bank.name.as_str(), bank.hash, bank.rate), ("idle", 42, 30.0));
		assert_eq!(bank.frames[1].height, 4.0);

		let e = bank.frames[1].elements[1];
		assert_eq!((e.r, e.g, e.b, e.a), (1.0, 0.75, 0.25, 0.5));
		assert_eq!((e.m5, e.m6), (10.0, -20.0));
	}

	#[test]
	fn test_wrong_magic_reports_both_headers() {
		let mut bytes = anim_bytes(7);
		bytes[..4].copy_from_slice(b"BILD");
		let err = decode_anim(bytes.as_slice()).unwrap_err();
		assert_eq!(err.to_string(), "anim header mismatch: expected \"ANIM\" but got \"BILD\"");
	}

	#[test]
	fn test_unresolved_layer_is_fatal() {
		let err = decode_anim(anim_bytes(8).as_slice()).unwrap_err();
		assert!(matches!(
			err,
			KanimError::MissingReference {
				kind: ReferenceKind::LayerHash,
				..
			}
		));
	}
}
