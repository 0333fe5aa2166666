//! Build stream (`BILD`) decoding.

use std::io::Read;

use crate::file::{FileType, KanimError, ReferenceKind};
use crate::model::{Build, Frame, Hashes, Symbol};

use super::constants::{BUILD_MAGIC, BUILD_PATH_MIN_VERSION};
use super::io::StreamReader;

/// Decodes a build stream into a [`Build`] and its hash table.
///
/// # Errors
///
/// - [`KanimError::HeaderMismatch`] if the stream does not start with `BILD`
/// - [`KanimError::CountMismatch`] if the declared frame total disagrees with the records
/// - [`KanimError::MissingReference`] if a symbol hash has no entry in the hash table
/// - IO errors for truncated streams
///
/// # Examples
///
/// ```no_run
/// use kanim_types::file::kanim::decode_build;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = std::fs::File::open("build.bytes")?;
/// let (build, hashes) = decode_build(std::io::BufReader::new(file))?;
/// println!("{}: {} symbols", build.name, build.symbol_count());
/// # Ok(())
/// # }
/// ```
pub fn decode_build<R: Read>(reader: R) -> Result<(Build, Hashes), KanimError> {
	let mut r = StreamReader::new(reader, FileType::Build);
	r.expect_magic(BUILD_MAGIC)?;

	let version = r.read_i32()?;
	let symbol_count = r.read_count("symbol_count")?;
	let frame_count = r.read_count("frame_count")?;
	let name = r.read_pstring()?;
	log::debug!("build \"{name}\" v{version}: {symbol_count} symbols, {frame_count} frames");

	let mut symbols = Vec::new();
	for _ in 0..symbol_count {
		symbols.push(read_symbol(&mut r, version)?);
	}

	let build = Build::new(version, name, symbols);
	if build.frame_count() != frame_count {
		return Err(KanimError::CountMismatch {
			file_type: FileType::Build,
			field: "frame_count",
			declared: frame_count as i32,
			actual: build.frame_count(),
		});
	}

	let hashes = r.read_hash_table()?;
	if let Some(symbol) = build.symbols.iter().find(|s| !hashes.contains(s.hash)) {
		return Err(KanimError::missing(ReferenceKind::SymbolHash, symbol.hash));
	}

	Ok((build, hashes))
}

fn read_symbol<R: Read>(r: &mut StreamReader<R>, version: i32) -> Result<Symbol, KanimError> {
	let hash = r.read_i32()?;
	let path = if version >= BUILD_PATH_MIN_VERSION {
		r.read_i32()?
	} else {
		0
	};
	let color = r.read_i32()?;
	let flags = r.read_i32()?;
	let frame_count = r.read_count("symbol frame_count")?;

	let mut frames = Vec::new();
	for _ in 0..frame_count {
		frames.push(Frame {
			source_frame_num: r.read_i32()?,
			duration: r.read_i32()?,
			build_image_index: r.read_i32()?,
			pivot_x: r.read_f32()?,
			pivot_y: r.read_f32()?,
			pivot_width: r.read_f32()?,
			pivot_height: r.read_f32()?,
			x1: r.read_f32()?,
			y1: r.read_f32()?,
			x2: r.read_f32()?,
			y2: r.read_f32()?,
			time: 0,
		});
	}

	Ok(Symbol::new(hash, path, color, flags, frames))
}
