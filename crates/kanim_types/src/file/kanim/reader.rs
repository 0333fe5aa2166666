//! [`AnimationSource`] over a binary build/anim/atlas triple.

use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use image::RgbaImage;

use crate::file::KanimError;
use crate::id_map::build_id_map;
use crate::model::BuildTable;
use crate::source::{AnimationSource, DecodedAnim, DecodedBuild};

use super::{decode_anim, decode_build, export_textures};

/// Reads a kanim container from its two streams and atlas image.
///
/// Each `produce_*` call consumes its stream, so each side can be produced once.
pub struct KanimReader<B, A> {
	build: B,
	anim: A,
	atlas: RgbaImage,
}

impl KanimReader<BufReader<fs::File>, BufReader<fs::File>> {
	/// Opens the build stream, anim stream and atlas image at the given paths.
	///
	/// # Examples
	///
	/// ```no_run
	/// use kanim_types::prelude::*;
	///
	/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
	/// let mut reader = KanimReader::open("hero_build.bytes", "hero_anim.bytes", "hero_0.png")?;
	/// let build = reader.produce_build()?;
	/// let anim = reader.produce_anim()?;
	/// println!("{} sprites, {} banks", build.sprites.len(), anim.anim.anim_count());
	/// # Ok(())
	/// # }
	/// ```
	pub fn open(
		build: impl AsRef<Path>,
		anim: impl AsRef<Path>,
		atlas: impl AsRef<Path>,
	) -> Result<Self, KanimError> {
		let build = BufReader::new(fs::File::open(build)?);
		let anim = BufReader::new(fs::File::open(anim)?);
		let atlas = image::open(atlas)?.to_rgba8();
		Ok(Self::new(build, anim, atlas))
	}
}

impl<B: Read, A: Read> KanimReader<B, A> {
	/// Wraps already opened streams.
	pub fn new(build: B, anim: A, atlas: RgbaImage) -> Self {
		Self {
			build,
			anim,
			atlas,
		}
	}

	/// The atlas image.
	pub fn atlas(&self) -> &RgbaImage {
		&self.atlas
	}
}

impl<B: Read, A: Read> AnimationSource for KanimReader<B, A> {
	fn produce_build(&mut self) -> Result<DecodedBuild, KanimError> {
		log::info!("Parsing build data.");
		let (build, hashes) = decode_build(&mut self.build)?;
		let table = BuildTable::new(&build, &hashes, self.atlas.width(), self.atlas.height())?;

		log::info!("Importing textures.");
		let sprites = export_textures(&self.atlas, &table)?;

		Ok(DecodedBuild {
			build,
			hashes,
			table,
			atlas: self.atlas.clone(),
			sprites,
		})
	}

	fn produce_anim(&mut self) -> Result<DecodedAnim, KanimError> {
		log::info!("Parsing animation data.");
		let (anim, hashes) = decode_anim(&mut self.anim)?;
		let id_map = build_id_map(&anim, &hashes)?;
		Ok(DecodedAnim {
			anim,
			hashes,
			id_map,
		})
	}
}
