//! The capability shared by every input format.
//!
//! Binary containers and SCML projects both decode into the same canonical model.
//! Callers pick a reader for their input and then depend only on [`AnimationSource`].

use image::RgbaImage;

use crate::file::KanimError;
use crate::id_map::AnimIdMap;
use crate::model::{Anim, Build, BuildTable, Hashes, Sprite};

/// Everything known about the sprite sheet after a build decode.
#[derive(Debug, Clone)]
pub struct DecodedBuild {
	/// Symbols and frames
	pub build: Build,
	/// Build hash table
	pub hashes: Hashes,
	/// Pixel-space sprite rectangles
	pub table: BuildTable,
	/// Atlas image the table refers to
	pub atlas: RgbaImage,
	/// Individual sprites
	pub sprites: Vec<Sprite>,
}

/// Everything known about the animations after an anim decode.
#[derive(Debug, Clone)]
pub struct DecodedAnim {
	/// Banks and keyframes
	pub anim: Anim,
	/// Anim hash table
	pub hashes: Hashes,
	/// Element ids
	pub id_map: AnimIdMap,
}

/// Produces the canonical model from some input.
///
/// A failure aborts the whole decode; no partially built value is returned.
pub trait AnimationSource {
	/// Decodes the build side.
	fn produce_build(&mut self) -> Result<DecodedBuild, KanimError>;

	/// Decodes the anim side and resolves element ids.
	fn produce_anim(&mut self) -> Result<DecodedAnim, KanimError>;
}
