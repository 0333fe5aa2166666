//! Named sprite bitmaps.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::file::KanimError;

/// A single sprite image, named `"{symbol}_{index}"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
	/// Sprite name without extension
	pub name: String,
	/// Pixels
	pub image: RgbaImage,
}

impl Sprite {
	/// Creates a sprite.
	pub fn new(name: impl Into<String>, image: RgbaImage) -> Self {
		Self {
			name: name.into(),
			image,
		}
	}

	/// Width in pixels.
	pub fn width(&self) -> u32 {
		self.image.width()
	}

	/// Height in pixels.
	pub fn height(&self) -> u32 {
		self.image.height()
	}

	/// Writes `"{name}.png"` into `dir` and returns the written path.
	pub fn save_png(&self, dir: impl AsRef<Path>) -> Result<PathBuf, KanimError> {
		let path = dir.as_ref().join(format!("{}.png", self.name));
		self.image.save_with_format(&path, image::ImageFormat::Png)?;
		Ok(path)
	}
}
