//! Texture atlas packing.
//!
//! The project decoder hands every loaded sprite to a [`TexturePacker`] and reads the
//! resulting placements back to build UV rectangles. [`ShelfPacker`] is the default:
//! rows of sprites sorted by height, on a power-of-two wide sheet.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::file::KanimError;
use crate::model::Sprite;

/// Where a sprite landed in the atlas, in top-left-origin pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
	/// Sprite name
	pub name: String,
	/// Left pixel
	pub x: u32,
	/// Top pixel
	pub y: u32,
	/// Width in pixels
	pub width: u32,
	/// Height in pixels
	pub height: u32,
}

/// Packer output: the composited sheet and one placement per input sprite.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
	/// Composited atlas
	pub image: RgbaImage,
	/// Placements, in input order
	pub placements: Vec<Placement>,
}

/// Packs sprites into one atlas image.
pub trait TexturePacker {
	/// Packs `sprites`; placements are returned in input order.
	fn pack(&self, sprites: &[Sprite]) -> Result<PackedAtlas, KanimError>;
}

/// Shelf (row-based) packer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShelfPacker {
	/// Gap between neighbouring sprites in pixels
	pub padding: u32,
}

impl ShelfPacker {
	/// Creates a packer with the given padding.
	pub fn new(padding: u32) -> Self {
		Self {
			padding,
		}
	}
}

impl TexturePacker for ShelfPacker {
	fn pack(&self, sprites: &[Sprite]) -> Result<PackedAtlas, KanimError> {
		if sprites.is_empty() {
			return Ok(PackedAtlas {
				image: RgbaImage::new(0, 0),
				placements: Vec::new(),
			});
		}

		// Tallest first; ties keep input order
		let mut indices: Vec<usize> = (0..sprites.len()).collect();
		indices.sort_by(|&a, &b| sprites[b].height().cmp(&sprites[a].height()).then_with(|| a.cmp(&b)));

		let max_w = sprites.iter().map(Sprite::width).max().unwrap_or(1);
		let total_area: u64 = sprites
			.iter()
			.map(|s| u64::from(s.width() + self.padding) * u64::from(s.height() + self.padding))
			.sum();
		let sqrt_area = (total_area as f64).sqrt().ceil() as u32;
		let sheet_width = max_w.max(sqrt_area).max(1).next_power_of_two();

		let mut origins = vec![(0u32, 0u32); sprites.len()];
		let mut cursor_x = 0u32;
		let mut cursor_y = 0u32;
		let mut row_height = 0u32;

		for &idx in &indices {
			let w = sprites[idx].width();
			let h = sprites[idx].height();

			if cursor_x + w > sheet_width && cursor_x > 0 {
				cursor_y += row_height + self.padding;
				cursor_x = 0;
				row_height = 0;
			}

			origins[idx] = (cursor_x, cursor_y);
			row_height = row_height.max(h);
			cursor_x += w + self.padding;
		}

		let sheet_height = (cursor_y + row_height).max(1);
		let mut image = RgbaImage::new(sheet_width, sheet_height);
		let mut placements = Vec::with_capacity(sprites.len());

		for (sprite, &(x, y)) in sprites.iter().zip(&origins) {
			image::imageops::replace(&mut image, &sprite.image, i64::from(x), i64::from(y));
			placements.push(Placement {
				name: sprite.name.clone(),
				x,
				y,
				width: sprite.width(),
				height: sprite.height(),
			});
		}

		log::debug!(
			"packed {} sprites into a {}x{} atlas",
			placements.len(),
			sheet_width,
			sheet_height
		);

		Ok(PackedAtlas {
			image,
			placements,
		})
	}
}
