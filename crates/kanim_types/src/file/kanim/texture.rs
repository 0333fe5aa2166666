//! Splitting a texture atlas back into per-frame sprites.

use image::RgbaImage;

use crate::file::KanimError;
use crate::model::{BuildTable, Sprite};

/// Crops one sprite per build table row out of `atlas`.
///
/// Sprites are named `"{symbol}_{index}"`. Row `y` values use a bottom-left origin,
/// so the crop's top row is `atlas_height - y`.
///
/// # Errors
///
/// Returns [`KanimError::CropOutOfBounds`] if a row's rectangle does not fit the atlas.
pub fn export_textures(atlas: &RgbaImage, table: &BuildTable) -> Result<Vec<Sprite>, KanimError> {
	let (atlas_width, atlas_height) = atlas.dimensions();
	let mut sprites = Vec::with_capacity(table.len());

	for row in table.rows() {
		let x = row.x.round() as i64;
		let y = row.top(atlas_height).round() as i64;
		let width = row.width.round().max(0.0) as u32;
		let height = row.height.round().max(0.0) as u32;
		let name = row.sprite_name();
		log::debug!("crop {name}: ({x}, {y}) {width}x{height} of {atlas_width}x{atlas_height}");

		let fits = x >= 0
			&& y >= 0
			&& x + i64::from(width) <= i64::from(atlas_width)
			&& y + i64::from(height) <= i64::from(atlas_height);
		if !fits {
			return Err(KanimError::CropOutOfBounds {
				name,
				x,
				y,
				width,
				height,
				atlas_width,
				atlas_height,
			});
		}

		let image = image::imageops::crop_imm(atlas, x as u32, y as u32, width, height).to_image();
		sprites.push(Sprite::new(name, image));
	}

	Ok(sprites)
}
