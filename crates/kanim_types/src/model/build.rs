//! Build side of the canonical model: symbols, their frames and the derived
//! pixel-space sprite table.

use serde::{Deserialize, Serialize};

use crate::file::{KanimError, ReferenceKind};

use super::Hashes;

/// A single sprite frame inside a [`Symbol`].
///
/// Pivot and size values are stored doubled (the container's unit is half a pixel),
/// and `pivot_x` is negated. The UV rectangle is normalized to `[0, 1]` atlas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
	/// Index of this frame within its symbol
	pub source_frame_num: i32,
	/// Hold time in ticks
	pub duration: i32,
	/// Legacy field, carried through untouched
	pub build_image_index: i32,
	/// Pivot X offset (×2, negated)
	pub pivot_x: f32,
	/// Pivot Y offset (×2)
	pub pivot_y: f32,
	/// Sprite width ×2
	pub pivot_width: f32,
	/// Sprite height ×2
	pub pivot_height: f32,
	/// UV left
	pub x1: f32,
	/// UV top
	pub y1: f32,
	/// UV right
	pub x2: f32,
	/// UV bottom
	pub y2: f32,
	/// Running sum of the preceding frames' durations within the symbol
	pub time: i32,
}

/// A named group of sprite frames addressed by a stable hash.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Symbol {
	/// Name hash, also the lookup key into the build [`Hashes`]
	pub hash: i32,
	/// Path hash (version > 9 only)
	pub path: i32,
	/// Always 0 in practice
	pub color: i32,
	/// Opaque bitfield
	pub flags: i32,
	frames: Vec<Frame>,
}

impl Symbol {
	/// Creates a symbol and derives each frame's `time` from the durations before it.
	pub fn new(hash: i32, path: i32, color: i32, flags: i32, frames: Vec<Frame>) -> Self {
		let mut symbol = Self {
			hash,
			path,
			color,
			flags,
			frames,
		};
		symbol.retime();
		symbol
	}

	/// Appends a frame, deriving its `time`.
	pub fn push_frame(&mut self, mut frame: Frame) {
		frame.time = self.frames.last().map_or(0, |last| last.time + last.duration);
		self.frames.push(frame);
	}

	/// Frames of this symbol, in stream order.
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Number of frames.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	fn retime(&mut self) {
		let mut time = 0;
		for frame in &mut self.frames {
			frame.time = time;
			time += frame.duration;
		}
	}
}

/// The sprite-sheet description: every symbol and its frames.
///
/// Symbol and frame counts are derived from the contained records and can never
/// disagree with them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Build {
	/// Container version
	pub version: i32,
	/// Build name
	pub name: String,
	/// Symbols in stream order
	pub symbols: Vec<Symbol>,
}

impl Build {
	/// Creates a build from already decoded symbols.
	pub fn new(version: i32, name: impl Into<String>, symbols: Vec<Symbol>) -> Self {
		Self {
			version,
			name: name.into(),
			symbols,
		}
	}

	/// Number of symbols.
	pub fn symbol_count(&self) -> usize {
		self.symbols.len()
	}

	/// Total number of frames across all symbols.
	pub fn frame_count(&self) -> usize {
		self.symbols.iter().map(Symbol::frame_count).sum()
	}
}

/// Pixel-space rectangle of one build frame inside the atlas.
///
/// `y` keeps the bottom-left origin of the UV rectangle; top-left image
/// coordinates are obtained with [`BuildTableRow::top`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildTableRow {
	/// Symbol name
	pub name: String,
	/// Symbol hash
	pub hash: i32,
	/// Frame index within the symbol
	pub index: i32,
	/// Frame time
	pub time: i32,
	/// Frame duration
	pub duration: i32,
	/// Left edge in pixels
	pub x: f32,
	/// Edge in pixels measured from the bottom of the atlas
	pub y: f32,
	/// Width in pixels
	pub width: f32,
	/// Height in pixels
	pub height: f32,
	/// Pivot X (container units)
	pub pivot_x: f32,
	/// Pivot Y (container units)
	pub pivot_y: f32,
	/// Pivot width (container units)
	pub pivot_width: f32,
	/// Pivot height (container units)
	pub pivot_height: f32,
}

impl BuildTableRow {
	/// Top pixel row of this sprite in an atlas of the given height.
	pub fn top(&self, atlas_height: u32) -> f32 {
		atlas_height as f32 - self.y
	}

	/// Sprite name used for exported textures, `"{name}_{index}"`.
	pub fn sprite_name(&self) -> String {
		format!("{}_{}", self.name, self.index)
	}
}

/// One [`BuildTableRow`] per build frame, in symbol/frame order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildTable {
	rows: Vec<BuildTableRow>,
}

impl BuildTable {
	/// Derives the table from a build and the atlas pixel size.
	///
	/// # Errors
	///
	/// Returns [`KanimError::MissingReference`] if a symbol hash has no name in `hashes`.
	pub fn new(
		build: &Build,
		hashes: &Hashes,
		atlas_width: u32,
		atlas_height: u32,
	) -> Result<Self, KanimError> {
		let w = atlas_width as f32;
		let h = atlas_height as f32;
		let mut rows = Vec::with_capacity(build.frame_count());

		for symbol in &build.symbols {
			let name = hashes
				.name(symbol.hash)
				.ok_or_else(|| KanimError::missing(ReferenceKind::SymbolHash, symbol.hash))?;

			for frame in symbol.frames() {
				rows.push(BuildTableRow {
					name: name.to_string(),
					hash: symbol.hash,
					index: frame.source_frame_num,
					time: frame.time,
					duration: frame.duration,
					x: frame.x1 * w,
					y: (1.0 - frame.y1) * h,
					width: (frame.x2 - frame.x1) * w,
					height: (frame.y2 - frame.y1) * h,
					pivot_x: frame.pivot_x,
					pivot_y: frame.pivot_y,
					pivot_width: frame.pivot_width,
					pivot_height: frame.pivot_height,
				});
			}
		}

		Ok(Self {
			rows,
		})
	}

	/// Rows in symbol/frame order.
	pub fn rows(&self) -> &[BuildTableRow] {
		&self.rows
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns `true` when there are no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}
