//! Anim side of the canonical model: banks of keyframes of positioned elements.

use serde::{Deserialize, Serialize};

/// One transformed sprite reference inside a keyframe.
///
/// `m1..m4` are the linear part of the affine transform (scale composed with
/// rotation), `m5`/`m6` the translation in container units (pixels ×2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
	/// Symbol name hash
	pub image: i32,
	/// Frame index within the symbol
	pub index: i32,
	/// Layer name hash
	pub layer: i32,
	/// Opaque bitfield
	pub flags: i32,
	/// Red multiplier
	pub r: f32,
	/// Green multiplier
	pub g: f32,
	/// Blue multiplier
	pub b: f32,
	/// Alpha multiplier
	pub a: f32,
	/// Matrix a
	pub m1: f32,
	/// Matrix b
	pub m2: f32,
	/// Matrix c
	pub m3: f32,
	/// Matrix d
	pub m4: f32,
	/// Translation x
	pub m5: f32,
	/// Translation y
	pub m6: f32,
	/// Parsed but unused downstream
	pub order: f32,
}

impl Default for Element {
	fn default() -> Self {
		Self {
			image: 0,
			index: 0,
			layer: 0,
			flags: 0,
			r: 1.0,
			g: 1.0,
			b: 1.0,
			a: 1.0,
			m1: 1.0,
			m2: 0.0,
			m3: 0.0,
			m4: 1.0,
			m5: 0.0,
			m6: 0.0,
			order: 0.0,
		}
	}
}

/// A keyframe: the bounding box of its contents and the elements in paint order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimFrame {
	/// Bounding box center x
	pub x: f32,
	/// Bounding box center y
	pub y: f32,
	/// Bounding box width
	pub width: f32,
	/// Bounding box height
	pub height: f32,
	/// Elements, front to back
	pub elements: Vec<Element>,
}

/// A named animation clip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimBank {
	/// Clip name
	pub name: String,
	/// Name hash
	pub hash: i32,
	/// Frames per second
	pub rate: f32,
	/// Keyframes in playback order
	pub frames: Vec<AnimFrame>,
}

/// All animation banks of one container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Anim {
	/// Container version
	pub version: i32,
	/// Declared total element count
	pub element_count: i32,
	/// Declared total frame count
	pub frame_count: i32,
	/// Maximum concurrent elements in any single frame
	pub max_visible_symbol_frames: i32,
	/// Banks in stream order
	pub banks: Vec<AnimBank>,
}

impl Anim {
	/// Number of banks.
	pub fn anim_count(&self) -> usize {
		self.banks.len()
	}

	/// Total number of keyframes across all banks.
	pub fn total_frames(&self) -> usize {
		self.banks.iter().map(|bank| bank.frames.len()).sum()
	}

	/// Total number of elements across all keyframes.
	pub fn total_elements(&self) -> usize {
		self.banks.iter().flat_map(|bank| &bank.frames).map(|frame| frame.elements.len()).sum()
	}

	/// Iterates every element in traversal order (banks → frames → elements).
	pub fn elements(&self) -> impl Iterator<Item = &Element> {
		self.banks.iter().flat_map(|bank| &bank.frames).flat_map(|frame| &frame.elements)
	}
}
