//! Element identifier resolution.
//!
//! Every distinct `(image, index, layer)` triple in an [`Anim`] gets a sequential id.
//! Ids are handed out in traversal order (banks → frames → elements) and the first
//! occurrence of a triple wins; later repeats reuse that id. The rule is the same no
//! matter which decoder produced the anim.

use std::collections::HashMap;

use serde::Serialize;

use crate::file::{KanimError, ReferenceKind};
use crate::model::{Anim, Hashes};

/// Composite element key → sequential id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnimIdMap {
	ids: HashMap<String, usize>,
	order: Vec<String>,
}

impl AnimIdMap {
	/// Composite key for an element: `"{image_name}_{index}_{layer_name}"`.
	pub fn key(image_name: &str, index: i32, layer_name: &str) -> String {
		format!("{image_name}_{index}_{layer_name}")
	}

	/// Id assigned to `key`.
	pub fn get(&self, key: &str) -> Option<usize> {
		self.ids.get(key).copied()
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Returns `true` when no element was seen.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Keys in id order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.order.iter().map(String::as_str)
	}

	fn intern(&mut self, key: String) -> usize {
		if let Some(&id) = self.ids.get(&key) {
			return id;
		}
		let id = self.order.len();
		self.ids.insert(key.clone(), id);
		self.order.push(key);
		id
	}
}

/// Builds the id map for a decoded anim.
///
/// # Errors
///
/// Returns [`KanimError::MissingReference`] when an element's image or layer hash
/// has no name in `hashes`.
pub fn build_id_map(anim: &Anim, hashes: &Hashes) -> Result<AnimIdMap, KanimError> {
	let mut map = AnimIdMap::default();
	for element in anim.elements() {
		let image = hashes
			.name(element.image)
			.ok_or_else(|| KanimError::missing(ReferenceKind::ImageHash, element.image))?;
		let layer = hashes
			.name(element.layer)
			.ok_or_else(|| KanimError::missing(ReferenceKind::LayerHash, element.layer))?;
		map.intern(AnimIdMap::key(image, element.index, layer));
	}
	log::debug!("resolved {} distinct element ids", map.len());
	Ok(map)
}
