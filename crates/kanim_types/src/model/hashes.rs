//! Bidirectional hash ⇄ name table.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Maps 32-bit name hashes to the strings they were derived from, and back.
///
/// Both directions are kept in sync on every insert. Iteration via [`Hashes::iter`]
/// is ordered by hash so serialized tables are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<i32, String>", into = "BTreeMap<i32, String>")]
pub struct Hashes {
	by_hash: BTreeMap<i32, String>,
	by_name: HashMap<String, i32>,
}

impl Hashes {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces the name for `hash`.
	pub fn insert(&mut self, hash: i32, name: impl Into<String>) {
		let name = name.into();
		if let Some(previous) = self.by_hash.insert(hash, name.clone()) {
			if previous != name {
				self.by_name.remove(&previous);
			}
		}
		self.by_name.insert(name, hash);
	}

	/// Removes `hash` and its name.
	pub fn remove(&mut self, hash: i32) -> Option<String> {
		let name = self.by_hash.remove(&hash)?;
		if self.by_name.get(&name) == Some(&hash) {
			self.by_name.remove(&name);
		}
		Some(name)
	}

	/// Looks up the name stored for `hash`.
	pub fn name(&self, hash: i32) -> Option<&str> {
		self.by_hash.get(&hash).map(String::as_str)
	}

	/// Looks up the hash stored for `name`.
	pub fn hash(&self, name: &str) -> Option<i32> {
		self.by_name.get(name).copied()
	}

	/// Returns `true` when `hash` is present.
	pub fn contains(&self, hash: i32) -> bool {
		self.by_hash.contains_key(&hash)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.by_hash.len()
	}

	/// Returns `true` when the table is empty.
	pub fn is_empty(&self) -> bool {
		self.by_hash.is_empty()
	}

	/// Iterates `(hash, name)` pairs in hash order.
	pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
		self.by_hash.iter().map(|(&hash, name)| (hash, name.as_str()))
	}
}

impl From<BTreeMap<i32, String>> for Hashes {
	fn from(by_hash: BTreeMap<i32, String>) -> Self {
		let by_name = by_hash.iter().map(|(&hash, name)| (name.clone(), hash)).collect();
		Self {
			by_hash,
			by_name,
		}
	}
}

impl From<Hashes> for BTreeMap<i32, String> {
	fn from(value: Hashes) -> Self {
		value.by_hash
	}
}

impl FromIterator<(i32, String)> for Hashes {
	fn from_iter<T: IntoIterator<Item = (i32, String)>>(iter: T) -> Self {
		let mut hashes = Hashes::new();
		for (hash, name) in iter {
			hashes.insert(hash, name);
		}
		hashes
	}
}
