//! Name hashing used to join symbol and element tables.
//!
//! Existing containers key every symbol, layer and animation by a 32-bit hash of its
//! name. The default [`KleiHash`] reproduces that algorithm: an SDBM hash over the
//! lower-cased UTF-16 code units, with wrapping signed 32-bit arithmetic.

/// Maps a name to the 32-bit key stored in containers.
pub trait NameHasher {
	/// Hashes `name`.
	fn hash(&self, name: &str) -> i32;
}

/// The legacy case-insensitive SDBM hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KleiHash;

impl NameHasher for KleiHash {
	fn hash(&self, name: &str) -> i32 {
		klei_hash(name)
	}
}

/// Hashes `name` with the legacy case-insensitive SDBM algorithm.
///
/// ```
/// use kanim_types::hash::klei_hash;
///
/// assert_eq!(klei_hash("a"), 97);
/// assert_eq!(klei_hash("Walk"), klei_hash("walk"));
/// ```
pub fn klei_hash(name: &str) -> i32 {
	let lowered: String = name.chars().map(lower_char).collect();
	lowered.encode_utf16().fold(0i32, |h, unit| {
		(unit as i32).wrapping_add(h.wrapping_shl(6)).wrapping_add(h.wrapping_shl(16)).wrapping_sub(h)
	})
}

/// Context-free single character lowering; characters whose lowercase form
/// expands to several code points are kept as is.
fn lower_char(c: char) -> char {
	let mut lower = c.to_lowercase();
	match (lower.next(), lower.next()) {
		(Some(single), None) => single,
		_ => c,
	}
}
