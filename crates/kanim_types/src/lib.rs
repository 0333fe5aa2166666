//! This crate provides the canonical animation model and the decoders that produce it
//! for the `kanim-rs` project.
//!
//! # Formats
//!
//! - **Kanim**: binary `BILD`/`ANIM` streams plus a texture atlas image
//! - **SCML**: Spriter XML projects with one PNG per sprite frame
//!
//! Both decoders implement [`source::AnimationSource`] and yield the same
//! [`model::Build`] and [`model::Anim`] values; [`id_map::build_id_map`] then assigns
//! element ids regardless of where the anim came from.
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use kanim_types::prelude::*;
//!
//! # fn main() -> Result<(), KanimError> {
//! let mut source = KanimReader::open("hero_build.bytes", "hero_anim.bytes", "hero_0.png")?;
//! let build = source.produce_build()?;
//! for sprite in &build.sprites {
//!     sprite.save_png("out")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use kanim_types::hash::klei_hash;
//! use kanim_types::model::Hashes;
//!
//! let mut hashes = Hashes::new();
//! hashes.insert(klei_hash("walk"), "walk");
//! assert_eq!(hashes.name(-790953047), Some("walk"));
//! ```

pub mod file;
pub mod hash;
pub mod id_map;
pub mod model;
pub mod packer;
pub mod source;

/// `use kanim_types::prelude::*;` to import commonly used items.
pub mod prelude;
