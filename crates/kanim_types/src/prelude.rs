//! Prelude module for `kanim_types`.
//!
//! Brings the model, both readers and the [`AnimationSource`] trait into scope.
//!
//! # Examples
//!
//! ```no_run
//! use kanim_types::prelude::*;
//!
//! # fn main() -> Result<(), KanimError> {
//! let mut source = ScmlReader::open("hero/hero.scml")?;
//! let anim = source.produce_anim()?;
//! println!("{} element ids", anim.id_map.len());
//! # Ok(())
//! # }
//! ```

// Errors
#[doc(inline)]
pub use crate::file::{FileType, KanimError, ProjectFormatError, ReferenceKind};

// Readers
#[doc(inline)]
pub use crate::file::kanim::KanimReader;
#[doc(inline)]
pub use crate::file::scml::{ProjectConfig, ScmlProject, ScmlReader};
#[doc(inline)]
pub use crate::source::{AnimationSource, DecodedAnim, DecodedBuild};

// Model
#[doc(inline)]
pub use crate::model::{
	Anim, AnimBank, AnimFrame, Build, BuildTable, BuildTableRow, Element, Frame, Hashes, Sprite,
	Symbol,
};

#[doc(inline)]
pub use crate::hash::{KleiHash, NameHasher, klei_hash};
#[doc(inline)]
pub use crate::id_map::{AnimIdMap, build_id_map};
#[doc(inline)]
pub use crate::packer::{PackedAtlas, Placement, ShelfPacker, TexturePacker};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
