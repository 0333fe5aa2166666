//! SCML (Spriter) project support.
//!
//! A project is an XML document plus one PNG per sprite frame in the same
//! directory. Decoding runs in two passes over the same [`ScmlProject`]:
//!
//! 1. the sprite pass ([`decode_project`]) packs the PNGs into an atlas and
//!    derives one build symbol per sprite base name;
//! 2. the animation pass ([`decode_animations`]) resolves every mainline key
//!    against its timelines into anim banks.
//!
//! Only the subset of SCML that maps onto kanim is read: `<folder>/<file>` pivots
//! and sizes, and `<entity>/<animation>` mainlines and object timelines. Bones are
//! reported and skipped.

mod anim;
mod build;
mod config;
pub mod geometry;
mod naming;
mod project;
mod reader;
mod xml;

pub use self::anim::decode_animations;
pub use self::build::{ProjectBuild, decode_project, load_sprites, pack_build};
pub use self::config::ProjectConfig;
pub use self::naming::{split_frame, without_extension};
pub use self::project::{ScmlProject, SpriteFile};
pub use self::reader::ScmlReader;
pub use self::xml::XmlElement;
