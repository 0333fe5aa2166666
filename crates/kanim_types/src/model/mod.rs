//! Canonical in-memory animation model shared by every decoder.
//!
//! A decode produces a [`Build`] (symbols and frames of the sprite sheet) and an
//! [`Anim`] (banks of keyframes), each paired with the [`Hashes`] table that resolves
//! its name hashes. Build symbols resolve against the build table; anim element
//! images and layers resolve against the anim table.

mod anim;
mod build;
mod hashes;
mod sprite;

pub use anim::{Anim, AnimBank, AnimFrame, Element};
pub use build::{Build, BuildTable, BuildTableRow, Frame, Symbol};
pub use hashes::Hashes;
pub use sprite::Sprite;
