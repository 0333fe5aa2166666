//! Input format support for `kanim-rs`.
//!
//! - [`kanim`]: the binary build/anim container and its atlas
//! - [`scml`]: Spriter projects with per-frame PNG sprites

mod error;

pub mod kanim;
pub mod scml;

// Re-export unified error type
pub use error::{FileType, KanimError, ProjectFormatError, ReferenceKind};
