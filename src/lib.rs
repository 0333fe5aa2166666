#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `kanim-rs` reads animated sprite containers into one canonical model.
//!
//! Two inputs are supported: the binary kanim container (build stream, anim stream
//! and texture atlas) and Spriter SCML projects. See [`kanim_types`] for the model
//! and decoders.
//!
pub use kanim_types::*;
