//! Kanim binary container support.
//!
//! A kanim container is two independent little-endian streams plus an atlas image.
//!
//! # Build stream
//!
//! ```text
//! Field               Type      Notes
//! ------------------  --------  ------------------------------------------
//! magic               [u8; 4]   "BILD"
//! version             i32
//! symbol_count        i32
//! frame_count         i32       total over all symbols
//! name                pstring
//! symbols             Symbol × symbol_count
//! hash_count          i32
//! hashes              (i32 hash, pstring name) × hash_count
//!
//! Symbol: hash i32, path i32 (version >= 10 only), color i32, flags i32,
//!         frame_count i32, Frame × frame_count
//! Frame:  source_frame_num i32, duration i32, build_image_index i32,
//!         pivot_x f32, pivot_y f32, pivot_width f32, pivot_height f32,
//!         x1 f32, y1 f32, x2 f32, y2 f32
//! ```
//!
//! # Anim stream
//!
//! ```text
//! Field               Type      Notes
//! ------------------  --------  ------------------------------------------
//! magic               [u8; 4]   "ANIM"
//! version             i32
//! element_count       i32       declared total, informational
//! frame_count         i32       declared total, informational
//! anim_count          i32
//! banks               Bank × anim_count
//! max_visible         i32       max elements in any single frame
//! hash_count          i32
//! hashes              (i32 hash, pstring name) × hash_count
//!
//! Bank:    name pstring, hash i32, rate f32, frame_count i32, Frame × frame_count
//! Frame:   x f32, y f32, width f32, height f32, element_count i32,
//!          Element × element_count
//! Element: image i32, index i32, layer i32, flags i32,
//!          a f32, b f32, g f32, r f32, m1..m6 f32, order f32
//! ```
//!
//! A `pstring` is a 7-bit variable-length byte count followed by UTF-8 text.
//!
//! # Examples
//!
//! ```no_run
//! use kanim_types::file::kanim::{decode_anim, decode_build};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (build, build_hashes) = decode_build(std::fs::File::open("build.bytes")?)?;
//! let (anim, anim_hashes) = decode_anim(std::fs::File::open("anim.bytes")?)?;
//! println!("{} frames, {} banks", build.frame_count(), anim.anim_count());
//! # let _ = (build_hashes, anim_hashes);
//! # Ok(())
//! # }
//! ```

mod anim;
mod build;
pub mod constants;
pub mod io;
mod reader;
mod texture;

pub use self::anim::decode_anim;
pub use self::build::decode_build;
pub use self::reader::KanimReader;
pub use self::texture::export_textures;
