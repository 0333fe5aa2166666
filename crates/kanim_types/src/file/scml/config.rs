//! Settings for turning an SCML project into a kanim model.

use crate::file::kanim::constants::{DEFAULT_ANIM_VERSION, DEFAULT_BUILD_VERSION};

/// Configuration for SCML project decoding.
///
/// # Presets
///
/// - `default()`: build v10, anim v5, tightly packed atlas, 30 fps fallback
/// - `padded()`: as default, with 2px between packed sprites
///
/// # Examples
///
/// ```
/// use kanim_types::file::scml::ProjectConfig;
///
/// let config = ProjectConfig::default();
/// assert_eq!(config.build_version, 10);
///
/// let config = ProjectConfig::padded();
/// assert_eq!(config.packer_padding, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectConfig {
	/// Version stamped on the decoded build
	pub build_version: i32,
	/// Version stamped on the decoded anim
	pub anim_version: i32,
	/// Pixels between sprites in the packed atlas
	pub packer_padding: u32,
	/// Rate used for banks with fewer than two mainline keys
	pub fallback_rate: f32,
}

impl Default for ProjectConfig {
	fn default() -> Self {
		Self {
			build_version: DEFAULT_BUILD_VERSION,
			anim_version: DEFAULT_ANIM_VERSION,
			packer_padding: 0,
			fallback_rate: 30.0,
		}
	}
}

impl ProjectConfig {
	/// Create a configuration with explicit values.
	pub fn new(build_version: i32, anim_version: i32, packer_padding: u32, fallback_rate: f32) -> Self {
		Self {
			build_version,
			anim_version,
			packer_padding,
			fallback_rate,
		}
	}

	/// Default configuration with 2px atlas padding.
	pub fn padded() -> Self {
		Self {
			packer_padding: 2,
			..Self::default()
		}
	}
}
