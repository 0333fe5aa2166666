//! [`AnimationSource`] over an SCML project and its sprite directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::file::KanimError;
use crate::hash::{KleiHash, NameHasher};
use crate::id_map::build_id_map;
use crate::model::{BuildTable, Hashes};
use crate::packer::{ShelfPacker, TexturePacker};
use crate::source::{AnimationSource, DecodedAnim, DecodedBuild};

use super::anim::decode_animations;
use super::build::decode_project;
use super::config::ProjectConfig;
use super::project::ScmlProject;

/// Reads an SCML project.
///
/// Sprites are loaded from `sprite_dir` (the project file's directory when opened
/// from disk) and packed with `P`; names are hashed with `H`.
pub struct ScmlReader<P = ShelfPacker, H = KleiHash> {
	project: ScmlProject,
	sprite_dir: PathBuf,
	packer: P,
	hasher: H,
	config: ProjectConfig,
}

impl ScmlReader {
	/// Opens the project at `path` with the default configuration.
	///
	/// # Examples
	///
	/// ```no_run
	/// use kanim_types::prelude::*;
	///
	/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
	/// let mut reader = ScmlReader::open("hero/hero.scml")?;
	/// let build = reader.produce_build()?;
	/// let anim = reader.produce_anim()?;
	/// println!("{} symbols, {} banks", build.build.symbol_count(), anim.anim.anim_count());
	/// # Ok(())
	/// # }
	/// ```
	pub fn open(path: impl AsRef<Path>) -> Result<Self, KanimError> {
		Self::open_with_config(path, ProjectConfig::default())
	}

	/// Opens the project at `path`, packing with the configured padding.
	pub fn open_with_config(path: impl AsRef<Path>, config: ProjectConfig) -> Result<Self, KanimError> {
		let path = path.as_ref();
		let project = ScmlProject::parse(&fs::read_to_string(path)?)?;
		let sprite_dir = match path.parent() {
			Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
			_ => PathBuf::from("."),
		};
		Ok(Self::from_parts(project, sprite_dir, ShelfPacker::new(config.packer_padding), KleiHash, config))
	}
}

impl<P: TexturePacker, H: NameHasher> ScmlReader<P, H> {
	/// Assembles a reader from an already parsed project.
	pub fn from_parts(
		project: ScmlProject,
		sprite_dir: impl Into<PathBuf>,
		packer: P,
		hasher: H,
		config: ProjectConfig,
	) -> Self {
		Self {
			project,
			sprite_dir: sprite_dir.into(),
			packer,
			hasher,
			config,
		}
	}

	/// The parsed project.
	pub fn project(&self) -> &ScmlProject {
		&self.project
	}

	/// Directory sprites are loaded from.
	pub fn sprite_dir(&self) -> &Path {
		&self.sprite_dir
	}
}

impl<P: TexturePacker, H: NameHasher> AnimationSource for ScmlReader<P, H> {
	fn produce_build(&mut self) -> Result<DecodedBuild, KanimError> {
		let decoded = decode_project(&self.project, &self.sprite_dir, &self.packer, &self.hasher, &self.config)?;
		let atlas = decoded.atlas.image;
		let table = BuildTable::new(&decoded.build, &decoded.hashes, atlas.width(), atlas.height())?;

		Ok(DecodedBuild {
			build: decoded.build,
			hashes: decoded.hashes,
			table,
			atlas,
			sprites: decoded.sprites,
		})
	}

	fn produce_anim(&mut self) -> Result<DecodedAnim, KanimError> {
		log::info!("Reading animation info.");
		let mut hashes = Hashes::new();
		let anim = decode_animations(&self.project, &mut hashes, &self.hasher, &self.config)?;
		let id_map = build_id_map(&anim, &hashes)?;
		Ok(DecodedAnim {
			anim,
			hashes,
			id_map,
		})
	}
}
