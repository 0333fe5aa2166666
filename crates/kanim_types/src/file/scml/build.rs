//! Sprite pass: packs the project's sprites and derives the build from the atlas.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::file::{KanimError, ReferenceKind};
use crate::hash::NameHasher;
use crate::model::{Build, Frame, Hashes, Sprite, Symbol};
use crate::packer::{PackedAtlas, TexturePacker};

use super::config::ProjectConfig;
use super::naming::split_frame;
use super::project::ScmlProject;

/// Output of the sprite pass.
#[derive(Debug, Clone)]
pub struct ProjectBuild {
	/// Symbols and frames
	pub build: Build,
	/// Build hash table
	pub hashes: Hashes,
	/// Packed atlas and placements, placements sorted by name
	pub atlas: PackedAtlas,
	/// Every sprite loaded from the project directory
	pub sprites: Vec<Sprite>,
}

/// Loads every top-level `*.png` in `dir`, sorted by file name.
///
/// Sprites are named after the file stem.
pub fn load_sprites(dir: impl AsRef<Path>) -> Result<Vec<Sprite>, KanimError> {
	let mut paths = Vec::new();
	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("png")) {
			paths.push(path);
		}
	}
	paths.sort();

	let mut sprites = Vec::with_capacity(paths.len());
	for path in paths {
		let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
			log::warn!("Skipping sprite with non UTF-8 file name: {}", path.display());
			continue;
		};
		let image = image::open(&path)?.to_rgba8();
		sprites.push(Sprite::new(name, image));
	}
	Ok(sprites)
}

/// Loads the sprites in `sprite_dir` and runs [`pack_build`] over them.
pub fn decode_project(
	project: &ScmlProject,
	sprite_dir: impl AsRef<Path>,
	packer: &impl TexturePacker,
	hasher: &impl NameHasher,
	config: &ProjectConfig,
) -> Result<ProjectBuild, KanimError> {
	log::info!("Reading image files.");
	let sprites = load_sprites(sprite_dir)?;

	log::info!("Reading build info.");
	let (build, hashes, atlas) = pack_build(project, &sprites, packer, hasher, config)?;
	Ok(ProjectBuild {
		build,
		hashes,
		atlas,
		sprites,
	})
}

/// Packs `sprites` and builds one symbol per sprite base name.
///
/// Placements are sorted by name so frames of one symbol are adjacent. Sprites
/// that the project folder does not list are skipped with a warning and do not
/// count towards the build's symbols or frames.
pub fn pack_build(
	project: &ScmlProject,
	sprites: &[Sprite],
	packer: &impl TexturePacker,
	hasher: &impl NameHasher,
	config: &ProjectConfig,
) -> Result<(Build, Hashes, PackedAtlas), KanimError> {
	let mut atlas = packer.pack(sprites)?;
	atlas.placements.sort_by(|a, b| a.name.cmp(&b.name));

	let atlas_w = atlas.image.width() as f32;
	let atlas_h = atlas.image.height() as f32;

	let mut hash_cache: HashMap<String, i32> = HashMap::new();
	let mut symbols: Vec<(String, Symbol)> = Vec::new();

	for placement in &atlas.placements {
		let (base_name, index) = split_frame(&placement.name);

		if symbols.last().is_none_or(|(last, _)| last != base_name) {
			let hash = *hash_cache.entry(base_name.to_string()).or_insert_with(|| hasher.hash(base_name));
			symbols.push((base_name.to_string(), Symbol::new(hash, hash, 0, 0, Vec::new())));
		}

		let key = format!("{base_name}_{index}");
		let Some(file) = project.sprite(&key) else {
			log::warn!(
				"{}; the sprite \"{key}\" is not used in the project. Skipping.",
				KanimError::missing(ReferenceKind::SpritePivot, &key)
			);
			continue;
		};

		let pivot_width = placement.width as f32 * 2.0;
		let pivot_height = placement.height as f32 * 2.0;
		let frame = Frame {
			source_frame_num: index,
			duration: 1,
			build_image_index: 0,
			pivot_x: -(file.pivot_x - 0.5) * pivot_width,
			pivot_y: (file.pivot_y - 0.5) * pivot_height,
			pivot_width,
			pivot_height,
			x1: placement.x as f32 / atlas_w,
			y1: placement.y as f32 / atlas_h,
			x2: (placement.x + placement.width) as f32 / atlas_w,
			y2: (placement.y + placement.height) as f32 / atlas_h,
			time: 0,
		};

		if let Some((_, symbol)) = symbols.last_mut() {
			symbol.push_frame(frame);
		}
	}

	let mut hashes = Hashes::new();
	let mut kept = Vec::with_capacity(symbols.len());
	for (name, symbol) in symbols {
		if symbol.frame_count() == 0 {
			log::debug!("dropping symbol \"{name}\": none of its frames are used");
			continue;
		}
		hashes.insert(symbol.hash, name);
		kept.push(symbol);
	}

	let build = Build::new(config.build_version, project.entity_name()?, kept);
	log::info!("build \"{}\": {} symbols, {} frames", build.name, build.symbol_count(), build.frame_count());

	Ok((build, hashes, atlas))
}
