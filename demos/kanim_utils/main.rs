//! Kanim CLI utility.
//!
//! Provides three subcommands:
//! - `info`: summarize a binary build/anim/atlas triple.
//! - `unpack`: split the atlas into per-frame PNGs and dump the decoded model as JSON.
//! - `scml`: decode a Spriter project, writing the packed atlas and the model as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example kanim_utils -- info hero_build.bytes hero_anim.bytes hero_0.png
//! cargo run --example kanim_utils -- unpack hero_build.bytes hero_anim.bytes hero_0.png -o hero/
//! cargo run --example kanim_utils -- scml hero/hero.scml -o packed/ --padded
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use kanim_rs::file::scml::ProjectConfig;
use kanim_rs::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(args) => run_info(args),
		Command::Unpack(args) => run_unpack(args),
		Command::Scml(args) => run_scml(args),
	}
}

#[derive(Parser)]
#[command(name = "kanim_utils")]
#[command(author = "kanim-rs project")]
#[command(version)]
#[command(about = "Inspect and unpack kanim containers and Spriter projects", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Summarize a binary container
	Info(ContainerArgs),
	/// Export sprites and JSON from a binary container
	Unpack(UnpackArgs),
	/// Decode a Spriter project
	Scml(ScmlArgs),
}

#[derive(Args)]
struct ContainerArgs {
	/// Build stream (`*_build.bytes`)
	#[arg(value_name = "BUILD")]
	build: PathBuf,

	/// Anim stream (`*_anim.bytes`)
	#[arg(value_name = "ANIM")]
	anim: PathBuf,

	/// Texture atlas PNG
	#[arg(value_name = "ATLAS")]
	atlas: PathBuf,

	/// List every symbol and bank
	#[arg(short, long, default_value_t = false)]
	verbose: bool,
}

#[derive(Args)]
struct UnpackArgs {
	#[command(flatten)]
	container: ContainerArgs,

	/// Output directory (defaults to the build file's stem)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,
}

#[derive(Args)]
struct ScmlArgs {
	/// Path to the `.scml` project; sprites are read from its directory
	#[arg(value_name = "PROJECT")]
	project: PathBuf,

	/// Output directory (defaults to `<project stem>_kanim`)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,

	/// Leave 2px between sprites in the packed atlas
	#[arg(long, default_value_t = false)]
	padded: bool,
}

fn open_container(args: &ContainerArgs) -> Result<(DecodedBuild, DecodedAnim)> {
	for path in [&args.build, &args.anim, &args.atlas] {
		if !path.is_file() {
			bail!("{} does not exist", path.display());
		}
	}

	let mut reader = KanimReader::open(&args.build, &args.anim, &args.atlas)
		.with_context(|| format!("opening {}", args.build.display()))?;
	let build = reader.produce_build().context("decoding build stream")?;
	let anim = reader.produce_anim().context("decoding anim stream")?;
	Ok((build, anim))
}

fn run_info(args: ContainerArgs) -> Result<()> {
	let (build, anim) = open_container(&args)?;
	print_summary(&build, &anim, args.verbose);
	Ok(())
}

fn run_unpack(args: UnpackArgs) -> Result<()> {
	let (build, anim) = open_container(&args.container)?;
	let output = args.output.unwrap_or_else(|| default_output(&args.container.build, ""));
	fs::create_dir_all(&output).with_context(|| format!("creating {}", output.display()))?;

	for sprite in &build.sprites {
		sprite.save_png(&output).with_context(|| format!("saving sprite {}", sprite.name))?;
	}
	write_json(&output, &build, &anim)?;

	print_summary(&build, &anim, false);
	println!("Unpacked {} sprites to {}", build.sprites.len(), output.display());
	Ok(())
}

fn run_scml(args: ScmlArgs) -> Result<()> {
	let config = if args.padded {
		ProjectConfig::padded()
	} else {
		ProjectConfig::default()
	};

	let mut reader = ScmlReader::open_with_config(&args.project, config)
		.with_context(|| format!("reading {}", args.project.display()))?;
	let build = reader.produce_build().context("packing sprites")?;
	let anim = reader.produce_anim().context("decoding animations")?;

	let output = args.output.unwrap_or_else(|| default_output(&args.project, "_kanim"));
	fs::create_dir_all(&output).with_context(|| format!("creating {}", output.display()))?;

	let atlas_path = output.join(format!("{}_0.png", build.build.name));
	build.atlas.save(&atlas_path).with_context(|| format!("saving {}", atlas_path.display()))?;
	write_json(&output, &build, &anim)?;

	print_summary(&build, &anim, false);
	println!("Atlas written to {}", atlas_path.display());
	Ok(())
}

fn default_output(input: &Path, suffix: &str) -> PathBuf {
	let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("kanim");
	input.with_file_name(format!("{stem}{suffix}"))
}

fn write_json(dir: &Path, build: &DecodedBuild, anim: &DecodedAnim) -> Result<()> {
	let build_json = json!({
		"build": build.build,
		"hashes": build.hashes,
		"table": build.table,
	});
	let anim_json = json!({
		"anim": anim.anim,
		"hashes": anim.hashes,
		"ids": anim.id_map,
	});

	for (name, value) in [("build.json", build_json), ("anim.json", anim_json)] {
		let path = dir.join(name);
		fs::write(&path, serde_json::to_string_pretty(&value)?)
			.with_context(|| format!("writing {}", path.display()))?;
	}
	Ok(())
}

fn print_summary(build: &DecodedBuild, anim: &DecodedAnim, verbose: bool) {
	println!("Build \"{}\" (version {})", build.build.name, build.build.version);
	println!("   Symbols: {}", build.build.symbol_count());
	println!("   Frames:  {}", build.build.frame_count());
	println!("   Atlas:   {}x{}", build.atlas.width(), build.atlas.height());
	if verbose {
		for symbol in &build.build.symbols {
			let name = build.hashes.name(symbol.hash).unwrap_or("?");
			println!("   - {name} ({} frames)", symbol.frame_count());
		}
	}

	println!("Anim (version {})", anim.anim.version);
	println!("   Banks:       {}", anim.anim.anim_count());
	println!("   Frames:      {}", anim.anim.total_frames());
	println!("   Elements:    {}", anim.anim.total_elements());
	println!("   Max visible: {}", anim.anim.max_visible_symbol_frames);
	println!("   Element ids: {}", anim.id_map.len());
	if verbose {
		for bank in &anim.anim.banks {
			println!("   - {} ({} frames at {} fps)", bank.name, bank.frames.len(), bank.rate);
		}
	}
}
