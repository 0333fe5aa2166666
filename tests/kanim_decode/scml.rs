//! SCML project tests

use std::path::Path;

use image::{Rgba, RgbaImage};
use kanim_rs::file::kanim::export_textures;
use kanim_rs::file::scml::{ProjectConfig, load_sprites};
use kanim_rs::prelude::*;

const PROJECT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<spriter_data scml_version="1.0" generator="BrashMonkey Spriter">
	<folder id="0">
		<file id="0" name="body_0.png" width="4" height="2" pivot_x="0" pivot_y="1"/>
		<file id="1" name="arm_0.png" width="2" height="2" pivot_x="0.5" pivot_y="0.5"/>
		<file id="2" name="arm_1.png" width="2" height="2" pivot_x="0.5" pivot_y="0.5"/>
	</folder>
	<entity id="0" name="hero">
		<obj_info name="spine" type="bone" w="10"/>
		<animation id="0" name="idle" length="300" interval="100">
			<mainline>
				<key id="0">
					<object_ref id="0" timeline="0" key="0" z_index="0"/>
					<object_ref id="1" timeline="1" key="0" z_index="1"/>
				</key>
				<key id="1" time="100">
					<object_ref id="0" timeline="0" key="0" z_index="0"/>
					<object_ref id="1" timeline="1" key="1" z_index="1"/>
				</key>
				<key id="2" time="200">
					<object_ref id="0" timeline="0" key="0" z_index="0"/>
					<object_ref id="1" timeline="1" key="1" z_index="1"/>
				</key>
			</mainline>
			<timeline id="0" name="body">
				<key id="0" spin="0"><object folder="0" file="0"/></key>
			</timeline>
			<timeline id="1" name="arm">
				<key id="0"><object folder="0" file="1" x="2" y="-1"/></key>
				<key id="1" time="100"><object folder="0" file="2" x="2" y="-1" angle="90"/></key>
			</timeline>
		</animation>
	</entity>
</spriter_data>
"#;

fn solid(width: u32, height: u32, value: u8) -> RgbaImage {
	RgbaImage::from_pixel(width, height, Rgba([value, value, 0, 255]))
}

fn write_project(dir: &Path) {
	std::fs::write(dir.join("hero.scml"), PROJECT).unwrap();
	solid(4, 2, 10).save(dir.join("body_0.png")).unwrap();
	solid(2, 2, 20).save(dir.join("arm_0.png")).unwrap();
	solid(2, 2, 30).save(dir.join("arm_1.png")).unwrap();
	// present on disk, never referenced by the project
	solid(1, 1, 40).save(dir.join("walk_3.png")).unwrap();
	std::fs::write(dir.join("notes.txt"), "not a sprite").unwrap();
}

#[test]
fn test_load_sprites_reads_pngs_in_name_order() {
	let dir = tempfile::tempdir().unwrap();
	write_project(dir.path());

	let sprites = load_sprites(dir.path()).unwrap();
	let names: Vec<_> = sprites.iter().map(|s| s.name.as_str()).collect();
	assert_eq!(names, vec!["arm_0", "arm_1", "body_0", "walk_3"]);
	assert_eq!(sprites[2].image.dimensions(), (4, 2));
}

#[test]
fn test_load_sprites_reports_unreadable_sprites() {
	let dir = tempfile::tempdir().unwrap();
	assert!(matches!(load_sprites(dir.path().join("missing")), Err(KanimError::Io(_))));

	std::fs::write(dir.path().join("broken_0.png"), b"not a png").unwrap();
	assert!(load_sprites(dir.path()).is_err());
}

#[test_log::test]
fn test_project_build_skips_unreferenced_sprites() {
	let dir = tempfile::tempdir().unwrap();
	write_project(dir.path());

	let mut reader = ScmlReader::open(dir.path().join("hero.scml")).unwrap();
	let decoded = reader.produce_build().unwrap();

	assert_eq!(decoded.build.name, "hero");
	assert_eq!(decoded.build.version, 10);
	assert_eq!(decoded.build.symbol_count(), 2);
	assert_eq!(decoded.build.frame_count(), 3);
	assert_eq!(decoded.sprites.len(), 4);
	assert_eq!(decoded.hashes.name(klei_hash("arm")), Some("arm"));
	assert_eq!(decoded.hashes.name(klei_hash("walk")), None);

	let body = &decoded.build.symbols[1];
	assert_eq!(body.hash, klei_hash("body"));
	let frame = body.frames()[0];
	assert_eq!((frame.pivot_width, frame.pivot_height), (8.0, 4.0));
	assert_eq!((frame.pivot_x, frame.pivot_y), (4.0, 2.0));
}

#[test]
fn test_project_build_table_crops_back_to_sources() {
	let dir = tempfile::tempdir().unwrap();
	write_project(dir.path());

	let mut reader = ScmlReader::open(dir.path().join("hero.scml")).unwrap();
	let decoded = reader.produce_build().unwrap();
	let exported = export_textures(&decoded.atlas, &decoded.table).unwrap();

	assert_eq!(exported.len(), 3);
	for sprite in &exported {
		let source = decoded.sprites.iter().find(|s| s.name == sprite.name).unwrap();
		assert_eq!(sprite.image, source.image, "{}", sprite.name);
	}
}

#[test_log::test]
fn test_project_anim_resolves_keyframes() {
	let dir = tempfile::tempdir().unwrap();
	write_project(dir.path());

	let mut reader = ScmlReader::open_with_config(dir.path().join("hero.scml"), ProjectConfig::padded()).unwrap();
	let decoded = reader.produce_anim().unwrap();
	let anim = &decoded.anim;

	assert_eq!(anim.version, 5);
	assert_eq!(anim.anim_count(), 1);
	assert_eq!(anim.frame_count, 3);
	assert_eq!(anim.element_count, 6);
	assert_eq!(anim.max_visible_symbol_frames, 2);

	let bank = &anim.banks[0];
	assert_eq!(bank.hash, klei_hash("idle"));
	assert_eq!(bank.rate, 10.0);

	// arm (z 1) paints before body (z 0)
	let first = &bank.frames[0].elements;
	assert_eq!(first[0].image, klei_hash("arm"));
	assert_eq!(first[1].image, klei_hash("body"));
	assert_eq!((first[0].m5, first[0].m6), (4.0, 2.0));

	let turned = &bank.frames[1].elements[0];
	assert_eq!(turned.index, 1);
	assert!(turned.m1.abs() < 1e-5 && (turned.m3 - 1.0).abs() < 1e-5);

	// no key after t=100: the last arm pose holds
	let held = &bank.frames[2].elements[0];
	assert_eq!(held.index, 1);
	assert!(held.m1.abs() < 1e-5 && (held.m3 - 1.0).abs() < 1e-5);
	assert_eq!((held.m5, held.m6), (4.0, 2.0));

	assert_eq!(decoded.hashes.name(klei_hash("idle")), Some("idle"));
	assert_eq!(decoded.id_map.len(), 3);
	assert_eq!(decoded.id_map.get(&AnimIdMap::key("arm", 0, "arm")), Some(0));
	assert_eq!(decoded.id_map.get(&AnimIdMap::key("body", 0, "body")), Some(1));
	assert_eq!(decoded.id_map.get(&AnimIdMap::key("arm", 1, "arm")), Some(2));
}

#[test]
fn test_inconsistent_project_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	write_project(dir.path());
	let broken = PROJECT.replace(r#"<key id="2" time="200">"#, r#"<key id="2" time="250">"#);
	std::fs::write(dir.path().join("hero.scml"), broken).unwrap();

	let mut reader = ScmlReader::open(dir.path().join("hero.scml")).unwrap();
	let err = reader.produce_anim().unwrap_err();
	assert!(
		matches!(
			&err,
			KanimError::ProjectFormat(ProjectFormatError::InconsistentIntervals {
				banks,
			}) if banks == &["idle".to_string()]
		),
		"{err}"
	);
}
