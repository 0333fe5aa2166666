//! Animation pass: resolves mainline keys against timelines into anim banks.

use std::collections::HashMap;

use crate::file::{KanimError, ProjectFormatError, ReferenceKind};
use crate::hash::NameHasher;
use crate::model::{Anim, AnimBank, AnimFrame, Element, Hashes};

use super::config::ProjectConfig;
use super::geometry::{BoundingBox, KeyValue, Transform, interpolate};
use super::project::{ScmlProject, SpriteFile};
use super::xml::XmlElement;

const MS_PER_SECOND: f32 = 1000.0;

/// Decodes every `<animation>` of the project entity.
///
/// Animation names and referenced sprite base names are added to `hashes`.
/// Interval problems do not stop the pass; once every bank has been read, all
/// inconsistent banks are reported together and no output is returned.
pub fn decode_animations(
	project: &ScmlProject,
	hashes: &mut Hashes,
	hasher: &impl NameHasher,
	config: &ProjectConfig,
) -> Result<Anim, KanimError> {
	let entity = project.entity()?;

	let mut animations = Vec::new();
	for child in entity.children() {
		match child.name() {
			"animation" => animations.push(child),
			"obj_info" | "bone" => log::info!(
				"{}",
				KanimError::UnsupportedFeature {
					feature: "bones",
					context: format!("<{}> of entity \"{}\"", child.name(), entity.attr("name").unwrap_or_default()),
				}
			),
			other => {
				return Err(ProjectFormatError::UnexpectedElement {
					parent: entity.name().to_string(),
					expected: "animation".to_string(),
					found: other.to_string(),
				}
				.into());
			}
		}
	}

	let mut names = Vec::with_capacity(animations.len());
	for animation in &animations {
		let name = animation.require_attr("name")?;
		let hash = hasher.hash(name);
		hashes.insert(hash, name);
		names.push((name, hash));
	}

	let mut inconsistent: Vec<String> = Vec::new();
	let mut banks = Vec::with_capacity(animations.len());
	let mut max_visible = 0;

	for (animation, (name, hash)) in animations.into_iter().zip(names) {
		let decoder = BankDecoder {
			project,
			hasher,
			name,
			timelines: index_timelines(animation)?,
		};
		let mainline = animation.child("mainline").ok_or_else(|| ProjectFormatError::MissingElement {
			parent: format!("animation name=\"{name}\""),
			child: "mainline".to_string(),
		})?;

		let mut interval: Option<i32> = None;
		let mut last_time: Option<i32> = None;
		let mut frames = Vec::new();

		for (number, key) in mainline.children().iter().enumerate() {
			if key.name() != "key" {
				return Err(ProjectFormatError::UnexpectedElement {
					parent: mainline.name().to_string(),
					expected: "key".to_string(),
					found: key.name().to_string(),
				}
				.into());
			}
			let time = key.attr_or("time", 0)?;

			if let Some(last) = last_time {
				let delta = time - last;
				let expected = *interval.get_or_insert(delta);
				if delta <= 0 || delta != expected {
					log::warn!(
						"While parsing animation \"{name}\", found inconsistent interval at keyframe {}: it is {delta} ms from the last frame, when {expected} ms was expected.",
						number + 1
					);
					if !inconsistent.iter().any(|bank| bank == name) {
						inconsistent.push(name.to_string());
					}
				}
			}
			last_time = Some(time);

			let refs = key.children().iter().filter(|c| c.name() == "object_ref").count();
			max_visible = max_visible.max(refs);
			frames.push(decoder.frame(key, time, hashes)?);
		}

		let rate = match interval {
			Some(interval) if interval > 0 => MS_PER_SECOND / interval as f32,
			_ => config.fallback_rate,
		};
		log::debug!("bank \"{name}\": {} frames at {rate} fps", frames.len());

		banks.push(AnimBank {
			name: name.to_string(),
			hash,
			rate,
			frames,
		});
	}

	if !inconsistent.is_empty() {
		return Err(ProjectFormatError::InconsistentIntervals {
			banks: inconsistent,
		}
		.into());
	}

	let mut anim = Anim {
		version: config.anim_version,
		element_count: 0,
		frame_count: 0,
		max_visible_symbol_frames: max_visible as i32,
		banks,
	};
	anim.frame_count = anim.total_frames() as i32;
	anim.element_count = anim.total_elements() as i32;
	log::info!(
		"anim: {} banks, {} frames, {} elements",
		anim.anim_count(),
		anim.frame_count,
		anim.element_count
	);
	Ok(anim)
}

fn index_timelines(animation: &XmlElement) -> Result<HashMap<i32, &XmlElement>, ProjectFormatError> {
	let mut timelines = HashMap::new();
	for timeline in animation.children().iter().filter(|c| c.name() == "timeline") {
		timelines.insert(timeline.require_parsed("id")?, timeline);
	}
	Ok(timelines)
}

struct BankDecoder<'a, H> {
	project: &'a ScmlProject,
	hasher: &'a H,
	name: &'a str,
	timelines: HashMap<i32, &'a XmlElement>,
}

/// A timeline key resolved for one `object_ref`.
struct ResolvedKey<'a> {
	key: &'a XmlElement,
	object: &'a XmlElement,
	next: Option<&'a XmlElement>,
	sprite: &'a SpriteFile,
}

impl<'a, H: NameHasher> BankDecoder<'a, H> {
	fn frame(&self, key: &XmlElement, time: i32, hashes: &mut Hashes) -> Result<AnimFrame, KanimError> {
		let mut placed: Vec<(i32, Element)> = Vec::new();
		let mut bbox = BoundingBox::default();

		for object_ref in key.children() {
			match object_ref.name() {
				"object_ref" => {}
				"bone_ref" => {
					log::debug!(
						"{}",
						KanimError::UnsupportedFeature {
							feature: "bone_ref",
							context: format!("animation \"{}\"", self.name),
						}
					);
					continue;
				}
				other => {
					return Err(ProjectFormatError::UnexpectedElement {
						parent: key.name().to_string(),
						expected: "object_ref".to_string(),
						found: other.to_string(),
					}
					.into());
				}
			}

			let z_index: i32 = object_ref.require_parsed("z_index")?;
			let Some(resolved) = self.resolve(object_ref)? else {
				continue;
			};

			let transform = Transform {
				scale_x: self.sample(&resolved, time, "scale_x", 1.0)?,
				scale_y: self.sample(&resolved, time, "scale_y", 1.0)?,
				angle: self.sample(&resolved, time, "angle", 0.0)?,
				x: self.sample(&resolved, time, "x", 0.0)?,
				y: self.sample(&resolved, time, "y", 0.0)?,
			};

			let sprite = resolved.sprite;
			let image = self.hasher.hash(&sprite.base_name);
			hashes.insert(image, sprite.base_name.as_str());

			let [m1, m2, m3, m4, m5, m6] = transform.matrix();
			for corner in transform.corners(sprite.width, sprite.height, sprite.pivot_x, sprite.pivot_y) {
				bbox.add(corner);
			}

			placed.push((
				z_index,
				Element {
					image,
					index: sprite.index,
					layer: image,
					m1,
					m2,
					m3,
					m4,
					m5,
					m6,
					..Element::default()
				},
			));
		}

		// stable: equal z-indices keep document order
		placed.sort_by(|a, b| b.0.cmp(&a.0));

		let (x, y, width, height) = bbox.center_and_size();
		Ok(AnimFrame {
			x,
			y,
			width,
			height,
			elements: placed.into_iter().map(|(_, element)| element).collect(),
		})
	}

	/// Finds the timeline key, its object and sprite; `None` when the element is skipped.
	fn resolve(&self, object_ref: &XmlElement) -> Result<Option<ResolvedKey<'a>>, KanimError> {
		let timeline_id: i32 = object_ref.require_parsed("timeline")?;
		let key_id: i32 = object_ref.require_parsed("key")?;

		let Some(timeline) = self.timelines.get(&timeline_id).copied() else {
			self.skip(ReferenceKind::Timeline, timeline_id);
			return Ok(None);
		};

		let mut keys = timeline.children().iter().filter(|child| child.name() == "key");
		let mut found = None;
		for key in keys.by_ref() {
			if key.parse_attr::<i32>("id")? == Some(key_id) {
				found = Some(key);
				break;
			}
		}
		let Some(key) = found else {
			log::warn!(
				"Could not find frame {key_id} in timeline {timeline_id} of anim \"{}\"!",
				self.name
			);
			return Ok(None);
		};
		let next = keys.next();

		let Some(object) = key.child("object") else {
			self.skip(ReferenceKind::ObjectFile, format!("timeline {timeline_id} key {key_id}"));
			return Ok(None);
		};
		let Some(file_id) = object.attr("file") else {
			log::warn!(
				"Sprite \"{}\" in animation \"{}\" does not have a file associated with it. Skipping.",
				timeline.attr("name").unwrap_or_default(),
				self.name
			);
			return Ok(None);
		};
		let Some(sprite) = self.project.file_by_id(file_id) else {
			self.skip(ReferenceKind::FileId, file_id);
			return Ok(None);
		};

		Ok(Some(ResolvedKey {
			key,
			object,
			next,
			sprite,
		}))
	}

	fn sample(&self, resolved: &ResolvedKey<'_>, time: i32, attribute: &str, default: f32) -> Result<f32, KanimError> {
		let key_time = resolved.key.attr_or("time", 0)?;
		if key_time == time {
			if let Some(value) = resolved.object.parse_attr(attribute)? {
				return Ok(value);
			}
		}

		let prev = key_value(resolved.key, attribute, default)?;
		let next = resolved.next.map(|next| key_value(next, attribute, default)).transpose()?.flatten();
		Ok(interpolate(prev, next, time, default))
	}

	fn skip(&self, kind: ReferenceKind, id: impl std::fmt::Display) {
		log::warn!("{} in animation \"{}\". Skipping.", KanimError::missing(kind, id), self.name);
	}
}

/// Reads `attribute` from a timeline key's `<object>`, defaulting when absent.
fn key_value(key: &XmlElement, attribute: &str, default: f32) -> Result<Option<KeyValue>, KanimError> {
	let Some(object) = key.child("object") else {
		return Ok(None);
	};
	Ok(Some(KeyValue {
		time: key.attr_or("time", 0)?,
		value: object.attr_or(attribute, default)?,
	}))
}
