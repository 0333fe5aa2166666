//! Parsed SCML project: the document plus its sprite folder index.

use std::collections::HashMap;

use crate::file::{KanimError, ProjectFormatError};

use super::naming::{split_frame, without_extension};
use super::xml::XmlElement;

/// One `<file>` entry of the project's sprite folder.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFile {
	/// Project file id
	pub id: String,
	/// File name as listed, extension stripped
	pub name: String,
	/// Symbol base name
	pub base_name: String,
	/// Frame index within the symbol
	pub index: i32,
	/// Pivot x as a fraction of the width
	pub pivot_x: f32,
	/// Pivot y as a fraction of the height
	pub pivot_y: f32,
	/// Width in pixels
	pub width: f32,
	/// Height in pixels
	pub height: f32,
}

impl SpriteFile {
	fn from_element(element: &XmlElement) -> Result<Self, ProjectFormatError> {
		let name = without_extension(element.require_attr("name")?).to_string();
		let (base_name, index) = split_frame(&name);
		Ok(Self {
			id: element.require_attr("id")?.to_string(),
			base_name: base_name.to_string(),
			index,
			pivot_x: element.attr_or("pivot_x", 0.0)?,
			pivot_y: element.attr_or("pivot_y", 1.0)?,
			width: element.attr_or("width", 0.0)?,
			height: element.attr_or("height", 0.0)?,
			name,
		})
	}
}

/// An SCML document with lookup tables over its first sprite folder.
///
/// # Examples
///
/// ```
/// use kanim_types::file::scml::ScmlProject;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let project = ScmlProject::parse(
///     r#"<spriter_data>
///         <folder id="0"><file id="0" name="head_0.png" width="8" height="8"/></folder>
///         <entity name="hero"/>
///     </spriter_data>"#,
/// )?;
/// assert_eq!(project.entity_name()?, "hero");
/// assert_eq!(project.sprite("head_0").map(|f| f.index), Some(0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScmlProject {
	document: XmlElement,
	files: Vec<SpriteFile>,
	by_name: HashMap<String, usize>,
	by_id: HashMap<String, usize>,
}

impl ScmlProject {
	/// Parses an SCML document.
	///
	/// # Errors
	///
	/// Returns [`KanimError::ProjectFormat`] for malformed XML, a missing `<folder>`,
	/// or `<file>` entries without `id`/`name`.
	pub fn parse(text: &str) -> Result<Self, KanimError> {
		let document = XmlElement::parse(text)?;
		let folder = document.descendant("folder").ok_or_else(|| ProjectFormatError::MissingElement {
			parent: document.name().to_string(),
			child: "folder".to_string(),
		})?;

		let mut files = Vec::new();
		let mut by_name = HashMap::new();
		let mut by_id = HashMap::new();
		for element in folder.children().iter().filter(|c| c.name() == "file") {
			let file = SpriteFile::from_element(element)?;
			by_name.insert(file.name.clone(), files.len());
			by_id.insert(file.id.clone(), files.len());
			files.push(file);
		}
		log::debug!("project folder lists {} sprite files", files.len());

		Ok(Self {
			document,
			files,
			by_name,
			by_id,
		})
	}

	/// Root element.
	pub fn document(&self) -> &XmlElement {
		&self.document
	}

	/// The `<entity>` element.
	pub fn entity(&self) -> Result<&XmlElement, ProjectFormatError> {
		self.document.descendant("entity").ok_or_else(|| ProjectFormatError::MissingElement {
			parent: self.document.name().to_string(),
			child: "entity".to_string(),
		})
	}

	/// The entity's `name` attribute.
	pub fn entity_name(&self) -> Result<&str, ProjectFormatError> {
		self.entity()?.require_attr("name")
	}

	/// Every listed sprite file, in document order.
	pub fn files(&self) -> &[SpriteFile] {
		&self.files
	}

	/// Sprite file by extension-less name, e.g. `"walk_3"`.
	pub fn sprite(&self, name: &str) -> Option<&SpriteFile> {
		self.by_name.get(name).map(|&i| &self.files[i])
	}

	/// Sprite file by project file id.
	pub fn file_by_id(&self, id: &str) -> Option<&SpriteFile> {
		self.by_id.get(id).map(|&i| &self.files[i])
	}
}
