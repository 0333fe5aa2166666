//! Minimal owned XML element tree.
//!
//! The decoder needs random access (timelines by id, keys by position), so the
//! document is read once with `quick_xml` into a small tree of elements. Text
//! content is not kept.

use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::file::ProjectFormatError;

/// An element with its attributes and child elements, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
	name: String,
	attributes: Vec<(String, String)>,
	children: Vec<XmlElement>,
}

impl XmlElement {
	/// Parses a document and returns its root element.
	pub fn parse(text: &str) -> Result<Self, ProjectFormatError> {
		let mut reader = Reader::from_str(text);
		reader.config_mut().trim_text(true);

		let mut stack: Vec<XmlElement> = Vec::new();
		let mut root = None;

		loop {
			match reader.read_event()? {
				Event::Start(start) => stack.push(Self::from_start(&start)?),
				Event::Empty(start) => {
					let element = Self::from_start(&start)?;
					Self::attach(&mut stack, &mut root, element)?;
				}
				Event::End(_) => {
					if let Some(element) = stack.pop() {
						Self::attach(&mut stack, &mut root, element)?;
					}
				}
				Event::Eof => break,
				_ => {}
			}
		}

		match (root, stack.pop()) {
			(Some(root), None) => Ok(root),
			(_, Some(open)) => Err(ProjectFormatError::MissingElement {
				parent: open.name,
				child: "closing tag".to_string(),
			}),
			(None, None) => Err(ProjectFormatError::MissingElement {
				parent: "document".to_string(),
				child: "root element".to_string(),
			}),
		}
	}

	fn from_start(start: &BytesStart<'_>) -> Result<Self, ProjectFormatError> {
		let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
		let mut attributes = Vec::new();
		for attr in start.attributes() {
			let attr = attr.map_err(quick_xml::Error::from)?;
			let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
			let value = attr.unescape_value()?.into_owned();
			attributes.push((key, value));
		}
		Ok(Self {
			name,
			attributes,
			children: Vec::new(),
		})
	}

	fn attach(
		stack: &mut [XmlElement],
		root: &mut Option<XmlElement>,
		element: XmlElement,
	) -> Result<(), ProjectFormatError> {
		match (stack.last_mut(), root.as_ref()) {
			(Some(parent), _) => parent.children.push(element),
			(None, Some(first)) => {
				return Err(ProjectFormatError::UnexpectedElement {
					parent: "document".to_string(),
					expected: first.name.clone(),
					found: element.name,
				});
			}
			(None, None) => *root = Some(element),
		}
		Ok(())
	}

	/// Tag name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Child elements in document order.
	pub fn children(&self) -> &[XmlElement] {
		&self.children
	}

	/// First direct child with the given tag.
	pub fn child(&self, name: &str) -> Option<&XmlElement> {
		self.children.iter().find(|c| c.name == name)
	}

	/// First element with the given tag in document order, including `self`.
	pub fn descendant(&self, name: &str) -> Option<&XmlElement> {
		if self.name == name {
			return Some(self);
		}
		self.children.iter().find_map(|c| c.descendant(name))
	}

	/// Raw attribute value.
	pub fn attr(&self, name: &str) -> Option<&str> {
		self.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
	}

	/// Raw attribute value, or [`ProjectFormatError::MissingAttribute`].
	pub fn require_attr(&self, name: &str) -> Result<&str, ProjectFormatError> {
		self.attr(name).ok_or_else(|| ProjectFormatError::MissingAttribute {
			element: self.name.clone(),
			attribute: name.to_string(),
		})
	}

	/// Parsed attribute value, `None` when absent.
	pub fn parse_attr<T: FromStr>(&self, name: &str) -> Result<Option<T>, ProjectFormatError> {
		self.attr(name)
			.map(|raw| {
				raw.trim().parse().map_err(|_| ProjectFormatError::InvalidAttribute {
					element: self.name.clone(),
					attribute: name.to_string(),
					value: raw.to_string(),
				})
			})
			.transpose()
	}

	/// Parsed attribute value, `default` when absent.
	pub fn attr_or<T: FromStr>(&self, name: &str, default: T) -> Result<T, ProjectFormatError> {
		Ok(self.parse_attr(name)?.unwrap_or(default))
	}

	/// Parsed attribute value that must be present.
	pub fn require_parsed<T: FromStr>(&self, name: &str) -> Result<T, ProjectFormatError> {
		self.parse_attr(name)?.ok_or_else(|| ProjectFormatError::MissingAttribute {
			element: self.name.clone(),
			attribute: name.to_string(),
		})
	}
}
