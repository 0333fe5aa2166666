//! Error types for container and project decoding.

use std::fmt;

use thiserror::Error;

/// Identifies which input a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// Binary build stream (`BILD`)
	Build,
	/// Binary anim stream (`ANIM`)
	Anim,
	/// SCML project document
	Project,
	/// Texture atlas image
	Atlas,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FileType::Build => write!(f, "build"),
			FileType::Anim => write!(f, "anim"),
			FileType::Project => write!(f, "project"),
			FileType::Atlas => write!(f, "atlas"),
		}
	}
}

/// Kind of cross-table reference that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
	/// `Symbol.hash` missing from the build hash table
	SymbolHash,
	/// `Element.image` missing from the anim hash table
	ImageHash,
	/// `Element.layer` missing from the anim hash table
	LayerHash,
	/// `object_ref` names a timeline id that does not exist
	Timeline,
	/// `object_ref` names a key id absent from its timeline
	TimelineKey,
	/// timeline `<object>` has no `file` attribute
	ObjectFile,
	/// `file` id not listed in the project folder
	FileId,
	/// packed sprite has no matching `<file>` entry to take its pivot from
	SpritePivot,
}

impl fmt::Display for ReferenceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			ReferenceKind::SymbolHash => "symbol hash",
			ReferenceKind::ImageHash => "image hash",
			ReferenceKind::LayerHash => "layer hash",
			ReferenceKind::Timeline => "timeline",
			ReferenceKind::TimelineKey => "timeline key",
			ReferenceKind::ObjectFile => "object file",
			ReferenceKind::FileId => "file id",
			ReferenceKind::SpritePivot => "sprite pivot",
		};
		f.write_str(name)
	}
}

/// Structural problems found in an SCML project document.
#[derive(Debug, Error)]
pub enum ProjectFormatError {
	/// A child element has an unexpected tag
	#[error("all children of <{parent}> must be <{expected}>, found <{found}>")]
	UnexpectedElement {
		/// Parent element tag
		parent: String,
		/// Tag that was expected
		expected: String,
		/// Tag that was found
		found: String,
	},

	/// A required child element is absent
	#[error("can't find <{child}> child of <{parent}>")]
	MissingElement {
		/// Parent element tag (or `document` for the root)
		parent: String,
		/// Missing child tag
		child: String,
	},

	/// A required attribute is absent
	#[error("<{element}> is missing required attribute \"{attribute}\"")]
	MissingAttribute {
		/// Element tag
		element: String,
		/// Attribute name
		attribute: String,
	},

	/// An attribute value could not be parsed
	#[error("<{element}> attribute \"{attribute}\" has invalid value \"{value}\"")]
	InvalidAttribute {
		/// Element tag
		element: String,
		/// Attribute name
		attribute: String,
		/// Raw attribute value
		value: String,
	},

	/// One or more banks have non-uniform keyframe intervals
	#[error("the intervals in the animations {} were inconsistent", quote_list(.banks))]
	InconsistentIntervals {
		/// Offending bank names, deduplicated, in first-seen order
		banks: Vec<String>,
	},

	/// Malformed XML
	#[error(transparent)]
	Xml(#[from] quick_xml::Error),
}

fn quote_list(names: &[String]) -> String {
	names.iter().map(|n| format!("\"{n}\"")).collect::<Vec<_>>().join(", ")
}

/// Unified error type for all decoders in this crate.
#[derive(Debug, Error)]
pub enum KanimError {
	/// Stream magic did not match the expected container kind
	#[error("{file_type} header mismatch: expected \"{expected}\" but got \"{actual}\"")]
	HeaderMismatch {
		/// Stream being decoded
		file_type: FileType,
		/// Expected magic
		expected: String,
		/// Magic actually read
		actual: String,
	},

	/// SCML structural violation
	#[error("SCML format error: {0}")]
	ProjectFormat(#[from] ProjectFormatError),

	/// A hash or id did not resolve in its table
	#[error("missing {kind} reference: {id}")]
	MissingReference {
		/// What kind of reference failed
		kind: ReferenceKind,
		/// The unresolved value
		id: String,
	},

	/// Feature present in the input that the model does not carry
	#[error("unsupported feature {feature} in {context}; it will be dropped")]
	UnsupportedFeature {
		/// Feature name
		feature: &'static str,
		/// Where it was found
		context: String,
	},

	/// Declared aggregate count disagrees with the decoded records
	#[error("{file_type} {field} mismatch: header declares {declared}, decoded {actual}")]
	CountMismatch {
		/// Stream being decoded
		file_type: FileType,
		/// Aggregate name
		field: &'static str,
		/// Value declared in the stream
		declared: i32,
		/// Value derived from the records
		actual: usize,
	},

	/// Negative count or length field
	#[error("{file_type} {field} has invalid value {value}")]
	InvalidLength {
		/// Stream being decoded
		file_type: FileType,
		/// Field name
		field: &'static str,
		/// Raw value
		value: i64,
	},

	/// Variable-length integer ran past 32 bits
	#[error("variable-length integer at offset {offset} exceeds 32 bits")]
	VarintOverflow {
		/// Stream offset of the first byte
		offset: u64,
	},

	/// String payload was not valid UTF-8
	#[error("invalid UTF-8 string at offset {offset}")]
	InvalidString {
		/// Stream offset of the payload
		offset: u64,
		/// Underlying conversion error
		#[source]
		source: std::string::FromUtf8Error,
	},

	/// Sprite rectangle falls outside the atlas
	#[error(
		"sprite {name} at ({x}, {y}) size {width}x{height} lies outside the {atlas_width}x{atlas_height} atlas"
	)]
	CropOutOfBounds {
		/// Sprite name
		name: String,
		/// Left pixel
		x: i64,
		/// Top pixel
		y: i64,
		/// Width in pixels
		width: u32,
		/// Height in pixels
		height: u32,
		/// Atlas width
		atlas_width: u32,
		/// Atlas height
		atlas_height: u32,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Image decode/encode error
	#[error(transparent)]
	Image(#[from] image::ImageError),
}

impl KanimError {
	/// Shorthand for a [`KanimError::MissingReference`].
	pub fn missing(kind: ReferenceKind, id: impl fmt::Display) -> Self {
		KanimError::MissingReference {
			kind,
			id: id.to_string(),
		}
	}

	/// Shorthand for a [`KanimError::HeaderMismatch`].
	pub fn header_mismatch(file_type: FileType, expected: &str, actual: &[u8]) -> Self {
		KanimError::HeaderMismatch {
			file_type,
			expected: expected.to_string(),
			actual: String::from_utf8_lossy(actual).into_owned(),
		}
	}
}

impl From<quick_xml::Error> for KanimError {
	fn from(value: quick_xml::Error) -> Self {
		KanimError::ProjectFormat(ProjectFormatError::Xml(value))
	}
}
