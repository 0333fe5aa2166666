//! Sprite file naming conventions.
//!
//! Sprite files are named `{base}_{index}.png`: the trailing digits after the last
//! underscore are the frame index within the symbol named `base`.

/// Strips the extension from a file name, keeping any directory part.
pub fn without_extension(name: &str) -> &str {
	match name.rfind('.') {
		Some(dot) if !name[dot..].contains('/') && dot > 0 => &name[..dot],
		_ => name,
	}
}

/// Splits an extension-less sprite name into its symbol base name and frame index.
///
/// Names without an underscore or with a non-numeric suffix map to `(name, 0)`.
///
/// ```
/// use kanim_types::file::scml::split_frame;
///
/// assert_eq!(split_frame("walk_3"), ("walk", 3));
/// assert_eq!(split_frame("arm_upper_12"), ("arm_upper", 12));
/// assert_eq!(split_frame("logo"), ("logo", 0));
/// ```
pub fn split_frame(name: &str) -> (&str, i32) {
	if let Some((base, suffix)) = name.rsplit_once('_') {
		if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
			if let Ok(index) = suffix.parse() {
				return (base, index);
			}
		}
	}
	(name, 0)
}
