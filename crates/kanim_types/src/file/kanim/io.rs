//! Little-endian primitive reader for kanim streams.
//!
//! All integers and floats are 32-bit little-endian. Strings are a variable-length
//! length prefix (7 payload bits per byte, least significant group first, high bit set
//! on every byte but the last) followed by that many bytes of UTF-8.

use std::io::{Read, Write};

use crate::file::{FileType, KanimError};
use crate::model::Hashes;

use super::constants::{MAGIC_SIZE, VARINT_CONTINUE, VARINT_MASK, VARINT_PAYLOAD_BITS};

/// Sequential reader over a kanim stream that tracks its byte offset.
pub struct StreamReader<R> {
	inner: R,
	offset: u64,
	file_type: FileType,
}

impl<R: Read> StreamReader<R> {
	/// Wraps `inner`; `file_type` is used to label errors.
	pub fn new(inner: R, file_type: FileType) -> Self {
		Self {
			inner,
			offset: 0,
			file_type,
		}
	}

	/// Bytes consumed so far.
	pub fn offset(&self) -> u64 {
		self.offset
	}

	/// Stream label.
	pub fn file_type(&self) -> FileType {
		self.file_type
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N], KanimError> {
		let mut buf = [0u8; N];
		self.inner.read_exact(&mut buf)?;
		self.offset += N as u64;
		Ok(buf)
	}

	/// Reads the magic and checks it against `expected`.
	///
	/// Nothing past the magic is consumed on mismatch.
	pub fn expect_magic(&mut self, expected: &str) -> Result<(), KanimError> {
		let actual: [u8; MAGIC_SIZE] = self.read_array()?;
		if actual != expected.as_bytes() {
			return Err(KanimError::header_mismatch(self.file_type, expected, &actual));
		}
		Ok(())
	}

	/// Reads a signed 32-bit integer.
	pub fn read_i32(&mut self) -> Result<i32, KanimError> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Reads a 32-bit float.
	pub fn read_f32(&mut self) -> Result<f32, KanimError> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Reads a count field, rejecting negative values.
	pub fn read_count(&mut self, field: &'static str) -> Result<usize, KanimError> {
		let value = self.read_i32()?;
		usize::try_from(value).map_err(|_| KanimError::InvalidLength {
			file_type: self.file_type,
			field,
			value: i64::from(value),
		})
	}

	/// Reads a variable-length unsigned integer of at most 32 bits.
	pub fn read_varint(&mut self) -> Result<u32, KanimError> {
		let start = self.offset;
		let mut value = 0u32;
		let mut shift = 0u32;
		loop {
			let [byte] = self.read_array::<1>()?;
			let payload = u32::from(byte & VARINT_MASK);
			if shift >= 32 || (shift == 28 && payload > 0x0F) {
				return Err(KanimError::VarintOverflow {
					offset: start,
				});
			}
			value |= payload << shift;
			if byte & VARINT_CONTINUE == 0 {
				return Ok(value);
			}
			shift += VARINT_PAYLOAD_BITS;
		}
	}

	/// Reads a length-prefixed UTF-8 string.
	pub fn read_pstring(&mut self) -> Result<String, KanimError> {
		let len = self.read_varint()? as usize;
		let offset = self.offset;
		let mut bytes = Vec::new();
		(&mut self.inner).take(len as u64).read_to_end(&mut bytes)?;
		if bytes.len() != len {
			return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
		}
		self.offset += len as u64;
		String::from_utf8(bytes).map_err(|source| KanimError::InvalidString {
			offset,
			source,
		})
	}

	/// Reads a hash table section: a count, then `(hash, name)` pairs.
	pub fn read_hash_table(&mut self) -> Result<Hashes, KanimError> {
		let count = self.read_count("hash_count")?;
		let mut hashes = Hashes::new();
		for _ in 0..count {
			let hash = self.read_i32()?;
			let name = self.read_pstring()?;
			hashes.insert(hash, name);
		}
		Ok(hashes)
	}
}

/// Writes a hash table section in the layout [`StreamReader::read_hash_table`] expects.
pub fn write_hash_table<W: Write>(writer: &mut W, hashes: &Hashes) -> std::io::Result<()> {
	writer.write_all(&(hashes.len() as i32).to_le_bytes())?;
	for (hash, name) in hashes.iter() {
		writer.write_all(&hash.to_le_bytes())?;
		write_pstring(writer, name)?;
	}
	Ok(())
}

/// Writes `value` as a variable-length integer.
pub fn write_varint<W: Write>(writer: &mut W, mut value: u32) -> std::io::Result<()> {
	loop {
		let byte = (value as u8) & VARINT_MASK;
		value >>= VARINT_PAYLOAD_BITS;
		if value == 0 {
			return writer.write_all(&[byte]);
		}
		writer.write_all(&[byte | VARINT_CONTINUE])?;
	}
}

/// Writes `value` as a length-prefixed UTF-8 string.
pub fn write_pstring<W: Write>(writer: &mut W, value: &str) -> std::io::Result<()> {
	let len = u32::try_from(value.len())
		.map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidInput, "string too long"))?;
	write_varint(writer, len)?;
	writer.write_all(value.as_bytes())
}
