use crate::rsz::{Result, RszError};

/// Bounded little-endian cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current absolute byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Move to an absolute offset inside the buffer.
	pub fn seek(&mut self, pos: usize) -> Result<()> {
		if pos > self.bytes.len() {
			return Err(eof(self.pos, pos.saturating_sub(self.pos), self.remaining()));
		}
		self.pos = pos;
		Ok(())
	}

	/// Skip forward to the next multiple of `alignment`.
	pub fn align(&mut self, alignment: usize) -> Result<()> {
		if alignment <= 1 {
			return Ok(());
		}
		let aligned = self.pos.next_multiple_of(alignment);
		let _ = self.read_exact(aligned - self.pos)?;
		Ok(())
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(eof(self.pos, n, self.remaining()));
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32` without touching its bit pattern.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_bits(self.read_u32()?))
	}
}

fn eof(at: usize, need: usize, rem: usize) -> RszError {
	RszError::UnexpectedEof { at, need, rem }
}

/// Growable little-endian writer with seek and zero-filling alignment.
#[derive(Debug, Default, Clone)]
pub struct Writer {
	bytes: Vec<u8>,
	pos: usize,
}

impl Writer {
	/// Create an empty writer at position 0.
	pub fn new() -> Self {
		Self::default()
	}

	/// Return current absolute byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Borrow everything written so far.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Consume the writer, returning its buffer.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}

	/// Move to an absolute offset, zero-extending the buffer when seeking past its end.
	pub fn seek(&mut self, pos: usize) {
		if pos > self.bytes.len() {
			self.bytes.resize(pos, 0);
		}
		self.pos = pos;
	}

	/// Zero-fill up to the next multiple of `alignment`.
	pub fn align(&mut self, alignment: usize) {
		if alignment <= 1 {
			return;
		}
		let aligned = self.pos.next_multiple_of(alignment);
		let pad = aligned - self.pos;
		self.write_bytes(&vec![0_u8; pad]);
	}

	/// Write raw bytes at the current position, overwriting or extending.
	pub fn write_bytes(&mut self, data: &[u8]) {
		let end = self.pos + data.len();
		if end > self.bytes.len() {
			self.bytes.resize(end, 0);
		}
		self.bytes[self.pos..end].copy_from_slice(data);
		self.pos = end;
	}

	/// Write one byte.
	pub fn write_u8(&mut self, value: u8) {
		self.write_bytes(&[value]);
	}

	/// Write a little-endian `u16`.
	pub fn write_u16(&mut self, value: u16) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Write a little-endian `u32`.
	pub fn write_u32(&mut self, value: u32) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Write a little-endian `i32`.
	pub fn write_i32(&mut self, value: i32) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Write a little-endian `u64`.
	pub fn write_u64(&mut self, value: u64) {
		self.write_bytes(&value.to_le_bytes());
	}

	/// Write a little-endian `f32` bit pattern.
	pub fn write_f32(&mut self, value: f32) {
		self.write_u32(value.to_bits());
	}
}

/// Value with a fixed little-endian byte layout and no internal padding.
pub trait FixedLayout: Sized {
	/// Natural encoded width in bytes.
	const SIZE: usize;

	/// Decode one value.
	fn read(cursor: &mut Cursor<'_>) -> Result<Self>;

	/// Encode one value.
	fn write(&self, writer: &mut Writer);
}

macro_rules! le_layout {
	($($ty:ty),* $(,)?) => {
		$(
			impl FixedLayout for $ty {
				const SIZE: usize = std::mem::size_of::<$ty>();

				fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
					Ok(<$ty>::from_le_bytes(cursor.read_array()?))
				}

				fn write(&self, writer: &mut Writer) {
					writer.write_bytes(&self.to_le_bytes());
				}
			}
		)*
	};
}

le_layout!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

impl FixedLayout for bool {
	const SIZE: usize = 1;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(cursor.read_u8()? != 0)
	}

	fn write(&self, writer: &mut Writer) {
		writer.write_u8(u8::from(*self));
	}
}
