use crate::tmo::{Result, TmoError};

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

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `N` bytes and advance cursor.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		if N > self.remaining() {
			return Err(TmoError::Io(std::io::ErrorKind::UnexpectedEof.into()));
		}

		let mut out = [0_u8; N];
		out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
		self.pos += N;
		Ok(out)
	}

	/// Read a little-endian `i8`.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i64`.
	pub fn read_i64_le(&mut self) -> Result<i64> {
		Ok(i64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `f64`.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		Ok(f64::from_le_bytes(self.read_array()?))
	}

	/// Read `N` consecutive little-endian `i32` values.
	pub fn read_i32_block<const N: usize>(&mut self) -> Result<[i32; N]> {
		let mut out = [0_i32; N];
		for item in &mut out {
			*item = self.read_i32_le()?;
		}
		Ok(out)
	}

	/// Read `N` consecutive little-endian `i64` values.
	pub fn read_i64_block<const N: usize>(&mut self) -> Result<[i64; N]> {
		let mut out = [0_i64; N];
		for item in &mut out {
			*item = self.read_i64_le()?;
		}
		Ok(out)
	}

	/// Read `N` consecutive little-endian `f32` values.
	pub fn read_f32_block<const N: usize>(&mut self) -> Result<[f32; N]> {
		let mut out = [0_f32; N];
		for item in &mut out {
			*item = self.read_f32_le()?;
		}
		Ok(out)
	}

	/// Read `N` consecutive little-endian `f64` values.
	pub fn read_f64_block<const N: usize>(&mut self) -> Result<[f64; N]> {
		let mut out = [0_f64; N];
		for item in &mut out {
			*item = self.read_f64_le()?;
		}
		Ok(out)
	}
}
