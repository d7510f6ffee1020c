use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};

/// Seekable byte source backing an opened container.
pub enum Source {
	/// Buffered handle over a plain file on disk.
	File(BufReader<File>),
	/// Decompressed container bytes held in memory.
	Memory(io::Cursor<Vec<u8>>),
}

impl Read for Source {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match self {
			Self::File(inner) => inner.read(buf),
			Self::Memory(inner) => inner.read(buf),
		}
	}
}

impl Seek for Source {
	fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		match self {
			Self::File(inner) => inner.seek(pos),
			Self::Memory(inner) => inner.seek(pos),
		}
	}
}

/// Fill `buf` from `reader` until full or end of stream, returning bytes read.
pub(crate) fn read_fully<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
	let mut filled = 0;
	while filled < buf.len() {
		match reader.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(read) => filled += read,
			Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
			Err(err) => return Err(err),
		}
	}
	Ok(filled)
}

/// Seek to `offset` and fill `buf`, returning bytes read.
pub(crate) fn read_at<R: Read + Seek + ?Sized>(reader: &mut R, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
	reader.seek(SeekFrom::Start(offset))?;
	read_fully(reader, buf)
}
