use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::tmo::source::{Source, read_fully};
use crate::tmo::{Result, TmoError};

/// zstd frame magic used by compressed containers.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Compression mode detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// zstd-compressed stream.
	Zstd,
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Open `path`, returning the detected compression and a seekable source.
///
/// Plain files stay on disk behind a buffered handle. zstd files are decoded
/// eagerly and the whole container is held in memory, bounded by `limit` bytes,
/// so opening one costs its full decompressed size up front.
pub fn open_source(path: &Path, limit: usize) -> Result<(Compression, Source)> {
	let mut file = BufReader::new(File::open(path)?);

	let mut magic = [0_u8; 4];
	let read = read_fully(&mut file, &mut magic)?;
	file.seek(SeekFrom::Start(0))?;

	if read == magic.len() && magic == ZSTD_MAGIC {
		let bytes = decode_zstd(file, limit)?;
		return Ok((Compression::Zstd, Source::Memory(io::Cursor::new(bytes))));
	}

	Ok((Compression::None, Source::File(file)))
}

fn decode_zstd<R: Read>(raw: R, limit: usize) -> Result<Vec<u8>> {
	let mut decoder = zstd::stream::read::Decoder::new(raw)?;
	let mut out = Vec::new();
	let mut buf = [0_u8; 8192];

	loop {
		let read = decoder.read(&mut buf)?;
		if read == 0 {
			break;
		}

		if out.len() + read > limit {
			return Err(TmoError::DecompressedTooLarge { limit });
		}

		out.extend_from_slice(&buf[..read]);
	}

	Ok(out)
}
