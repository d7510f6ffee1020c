use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TmoError>;

/// Errors produced while opening and reading `.tmo` containers.
#[derive(Debug, Error)]
pub enum TmoError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Fewer than 256 bytes were available for the global header.
	#[error("truncated header: need 256 bytes, have {have}")]
	TruncatedHeader {
		/// Bytes actually available.
		have: usize,
	},
	/// A domain record could not be read in full.
	#[error("truncated domain record {index}")]
	TruncatedDomainRecord {
		/// Zero-based domain index.
		index: usize,
	},
	/// A time record's leading time value could not be read.
	#[error("truncated time record {index} at offset {offset}")]
	TruncatedTimeRecord {
		/// Zero-based record index.
		index: usize,
		/// Absolute byte offset of the record.
		offset: u64,
	},
	/// A domain data block ran past the end of the source.
	#[error("truncated data block at offset {offset} (domain {domain}, time index {time})")]
	TruncatedDataBlock {
		/// Absolute byte offset of the block.
		offset: u64,
		/// Zero-based domain index.
		domain: usize,
		/// Zero-based time record index.
		time: usize,
	},
	/// No stored time matched the request within tolerance.
	#[error("time {requested} not found in container")]
	TimeNotFound {
		/// Requested time magnitude.
		requested: f64,
	},
	/// Time token text could not be parsed.
	#[error("invalid time token: {token}")]
	InvalidTimeToken {
		/// User-provided token text.
		token: String,
	},
	/// Element width is neither 1 nor a floating-point width.
	#[error("unsupported element width {width} (expected 1, 4 or 8)")]
	UnsupportedElementWidth {
		/// Parsed element width.
		width: i32,
	},
	/// Header declared no domains.
	#[error("invalid domain count {count} (expected >= 1)")]
	InvalidDomainCount {
		/// Parsed domain count.
		count: i32,
	},
	/// Header declared a negative time-step count.
	#[error("invalid time step count {count}")]
	InvalidTimeCount {
		/// Parsed time-step count.
		count: i32,
	},
	/// Header declared a negative or overflowing block size.
	#[error("invalid max block size {size}")]
	InvalidBlockSize {
		/// Parsed block element count.
		size: i64,
	},
	/// Domain record sizes are inconsistent with its grid shape.
	#[error("invalid geometry for domain {index}: {rows}x{cols} cells, data={data_bytes} bytes, buffer={buffer_bytes} bytes")]
	InvalidDomainGeometry {
		/// Zero-based domain index.
		index: usize,
		/// Declared row count.
		rows: i64,
		/// Declared column count.
		cols: i64,
		/// Declared data block bytes.
		data_bytes: i64,
		/// Declared buffer bytes.
		buffer_bytes: i64,
	},
	/// Record pad plus domain buffers do not fit inside one time record.
	#[error("time record needs {required} bytes but stride is {stride}")]
	RecordOverflow {
		/// Declared time record stride.
		stride: u64,
		/// Leading pad plus sum of domain buffer bytes.
		required: u64,
	},
	/// A block offset does not fit in a 64-bit file position.
	#[error("block offset overflows for domain {domain}, time index {time}")]
	OffsetOverflow {
		/// Zero-based record index.
		time: usize,
		/// Zero-based domain index.
		domain: usize,
	},
	/// Requested domain index is not present.
	#[error("domain index {index} out of range (count={count})")]
	DomainOutOfRange {
		/// Requested domain index.
		index: usize,
		/// Domain count.
		count: usize,
	},
	/// Requested time record index is not present.
	#[error("time index {index} out of range (records={count})")]
	TimeIndexOutOfRange {
		/// Requested record index.
		index: usize,
		/// Number of stored records.
		count: usize,
	},
}
