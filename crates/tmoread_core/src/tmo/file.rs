use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use crate::tmo::compression::open_source;
use crate::tmo::grid::read_grid;
use crate::tmo::source::Source;
use crate::tmo::{
	CellMapper, Compression, DomainDescriptor, Grid, MaskPolicy, NoopObserver, OpenOptions, RecordLayout, ResolvedTime, Result, SampleIter,
	SampleObserver, TimeIndex, TimeToken, TmoError, TmoHeader, WetMask, companion_mask_path,
};

/// Opened container with decoded header and domain table.
///
/// Data blocks are read from the source on every request; only the header,
/// domain table, and (once built) time index are kept.
pub struct TmoFile<R = Source> {
	/// Parsed global header.
	pub header: TmoHeader,
	/// Compression mode detected for source bytes.
	pub compression: Compression,
	domains: Vec<DomainDescriptor>,
	layout: RecordLayout,
	options: OpenOptions,
	reader: R,
	path: Option<PathBuf>,
	times: Option<TimeIndex>,
	mask: Option<Box<TmoFile<R>>>,
}

impl TmoFile<Source> {
	/// Open a container from disk with default options.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, OpenOptions::default())
	}

	/// Open a container from disk, resolving its companion mask per `options.mask`.
	pub fn open_with(path: impl AsRef<Path>, options: OpenOptions) -> Result<Self> {
		let path = path.as_ref();
		let (compression, reader) = open_source(path, options.max_decompressed_bytes)?;
		let mut file = Self::from_reader(reader, options)?;
		file.compression = compression;
		file.path = Some(path.to_path_buf());

		if !file.header.is_mask()
			&& let Some(candidate) = mask_candidate(path, &file.options.mask)
			&& let Some(mask) = open_companion(&candidate, &file.options)
		{
			file = file.with_mask(mask);
		}

		Ok(file)
	}
}

impl<R: Read + Seek> TmoFile<R> {
	/// Decode the header and domain table from any seekable source.
	///
	/// No companion mask is discovered; inject one with [`TmoFile::with_mask`].
	pub fn from_reader(mut reader: R, options: OpenOptions) -> Result<Self> {
		let header = TmoHeader::read(&mut reader)?;
		let domains = DomainDescriptor::read_table(&mut reader, &header)?;
		let layout = RecordLayout::new(&header, &domains)?;

		tracing::debug!(
			version = header.version,
			element = header.element.as_str(),
			domains = header.domain_count,
			records = header.record_count(),
			stride = header.record_stride,
			"opened container"
		);

		Ok(Self {
			header,
			compression: Compression::None,
			domains,
			layout,
			options,
			reader,
			path: None,
			times: None,
			mask: None,
		})
	}

	/// Attach a companion mask container.
	///
	/// A mask whose domain shapes or record count differ from this container is
	/// dropped with a warning and masking stays disabled.
	pub fn with_mask(mut self, mask: TmoFile<R>) -> Self {
		if let Some(reason) = self.mask_mismatch(&mask) {
			tracing::warn!(mask = ?mask.path, reason, "companion mask rejected, masking disabled");
			return self;
		}
		tracing::debug!(mask = ?mask.path, "companion mask attached");
		self.mask = Some(Box::new(mask));
		self
	}

	/// Source path, when opened from disk.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Options the container was opened with.
	pub fn options(&self) -> &OpenOptions {
		&self.options
	}

	/// Domain descriptors in index order.
	pub fn domains(&self) -> &[DomainDescriptor] {
		&self.domains
	}

	/// Descriptor for domain `index`.
	pub fn domain(&self, index: usize) -> Result<&DomainDescriptor> {
		self.domains.get(index).ok_or(TmoError::DomainOutOfRange {
			index,
			count: self.domains.len(),
		})
	}

	/// Byte offset of the first time record.
	pub fn header_len(&self) -> u64 {
		self.header.header_len()
	}

	/// Number of stored records, counting the trailing aggregate record.
	pub fn record_count(&self) -> usize {
		self.header.record_count()
	}

	/// Cells across all domains, ignoring masking.
	pub fn total_sample_count(&self) -> usize {
		self.domains.iter().map(DomainDescriptor::cell_count).fold(0, usize::saturating_add)
	}

	/// Whether a companion mask is attached.
	pub fn has_mask(&self) -> bool {
		self.mask.is_some()
	}

	/// Path of the attached companion mask.
	pub fn mask_path(&self) -> Option<&Path> {
		self.mask.as_ref().and_then(|mask| mask.path())
	}

	/// Stored time values, scanned on first use and cached.
	pub fn times(&mut self) -> Result<&TimeIndex> {
		let times = match self.times.take() {
			Some(times) => times,
			None => TimeIndex::read(&mut self.reader, &self.header)?,
		};
		Ok(self.times.insert(times))
	}

	/// Resolve a time token to a stored record.
	pub fn resolve_time(&mut self, token: TimeToken) -> Result<ResolvedTime> {
		let tolerance = self.options.time_tolerance;
		self.times()?.resolve(token, tolerance)
	}

	/// Absolute byte offset of a domain's block in a time record.
	pub fn block_offset(&self, time: usize, domain: usize) -> Result<u64> {
		self.layout.block_offset(time, domain)
	}

	/// Read one domain's values for one time record.
	pub fn read_domain(&mut self, time: usize, domain: usize) -> Result<Grid> {
		let offset = self.layout.block_offset(time, domain)?;
		let descriptor = self.domains[domain];
		read_grid(&mut self.reader, offset, &descriptor, self.header.element, time)
	}

	/// Read the companion mask's dry flags for one domain and time record.
	pub fn read_mask(&mut self, time: usize, domain: usize) -> Result<Option<WetMask>> {
		match self.mask.as_mut() {
			Some(mask) => Ok(Some(WetMask::from_grid(&mask.read_domain(time, domain)?))),
			None => Ok(None),
		}
	}

	/// Coordinate mapper for domain `index`.
	pub fn cell_mapper(&self, index: usize) -> Result<CellMapper> {
		Ok(CellMapper::new(self.domain(index)?, self.header.half_cell_offset()))
	}

	/// Resolve `token` and iterate valid samples across all domains.
	pub fn samples(&mut self, token: TimeToken) -> Result<SampleIter<'_, R, NoopObserver>> {
		self.samples_with(token, NoopObserver)
	}

	/// Like [`TmoFile::samples`], reporting per-domain and per-cell progress to `observer`.
	pub fn samples_with<O: SampleObserver>(&mut self, token: TimeToken, observer: O) -> Result<SampleIter<'_, R, O>> {
		let time = self.resolve_time(token)?;
		Ok(SampleIter::new(self, time, observer))
	}

	fn mask_mismatch(&self, mask: &TmoFile<R>) -> Option<&'static str> {
		if mask.domains.len() != self.domains.len() {
			return Some("domain count differs");
		}
		if !self.domains.iter().zip(&mask.domains).all(|(left, right)| left.same_shape(right)) {
			return Some("domain shape differs");
		}
		if mask.record_count() != self.record_count() {
			return Some("record count differs");
		}
		None
	}
}

fn mask_candidate(path: &Path, policy: &MaskPolicy) -> Option<PathBuf> {
	let candidate = match policy {
		MaskPolicy::Disabled => return None,
		MaskPolicy::Auto => companion_mask_path(path)?,
		MaskPolicy::Path(explicit) => explicit.clone(),
	};
	(candidate != path).then_some(candidate)
}

fn open_companion(candidate: &Path, options: &OpenOptions) -> Option<TmoFile> {
	if !candidate.is_file() {
		tracing::debug!(mask = %candidate.display(), "no companion mask");
		return None;
	}

	let options = options.clone().with_mask(MaskPolicy::Disabled);
	match TmoFile::open_with(candidate, options) {
		Ok(mask) => Some(mask),
		Err(err) => {
			tracing::warn!(mask = %candidate.display(), error = %err, "companion mask unreadable, masking disabled");
			None
		}
	}
}
