use crate::tmo::{DomainDescriptor, Result, TmoError, TmoHeader};

/// Byte placement of domain blocks within uniformly strided time records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
	header_len: u64,
	stride: u64,
	records: usize,
	domain_starts: Vec<u64>,
}

impl RecordLayout {
	/// Compute per-domain start offsets within one time record.
	///
	/// Each domain starts where the previous domain's buffer ends; the first
	/// starts right after the record's leading pad. The pad plus all buffers
	/// must fit in one record, and every record must be addressable in `u64`.
	pub fn new(header: &TmoHeader, domains: &[DomainDescriptor]) -> Result<Self> {
		let mut domain_starts = Vec::with_capacity(domains.len());
		let mut acc = TmoHeader::RECORD_PAD;
		for domain in domains {
			domain_starts.push(acc);
			acc = acc.checked_add(domain.buffer_bytes).ok_or(TmoError::RecordOverflow {
				stride: header.record_stride,
				required: u64::MAX,
			})?;
		}

		if acc > header.record_stride {
			return Err(TmoError::RecordOverflow {
				stride: header.record_stride,
				required: acc,
			});
		}

		(header.record_count() as u64)
			.checked_mul(header.record_stride)
			.and_then(|records| records.checked_add(header.header_len()))
			.ok_or(TmoError::InvalidBlockSize {
				size: header.max_block_size as i64,
			})?;

		Ok(Self {
			header_len: header.header_len(),
			stride: header.record_stride,
			records: header.record_count(),
			domain_starts,
		})
	}

	/// Absolute byte offset of domain `domain`'s block in record `time`.
	pub fn block_offset(&self, time: usize, domain: usize) -> Result<u64> {
		let start = *self.domain_starts.get(domain).ok_or(TmoError::DomainOutOfRange {
			index: domain,
			count: self.domain_starts.len(),
		})?;
		if time >= self.records {
			return Err(TmoError::TimeIndexOutOfRange {
				index: time,
				count: self.records,
			});
		}

		(time as u64)
			.checked_mul(self.stride)
			.and_then(|record| record.checked_add(self.header_len))
			.and_then(|record| record.checked_add(start))
			.ok_or(TmoError::OffsetOverflow { time, domain })
	}

	/// Bytes between consecutive time records.
	pub fn stride(&self) -> u64 {
		self.stride
	}

	/// Byte offset of the first time record.
	pub fn header_len(&self) -> u64 {
		self.header_len
	}
}

#[cfg(test)]
mod tests;
