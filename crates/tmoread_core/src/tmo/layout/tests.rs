use std::io::Cursor;

use tmoread_testkit::{DomainSpec, TmoBuilder};

use crate::tmo::{DomainDescriptor, RecordLayout, TmoError, TmoHeader};

fn three_domain_layout() -> RecordLayout {
	let cells = |n: usize| vec![0.0; n];
	let bytes = TmoBuilder::new(4)
		.domain(DomainSpec::new(2, 3, (0.0, 0.0), 4.0).buffered(8))
		.domain(DomainSpec::new(4, 6, (0.0, 0.0), 2.0))
		.domain(DomainSpec::new(1, 1, (0.0, 0.0), 1.0).buffered(4))
		.record(0.0, vec![cells(6), cells(24), cells(1)])
		.record(1.0, vec![cells(6), cells(24), cells(1)])
		.record(2.0, vec![cells(6), cells(24), cells(1)])
		.build();
	let mut reader = Cursor::new(bytes);
	let header = TmoHeader::read(&mut reader).expect("header parses");
	let domains = DomainDescriptor::read_table(&mut reader, &header).expect("domains parse");
	RecordLayout::new(&header, &domains).expect("layout fits")
}

#[test]
fn first_domain_starts_after_record_pad() {
	let layout = three_domain_layout();
	assert_eq!(layout.header_len(), 256 + 3 * 128);
	assert_eq!(layout.block_offset(0, 0).expect("offset"), layout.header_len() + 64);
}

#[test]
fn later_domains_follow_previous_buffers() {
	let layout = three_domain_layout();
	let d0 = layout.block_offset(1, 0).expect("d0");
	let d1 = layout.block_offset(1, 1).expect("d1");
	let d2 = layout.block_offset(1, 2).expect("d2");
	assert_eq!(d1 - d0, 8 * 4);
	assert_eq!(d2 - d1, 24 * 4);
	assert_eq!(d2 - d0, (8 + 24) * 4);
}

#[test]
fn records_are_uniformly_strided() {
	let layout = three_domain_layout();
	assert_eq!(layout.stride(), (8 + 24 + 4) * 4 + 128);
	for domain in 0..3 {
		let t0 = layout.block_offset(0, domain).expect("t0");
		let t2 = layout.block_offset(2, domain).expect("t2");
		assert_eq!(t2 - t0, 2 * layout.stride());
	}
}

#[test]
fn rejects_out_of_range_indices() {
	let layout = three_domain_layout();
	assert!(matches!(
		layout.block_offset(0, 3).expect_err("no fourth domain"),
		TmoError::DomainOutOfRange { index: 3, count: 3 }
	));
	assert!(matches!(
		layout.block_offset(3, 0).expect_err("no fourth record"),
		TmoError::TimeIndexOutOfRange { index: 3, count: 3 }
	));
}

#[test]
fn rejects_buffers_larger_than_stride() {
	let bytes = TmoBuilder::new(4)
		.domain(DomainSpec::new(10, 10, (0.0, 0.0), 1.0))
		.domain(DomainSpec::new(10, 10, (0.0, 0.0), 1.0))
		.max_block_size(10)
		.build();
	let mut reader = Cursor::new(bytes);
	let header = TmoHeader::read(&mut reader).expect("header parses");
	let domains = DomainDescriptor::read_table(&mut reader, &header).expect("domains parse");
	let err = RecordLayout::new(&header, &domains).expect_err("pad and 800 buffer bytes exceed 168 stride");
	assert!(matches!(err, TmoError::RecordOverflow { stride: 168, required: 864 }));
}

#[test]
fn record_pad_counts_toward_stride() {
	// 108 buffer bytes fit in 168 on their own, 172 with the leading pad.
	let bytes = TmoBuilder::new(4)
		.domain(DomainSpec::new(1, 1, (0.0, 0.0), 1.0).buffered(27))
		.max_block_size(10)
		.build();
	let mut reader = Cursor::new(bytes);
	let header = TmoHeader::read(&mut reader).expect("header parses");
	let domains = DomainDescriptor::read_table(&mut reader, &header).expect("domains parse");
	let err = RecordLayout::new(&header, &domains).expect_err("108 buffer bytes fit the overhead but not after the pad");
	assert!(matches!(err, TmoError::RecordOverflow { stride: 168, required: 172 }));
}

#[test]
fn unaddressable_records_are_rejected_at_open() {
	let cells = || vec![vec![0.0]];
	let mut bytes = TmoBuilder::new(4)
		.domain(DomainSpec::new(1, 1, (0.0, 0.0), 1.0))
		.record(0.0, cells())
		.record(1.0, cells())
		.record(2.0, cells())
		.record(3.0, cells())
		.build();
	bytes[64..72].copy_from_slice(&(1_i64 << 61).to_le_bytes());
	let mut reader = Cursor::new(bytes);
	let header = TmoHeader::read(&mut reader).expect("header parses");
	let domains = DomainDescriptor::read_table(&mut reader, &header).expect("domains parse");

	let err = RecordLayout::new(&header, &domains).expect_err("four records of 2^63 bytes overflow u64");
	assert!(matches!(err, TmoError::InvalidBlockSize { size } if size == 1 << 61));
}
