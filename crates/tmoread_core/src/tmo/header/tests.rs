use tmoread_testkit::{DomainSpec, TmoBuilder};

use crate::tmo::{ElementType, Sentinels, TmoError, TmoHeader};

#[test]
fn parses_v3_value_header() {
	let bytes = TmoBuilder::single_2x2(3).build();
	let header = TmoHeader::parse(&bytes).expect("header parses");

	assert_eq!(header.version, 3);
	assert_eq!(header.minor_version, 2);
	assert_eq!(header.app_version, Some(20240));
	assert_eq!(header.element, ElementType::F32);
	assert_eq!(header.domain_count, 1);
	assert_eq!(header.time_count, 1);
	assert!(!header.has_aggregate);
	assert_eq!(header.max_block_size, 4);
	assert_eq!(header.record_stride, 4 * 4 + 128);
	assert_eq!(header.header_len(), 256 + 128);
	assert_eq!(header.record_count(), 1);
	assert!(!header.half_cell_offset());
	assert_eq!(
		header.sentinels,
		Sentinels::Values {
			null_value: -999.0,
			ignore_value: -9999.0
		}
	);
}

#[test]
fn pre_v3_header_defaults_minor_and_app_versions() {
	let bytes = TmoBuilder::single_2x2(2).build();
	let header = TmoHeader::parse(&bytes).expect("header parses");

	assert_eq!(header.version, 2);
	assert_eq!(header.minor_version, 0);
	assert_eq!(header.app_version, None);
	assert!(header.half_cell_offset());
}

#[test]
fn mask_header_reads_flag_block() {
	let bytes = TmoBuilder::new(1)
		.domain(DomainSpec::new(1, 3, (0.0, 0.0), 1.0))
		.record(0.0, vec![vec![1.0, 0.0, 1.0]])
		.aggregate(99999.0, vec![vec![1.0, 1.0, 1.0]])
		.build();
	let header = TmoHeader::parse(&bytes).expect("mask header parses");

	assert!(header.is_mask());
	assert_eq!(header.element.width(), 1);
	assert!(header.has_aggregate);
	assert_eq!(header.record_count(), 2);
	assert_eq!(header.record_stride, 3 + 128);
	assert_eq!(header.sentinels, Sentinels::Mask { boolean: true });
}

#[test]
fn stride_scales_with_element_width() {
	let bytes = TmoBuilder::new(8)
		.domain(DomainSpec::new(2, 3, (0.0, 0.0), 1.0).buffered(8))
		.record(0.0, vec![vec![0.0; 6]])
		.build();
	let header = TmoHeader::parse(&bytes).expect("header parses");

	assert_eq!(header.element, ElementType::F64);
	assert_eq!(header.max_block_size, 8);
	assert_eq!(header.record_stride, 8 * 8 + 128);
}

#[test]
fn short_input_is_truncated_header() {
	let bytes = TmoBuilder::single_2x2(3).build();
	let err = TmoHeader::read(&mut &bytes[..255]).expect_err("255 bytes is too short");
	assert!(matches!(err, TmoError::TruncatedHeader { have: 255 }));
}

#[test]
fn rejects_unsupported_element_width() {
	let mut bytes = TmoBuilder::single_2x2(3).build();
	bytes[12..16].copy_from_slice(&2_i32.to_le_bytes());
	let err = TmoHeader::parse(&bytes).expect_err("width 2 is invalid");
	assert!(matches!(err, TmoError::UnsupportedElementWidth { width: 2 }));
}

#[test]
fn rejects_zero_domains() {
	let mut bytes = TmoBuilder::single_2x2(3).build();
	bytes[24..28].copy_from_slice(&0_i32.to_le_bytes());
	let err = TmoHeader::parse(&bytes).expect_err("zero domains is invalid");
	assert!(matches!(err, TmoError::InvalidDomainCount { count: 0 }));
}
