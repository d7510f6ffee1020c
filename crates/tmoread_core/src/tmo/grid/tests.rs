use std::io::Cursor;

use tmoread_testkit::{DomainSpec, TmoBuilder};

use crate::tmo::{DomainDescriptor, ElementType, Grid, RecordLayout, TmoError, TmoHeader, read_grid};

struct Opened {
	reader: Cursor<Vec<u8>>,
	header: TmoHeader,
	domains: Vec<DomainDescriptor>,
	layout: RecordLayout,
}

fn open(bytes: Vec<u8>) -> Opened {
	let mut reader = Cursor::new(bytes);
	let header = TmoHeader::read(&mut reader).expect("header parses");
	let domains = DomainDescriptor::read_table(&mut reader, &header).expect("domains parse");
	let layout = RecordLayout::new(&header, &domains).expect("layout fits");
	Opened {
		reader,
		header,
		domains,
		layout,
	}
}

#[test]
fn reshapes_f32_block_row_major() {
	let mut opened = open(
		TmoBuilder::new(4)
			.domain(DomainSpec::new(2, 3, (0.0, 0.0), 1.0))
			.record(0.0, vec![vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]])
			.build(),
	);
	let offset = opened.layout.block_offset(0, 0).expect("offset");
	let grid = read_grid(&mut opened.reader, offset, &opened.domains[0], opened.header.element, 0).expect("grid reads");

	assert_eq!((grid.rows(), grid.cols()), (2, 3));
	assert_eq!(grid.row(0).expect("row 0"), &[1.0, 2.0, 3.0]);
	assert_eq!(grid.row(1).expect("row 1"), &[4.0, 5.0, 6.0]);
	assert_eq!(grid.get(1, 0), Some(4.0));
	assert_eq!(grid.get(2, 0), None);
	assert!(grid.row(2).is_none());
}

#[test]
fn decodes_second_domain_at_second_time() {
	let mut opened = open(
		TmoBuilder::new(8)
			.domain(DomainSpec::new(1, 2, (0.0, 0.0), 1.0).buffered(4))
			.domain(DomainSpec::new(2, 2, (0.0, 0.0), 0.5))
			.record(0.0, vec![vec![1.0, 1.0], vec![0.0, 0.0, 0.0, 0.0]])
			.record(3.0, vec![vec![2.0, 2.0], vec![0.125, -1.5, 7.0, 1.0e10]])
			.build(),
	);
	let offset = opened.layout.block_offset(1, 1).expect("offset");
	let grid = read_grid(&mut opened.reader, offset, &opened.domains[1], ElementType::F64, 1).expect("grid reads");
	assert_eq!(grid.values(), &[0.125, -1.5, 7.0, 1.0e10]);
}

#[test]
fn decodes_signed_mask_bytes() {
	let mut opened = open(
		TmoBuilder::new(1)
			.domain(DomainSpec::new(1, 3, (0.0, 0.0), 1.0))
			.record(0.0, vec![vec![1.0, 0.0, -1.0]])
			.build(),
	);
	let offset = opened.layout.block_offset(0, 0).expect("offset");
	let grid = read_grid(&mut opened.reader, offset, &opened.domains[0], ElementType::Mask, 0).expect("grid reads");
	assert_eq!(grid.values(), &[1.0, 0.0, -1.0]);
}

#[test]
fn short_block_is_truncated() {
	let bytes = TmoBuilder::single_2x2(3).build();
	let cut = 256 + 128 + 64 + 8;
	let mut opened = open(bytes[..cut].to_vec());
	let offset = opened.layout.block_offset(0, 0).expect("offset");
	let err = read_grid(&mut opened.reader, offset, &opened.domains[0], opened.header.element, 0).expect_err("block is cut");
	assert!(matches!(err, TmoError::TruncatedDataBlock { offset: 448, domain: 0, time: 0 }));
}

#[test]
fn grid_new_checks_shape() {
	assert!(Grid::new(2, 2, vec![0.0; 4]).is_some());
	assert!(Grid::new(2, 2, vec![0.0; 3]).is_none());
}

#[test]
fn oversized_block_fails_as_truncated() {
	let domain = DomainDescriptor {
		index: 0,
		rows: 1 << 29,
		cols: 1 << 29,
		origin_x: 0.0,
		origin_y: 0.0,
		dx: 1.0,
		dy: 1.0,
		angle: 0.0,
		data_bytes: 1 << 60,
		buffer_bytes: 1 << 60,
	};
	let mut reader = Cursor::new(vec![0_u8; 64]);
	let err = read_grid(&mut reader, 4, &domain, ElementType::F32, 0).expect_err("source holds a few bytes");
	assert!(matches!(err, TmoError::TruncatedDataBlock { offset: 4, domain: 0, time: 0 }));
}
