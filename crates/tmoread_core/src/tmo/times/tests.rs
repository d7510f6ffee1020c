use std::io::Cursor;

use tmoread_testkit::{DomainSpec, TmoBuilder};

use crate::tmo::{DEFAULT_TIME_TOLERANCE, TimeIndex, TimeToken, TmoError, TmoHeader};

fn three_step_container() -> Vec<u8> {
	let cells = || vec![vec![0.0; 4]];
	TmoBuilder::new(4)
		.domain(DomainSpec::new(2, 2, (0.0, 0.0), 1.0))
		.record(0.0, cells())
		.record(0.5, cells())
		.record(1.0, cells())
		.aggregate(99999.0, cells())
		.build()
}

#[test]
fn reads_one_value_per_record_including_aggregate() {
	let mut reader = Cursor::new(three_step_container());
	let header = TmoHeader::read(&mut reader).expect("header parses");
	let index = TimeIndex::read(&mut reader, &header).expect("index builds");
	assert_eq!(index.values(), &[0.0, 0.5, 1.0, 99999.0]);
}

#[test]
fn resolves_within_tolerance() {
	let index = TimeIndex::from_values(vec![0.0, 0.5, 1.0]);
	let hit = index.resolve(TimeToken::At(0.5004), DEFAULT_TIME_TOLERANCE).expect("0.5004 rounds to 0.5");
	assert_eq!(hit.index, 1);
	assert_eq!(hit.value, 0.5);

	let err = index.resolve(TimeToken::At(0.502), DEFAULT_TIME_TOLERANCE).expect_err("outside tolerance");
	assert!(matches!(err, TmoError::TimeNotFound { requested } if requested == 0.502));
}

#[test]
fn resolves_sentinel_tokens() {
	let index = TimeIndex::from_values(vec![-99999.0, 0.0, 1.0, 99999.0]);
	assert_eq!(index.resolve(TimeToken::Last, DEFAULT_TIME_TOLERANCE).expect("max resolves").index, 3);
	assert_eq!(index.resolve(TimeToken::First, DEFAULT_TIME_TOLERANCE).expect("min resolves").index, 0);

	let plain = TimeIndex::from_values(vec![0.0, 1.0]);
	let err = plain.resolve(TimeToken::Last, DEFAULT_TIME_TOLERANCE).expect_err("no aggregate record");
	assert!(matches!(err, TmoError::TimeNotFound { requested } if requested == 99999.0));
}

#[test]
fn duplicate_times_resolve_to_earliest_record() {
	let index = TimeIndex::from_values(vec![2.0, 2.0, 3.0]);
	assert_eq!(index.resolve(TimeToken::At(2.0), DEFAULT_TIME_TOLERANCE).expect("resolves").index, 0);
}

#[test]
fn parses_time_tokens() {
	assert_eq!("max".parse::<TimeToken>().expect("max"), TimeToken::Last);
	assert_eq!("Last".parse::<TimeToken>().expect("last"), TimeToken::Last);
	assert_eq!("minimum".parse::<TimeToken>().expect("minimum"), TimeToken::First);
	assert_eq!(" 1.25 ".parse::<TimeToken>().expect("number"), TimeToken::At(1.25));

	let err = "soon".parse::<TimeToken>().expect_err("not a time");
	assert!(matches!(err, TmoError::InvalidTimeToken { token } if token == "soon"));
	assert!("NaN".parse::<TimeToken>().is_err());
}

#[test]
fn truncated_record_fails_time_scan() {
	let bytes = three_step_container();
	let header = TmoHeader::parse(&bytes).expect("header parses");
	let cut = header.header_len() + 2 * header.record_stride + 2;
	let mut reader = Cursor::new(bytes[..cut as usize].to_vec());
	let err = TimeIndex::read(&mut reader, &header).expect_err("third record is cut");
	assert!(matches!(err, TmoError::TruncatedTimeRecord { index: 2, .. }));
}

#[test]
fn huge_time_count_fails_on_first_missing_record() {
	let mut bytes = TmoBuilder::single_2x2(3).build();
	bytes[28..32].copy_from_slice(&i32::MAX.to_le_bytes());
	let mut reader = Cursor::new(bytes);
	let header = TmoHeader::read(&mut reader).expect("header parses");

	let err = TimeIndex::read(&mut reader, &header).expect_err("only one record stored");
	assert!(matches!(err, TmoError::TruncatedTimeRecord { index: 1, .. }));
}
