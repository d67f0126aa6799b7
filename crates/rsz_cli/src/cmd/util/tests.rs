use rsz::rsz::{RszClass, RszError, Schema};
use rsz_testkit::fixture_path;

use super::{parse_offset, resolve_classes};

#[test]
fn offsets_accept_decimal_and_hex() {
	assert_eq!(parse_offset("16").expect("decimal parses"), 16);
	assert_eq!(parse_offset("0x20").expect("hex parses"), 32);
	assert!(matches!(parse_offset("0xzz"), Err(RszError::InvalidArgument { name: "offset", .. })));
	assert!(matches!(parse_offset("-1"), Err(RszError::InvalidArgument { .. })));
}

#[test]
fn class_names_resolve_with_null_slot() {
	let schema = Schema::open(fixture_path("rsz_sample.json")).expect("fixture opens");
	let names = vec!["NULL".to_owned(), "app.Leaf".to_owned()];
	let classes = resolve_classes(&schema, &names).expect("classes resolve");
	assert!(classes[0].is_null());
	assert_eq!(classes[1].name.as_ref(), "app.Leaf");
	assert!(std::sync::Arc::ptr_eq(&classes[0], &RszClass::null()));

	let missing = resolve_classes(&schema, &["app.Nope".to_owned()]);
	assert!(matches!(missing, Err(RszError::SchemaNotFound { ref name }) if name == "app.Nope"));
}
