mod read_write {

	use std::sync::Arc;

	use crate::rsz::{
		Cursor, FieldKind, FieldValue, Instance, InstanceGraph, ReadOptions, RszClass, RszError, RszField, UserDataRef, Value, Vec3, Writer,
		default_value, read_instance, write_instance,
	};

	fn mixed_class() -> Arc<RszClass> {
		Arc::new(RszClass::new(
			"app.Mixed",
			0x1111,
			vec![
				RszField::new("enabled", FieldKind::Bool, 1, 1),
				RszField::new("position", FieldKind::Vec3, 16, 16),
				RszField::new("name", FieldKind::String, 4, 4),
				RszField::new("tags", FieldKind::String, 4, 4).with_array(),
				RszField::new("target", FieldKind::Object, 4, 4).with_original_type("app.Mixed"),
				RszField::new("items", FieldKind::Object, 4, 4).with_array().with_original_type("app.Mixed[]"),
				RszField::new("scale", FieldKind::U16, 2, 2),
				RszField::new("points", FieldKind::Vec4, 16, 16).with_array(),
			],
		))
	}

	fn encode(instance: &Instance) -> Vec<u8> {
		let graph = InstanceGraph::new();
		let mut writer = Writer::new();
		write_instance(&graph, instance, &mut writer).expect("instance writes");
		writer.into_bytes()
	}

	fn decode(class: &Arc<RszClass>, index: i32, bytes: &[u8]) -> Instance {
		let mut instance = Instance::new(Arc::clone(class), index);
		let mut cursor = Cursor::new(bytes);
		read_instance(&mut instance, &mut cursor, &ReadOptions::default()).expect("instance reads");
		assert_eq!(cursor.pos(), bytes.len(), "read consumes every written byte");
		instance
	}

	#[test]
	fn scalar_layout_follows_alignment() {
		let class = Arc::new(RszClass::new(
			"app.Small",
			0x2222,
			vec![RszField::new("flag", FieldKind::Bool, 1, 1), RszField::new("pos", FieldKind::Vec3, 16, 16)],
		));
		let instance = Instance::with_values(
			Arc::clone(&class),
			1,
			vec![FieldValue::Single(Value::Bool(true)), FieldValue::Single(Value::Vec3(Vec3 { x: 1.0, y: 2.0, z: 3.0 }))],
		)
		.expect("value count matches");

		let bytes = encode(&instance);
		assert_eq!(bytes.len(), 32);
		assert_eq!(bytes[0], 1);
		assert!(bytes[1..16].iter().all(|b| *b == 0), "padding before the vec3 is zero");
		assert_eq!(&bytes[16..20], &1.0_f32.to_le_bytes());
	}

	#[test]
	fn full_instance_round_trips() {
		let class = mixed_class();
		let instance = Instance::with_values(
			Arc::clone(&class),
			9,
			vec![
				FieldValue::Single(Value::Bool(true)),
				FieldValue::Single(Value::Vec3(Vec3 { x: 0.5, y: -1.0, z: 8.0 })),
				FieldValue::Single(Value::String("mixed".to_owned())),
				FieldValue::Array(vec![Value::String("a".to_owned()), Value::String(String::new()), Value::String("ccc".to_owned())]),
				FieldValue::Single(Value::Index(4)),
				FieldValue::Array(vec![Value::Index(5), Value::Index(6)]),
				FieldValue::Single(Value::U16(512)),
				FieldValue::Array(Vec::new()),
			],
		)
		.expect("value count matches");

		let bytes = encode(&instance);
		let decoded = decode(&class, 9, &bytes);
		assert_eq!(decoded.values, instance.values);
		assert_eq!(encode(&decoded), bytes, "write(read(bytes)) == bytes");
	}

	#[test]
	fn decoded_bytes_reencode_identically() {
		let class = Arc::new(RszClass::new(
			"app.Counts",
			0x3333,
			vec![
				RszField::new("count", FieldKind::S32, 4, 4),
				RszField::new("values", FieldKind::F32, 4, 4).with_array(),
			],
		));
		let mut raw = Vec::new();
		raw.extend_from_slice(&3_i32.to_le_bytes());
		raw.extend_from_slice(&2_i32.to_le_bytes());
		raw.extend_from_slice(&1.25_f32.to_le_bytes());
		raw.extend_from_slice(&(-4.0_f32).to_le_bytes());

		let decoded = decode(&class, 1, &raw);
		assert_eq!(decoded.field("values"), Some(&FieldValue::Array(vec![Value::F32(1.25), Value::F32(-4.0)])));
		assert_eq!(encode(&decoded), raw);
	}

	#[test]
	fn empty_array_skips_element_alignment() {
		let class = Arc::new(RszClass::new(
			"app.Sparse",
			0x4444,
			vec![
				RszField::new("points", FieldKind::Vec4, 16, 16).with_array(),
				RszField::new("after", FieldKind::S32, 4, 4),
			],
		));
		let mut raw = Vec::new();
		raw.extend_from_slice(&0_i32.to_le_bytes());
		raw.extend_from_slice(&7_i32.to_le_bytes());

		let decoded = decode(&class, 1, &raw);
		assert_eq!(decoded.values[0], FieldValue::Array(Vec::new()));
		assert_eq!(decoded.values[1], FieldValue::Single(Value::S32(7)));
		assert_eq!(encode(&decoded), raw);
	}

	fn read_count(count: i32) -> Result<Instance, RszError> {
		let class = Arc::new(RszClass::new("app.List", 0x5555, vec![RszField::new("items", FieldKind::U8, 1, 1).with_array()]));
		let mut raw = count.to_le_bytes().to_vec();
		raw.resize(4 + 2048, 0);
		let mut instance = Instance::new(class, 1);
		let mut cursor = Cursor::new(&raw);
		read_instance(&mut instance, &mut cursor, &ReadOptions::default()).map(|()| instance)
	}

	#[test]
	fn negative_count_is_malformed() {
		let err = read_count(-1).expect_err("count -1 fails");
		assert!(matches!(err, RszError::MalformedCount { count: -1, .. }));
	}

	#[test]
	fn oversized_count_is_rejected() {
		let err = read_count(1025).expect_err("count 1025 fails");
		assert!(matches!(err, RszError::CountTooLarge { count: 1025, max: 1024, .. }));
		let ok = read_count(1024).expect("count 1024 is accepted");
		assert!(matches!(&ok.values[0], FieldValue::Array(items) if items.len() == 1024));
	}

	#[test]
	fn user_data_and_empty_classes_are_no_ops() {
		let class = mixed_class();
		let mut instance = Instance::with_user_data(
			class,
			3,
			UserDataRef {
				instance_index: 3,
				class_crc: 0x1111,
				path: "data/mixed.user".to_owned(),
			},
		);
		let mut cursor = Cursor::new(&[]);
		read_instance(&mut instance, &mut cursor, &ReadOptions::default()).expect("user data read is a no-op");
		assert!(instance.values.is_empty());
		assert!(encode(&instance).is_empty());

		let null = Instance::null();
		assert!(encode(&null).is_empty());
	}

	#[test]
	fn resolved_references_write_target_index() {
		let leaf_class = Arc::new(RszClass::new("app.Leaf", 0x6666, Vec::new()));
		let holder_class = Arc::new(RszClass::new(
			"app.Holder",
			0x7777,
			vec![RszField::new("leaf", FieldKind::Object, 4, 4), RszField::new("raw", FieldKind::Object, 4, 4)],
		));

		let mut graph = InstanceGraph::new();
		let leaf = graph.insert(Instance::new(leaf_class, 12));
		let holder = Instance::with_values(holder_class, 13, vec![FieldValue::Single(Value::Instance(leaf)), FieldValue::Single(Value::Index(2))])
			.expect("value count matches");

		let mut writer = Writer::new();
		write_instance(&graph, &holder, &mut writer).expect("holder writes");
		let mut expected = 12_i32.to_le_bytes().to_vec();
		expected.extend_from_slice(&2_i32.to_le_bytes());
		assert_eq!(writer.into_bytes(), expected);
	}

	#[test]
	fn shape_mismatch_is_reported() {
		let class = Arc::new(RszClass::new("app.List", 0x5555, vec![RszField::new("items", FieldKind::U8, 1, 1).with_array()]));
		let instance = Instance::with_values(class, 1, vec![FieldValue::Single(Value::U8(1))]).expect("value count matches");
		let graph = InstanceGraph::new();
		let result = write_instance(&graph, &instance, &mut Writer::new());
		assert!(matches!(result, Err(RszError::FieldShapeMismatch { array: true, .. })));
	}

	#[test]
	fn name_keyed_access() {
		let class = mixed_class();
		let mut instance = decode(&class, 4, &encode(&default_mixed(&class)));
		assert_eq!(instance.name(), "app.Mixed[4]");

		instance.set_field("scale", FieldValue::Single(Value::U16(3))).expect("scale exists");
		assert_eq!(instance.field("scale"), Some(&FieldValue::Single(Value::U16(3))));
		assert!(matches!(instance.set_field("missing", FieldValue::Single(Value::U8(0))), Err(RszError::FieldNotFound { .. })));
		assert!(instance.field("missing").is_none());

		let short = Instance::with_values(class, 1, Vec::new());
		assert!(matches!(short, Err(RszError::ValueCountMismatch { expected: 8, got: 0, .. })));
	}

	fn default_mixed(class: &Arc<RszClass>) -> Instance {
		let values = class
			.fields
			.iter()
			.map(|field| {
				if field.array {
					FieldValue::Array(Vec::new())
				} else if field.is_reference() {
					FieldValue::Single(Value::Index(0))
				} else {
					FieldValue::Single(default_value(field.kind(), field.size).expect("kind has a default"))
				}
			})
			.collect();
		Instance::with_values(Arc::clone(class), 4, values).expect("value count matches")
	}
}

mod inference {

	use std::sync::Arc;

	use crate::rsz::{Cursor, FieldKind, FieldValue, Instance, ReadOptions, RszClass, RszError, RszField, Value, read_instance};

	fn data_class(array: bool) -> Arc<RszClass> {
		let field = RszField::new("weight", FieldKind::Data, 4, 4).with_native();
		let field = if array { field.with_array() } else { field };
		Arc::new(RszClass::new("app.Weighted", 0x8888, vec![field]))
	}

	fn read(class: &Arc<RszClass>, index: i32, raw: &[u8]) -> Result<Instance, RszError> {
		let mut instance = Instance::new(Arc::clone(class), index);
		let mut cursor = Cursor::new(raw);
		read_instance(&mut instance, &mut cursor, &ReadOptions::default()).map(|()| instance)
	}

	#[test]
	fn back_reference_infers_object_for_later_instances() {
		let class = data_class(false);
		let first = read(&class, 50, &10_i32.to_le_bytes()).expect("first instance reads");
		assert_eq!(first.values[0], FieldValue::Single(Value::Index(10)));
		assert_eq!(class.fields[0].kind(), FieldKind::Object);

		let second = read(&class, 51, &1.5_f32.to_le_bytes()).expect("second instance reads");
		assert_eq!(second.values[0], FieldValue::Single(Value::Index(1.5_f32.to_bits() as i32)));
	}

	#[test]
	fn float_bits_infer_f32() {
		let class = data_class(false);
		let read_back = read(&class, 2, &0.75_f32.to_le_bytes()).expect("instance reads");
		assert_eq!(read_back.values[0], FieldValue::Single(Value::F32(0.75)));
		assert_eq!(class.fields[0].kind(), FieldKind::F32);
	}

	#[test]
	fn array_elements_share_first_decision() {
		let class = data_class(true);
		let mut raw = 2_i32.to_le_bytes().to_vec();
		raw.extend_from_slice(&7_i32.to_le_bytes());
		raw.extend_from_slice(&(-3_i32).to_le_bytes());
		let read_back = read(&class, 1, &raw).expect("int array reads");
		assert_eq!(read_back.values[0], FieldValue::Array(vec![Value::S32(7), Value::S32(-3)]));
		assert_eq!(class.fields[0].kind(), FieldKind::S32);
	}

	#[test]
	fn later_object_looking_element_is_inconsistent() {
		let class = data_class(true);
		let mut raw = 2_i32.to_le_bytes().to_vec();
		raw.extend_from_slice(&0_i32.to_le_bytes());
		raw.extend_from_slice(&10_i32.to_le_bytes());
		let err = read(&class, 50, &raw).expect_err("mixed array fails");
		assert!(matches!(err, RszError::FormatInconsistency { kind: FieldKind::S32, element: 1, .. }));
	}
}
