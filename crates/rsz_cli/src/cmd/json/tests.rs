use std::sync::Arc;

use rsz::rsz::{FieldKind, FieldValue, Instance, InstanceGraph, RszClass, RszError, RszField, Value, Vec3};

use super::{instance_json, value_json};

#[test]
fn instance_projection_expands_references() {
	let leaf_class = Arc::new(RszClass::new("app.Leaf", 0x3, vec![RszField::new("weight", FieldKind::Data, 4, 4)]));
	let root_class = Arc::new(RszClass::new(
		"app.Root",
		0x1,
		vec![
			RszField::new("position", FieldKind::Vec3, 16, 16),
			RszField::new("leaf", FieldKind::Object, 4, 4).with_original_type("app.Leaf"),
			RszField::new("more", FieldKind::Object, 4, 4).with_array(),
		],
	));

	let mut graph = InstanceGraph::new();
	let null = graph.insert(Instance::null());
	let leaf = graph.insert(Instance::with_values(leaf_class, 1, vec![FieldValue::Single(Value::Data(vec![0xab, 0x01, 0x00, 0xff]))]).expect("leaf builds"));
	let mut root = Instance::with_values(
		root_class,
		2,
		vec![
			FieldValue::Single(Value::Vec3(Vec3 { x: 1.0, y: 2.0, z: 3.0 })),
			FieldValue::Single(Value::Instance(leaf)),
			FieldValue::Array(vec![Value::Instance(null), Value::Index(7)]),
		],
	)
	.expect("root builds");
	root.object_table_index = 0;
	let root = graph.insert(root);

	let json = instance_json(&graph, root).expect("projection succeeds");
	assert_eq!(json["name"], "app.Root[2]");
	assert_eq!(json["index"], 2);
	assert_eq!(json["objectTableIndex"], 0);
	assert_eq!(json["className"], "app.Root");
	assert_eq!(json["fields"]["position"]["z"], 3.0);
	assert_eq!(json["fields"]["leaf"]["type"], "app.Leaf");
	assert_eq!(json["fields"]["leaf"]["value"]["referenceType"], "instance");
	assert_eq!(json["fields"]["leaf"]["value"]["name"], "app.Leaf[1]");
	assert_eq!(json["fields"]["leaf"]["value"]["fields"]["weight"], "qwEA/w==");

	let more = json["fields"]["more"].as_array().expect("array field projects as array");
	assert_eq!(more[0]["name"], "NULL[0]");
	assert!(more[0].get("fields").is_none(), "empty classes omit fields");
	assert_eq!(more[1], 7);
}

#[test]
fn leaf_values_project_as_plain_json() {
	assert_eq!(value_json(&Value::U64(u64::MAX)), serde_json::json!(u64::MAX));
	assert_eq!(value_json(&Value::String("hi".to_owned())), "hi");
	assert_eq!(value_json(&Value::Bool(true)), true);
	assert!(value_json(&Value::F32(f32::NAN)).is_null());
	assert_eq!(value_json(&Value::Data(Vec::new())), "");
}

#[test]
fn reference_cycle_is_rejected() {
	let class = Arc::new(RszClass::new("app.Node", 0x4, vec![RszField::new("next", FieldKind::Object, 4, 4)]));
	let mut graph = InstanceGraph::new();
	let a = graph.insert(Instance::with_values(Arc::clone(&class), 1, vec![FieldValue::Single(Value::Index(0))]).expect("node builds"));
	let b = graph.insert(Instance::with_values(class, 2, vec![FieldValue::Single(Value::Instance(a))]).expect("node builds"));
	graph
		.get_mut(a)
		.expect("node exists")
		.set_field("next", FieldValue::Single(Value::Instance(b)))
		.expect("next field exists");

	let err = instance_json(&graph, a).expect_err("cyclic graph cannot be projected");
	assert!(matches!(err, RszError::GraphDepthExceeded { .. }));
}

#[test]
fn shared_children_project_at_every_use() {
	let leaf_class = Arc::new(RszClass::new("app.Leaf", 0x3, vec![RszField::new("on", FieldKind::Bool, 1, 1)]));
	let pair_class = Arc::new(RszClass::new(
		"app.Pair",
		0x5,
		vec![RszField::new("left", FieldKind::Object, 4, 4), RszField::new("right", FieldKind::Object, 4, 4)],
	));
	let mut graph = InstanceGraph::new();
	let leaf = graph.insert(Instance::with_values(leaf_class, 1, vec![FieldValue::Single(Value::Bool(true))]).expect("leaf builds"));
	let pair = graph.insert(
		Instance::with_values(pair_class, 2, vec![FieldValue::Single(Value::Instance(leaf)), FieldValue::Single(Value::Instance(leaf))]).expect("pair builds"),
	);

	let json = instance_json(&graph, pair).expect("shared leaf is not a cycle");
	assert_eq!(json["fields"]["left"]["value"]["fields"]["on"], true);
	assert_eq!(json["fields"]["right"]["value"]["fields"]["on"], true);
}
