mod table_ops {

	use std::sync::Arc;

	use crate::rsz::{
		Cursor, FieldKind, FieldValue, Instance, InstanceGraph, InstanceId, ReadOptions, RszClass, RszError, RszField, Schema, Value, Writer,
		create_instance, read_instances, rebuild_table, resolve_references, write_table,
	};

	fn schema() -> Schema {
		Schema::from_classes(vec![
			RszClass::new(
				"app.Root",
				0x1,
				vec![
					RszField::new("id", FieldKind::S32, 4, 4),
					RszField::new("child", FieldKind::Object, 4, 4).with_original_type("app.Child"),
					RszField::new("extra", FieldKind::Object, 4, 4).with_array().with_original_type("app.Child[]"),
				],
			),
			RszClass::new(
				"app.Child",
				0x2,
				vec![
					RszField::new("scale", FieldKind::F32, 4, 4),
					RszField::new("leaf", FieldKind::Object, 4, 4).with_original_type("app.Leaf"),
				],
			),
			RszClass::new("app.Leaf", 0x3, vec![RszField::new("on", FieldKind::Bool, 1, 1)]),
		])
	}

	fn class(schema: &Schema, name: &str) -> Arc<RszClass> {
		schema.get_by_name(name).expect("class exists").clone()
	}

	fn built_tree(schema: &Schema) -> (InstanceGraph, InstanceId) {
		let mut graph = InstanceGraph::new();
		let root = create_instance(schema, &mut graph, class(schema, "app.Root"), -1, true).expect("tree builds");
		graph
			.get_mut(root)
			.expect("root exists")
			.set_field("id", FieldValue::Single(Value::S32(77)))
			.expect("id exists");
		(graph, root)
	}

	#[test]
	fn rebuild_assigns_post_order_slots() {
		let schema = schema();
		let (mut graph, root) = built_tree(&schema);
		let table = rebuild_table(&mut graph, &[root]).expect("table rebuilds");

		let names: Vec<_> = table.iter().map(|id| graph.get(*id).expect("entry exists").name()).collect();
		assert_eq!(names, ["NULL[0]", "app.Leaf[1]", "app.Child[2]", "app.Root[3]"]);
	}

	#[test]
	fn rebuild_keeps_first_visit_of_shared_instances() {
		let schema = schema();
		let (mut graph, root) = built_tree(&schema);
		let Some(FieldValue::Single(Value::Instance(child))) = graph.get(root).expect("root exists").field("child").cloned() else {
			panic!("child is resolved");
		};
		graph
			.get_mut(root)
			.expect("root exists")
			.set_field("extra", FieldValue::Array(vec![Value::Instance(child), Value::Instance(child)]))
			.expect("extra exists");

		let table = rebuild_table(&mut graph, &[root]).expect("table rebuilds");
		assert_eq!(table.len(), 4);
		assert_eq!(graph.get(child).expect("child exists").index, 2);
	}

	#[test]
	fn written_table_reads_back_identically() {
		let schema = schema();
		let (mut graph, root) = built_tree(&schema);
		let table = rebuild_table(&mut graph, &[root]).expect("table rebuilds");
		let mut writer = Writer::new();
		write_table(&graph, &table, &mut writer).expect("table writes");
		let bytes = writer.into_bytes();

		let classes: Vec<_> = table.iter().map(|id| Arc::clone(&graph.get(*id).expect("entry exists").class)).collect();
		let mut decoded = InstanceGraph::new();
		let mut cursor = Cursor::new(&bytes);
		let read = read_instances(&mut decoded, &classes, &mut cursor, 0, &ReadOptions::default()).expect("table reads");
		assert_eq!(cursor.remaining(), 0);
		assert_eq!(
			decoded.get(read[3]).expect("root read").field("child"),
			Some(&FieldValue::Single(Value::Index(2))),
			"references decode as raw indices"
		);

		resolve_references(&mut decoded, &read).expect("references resolve");
		assert_eq!(decoded.get(read[3]).expect("root read").field("child"), Some(&FieldValue::Single(Value::Instance(read[2]))));
		assert_eq!(decoded.get(read[3]).expect("root read").field("id"), Some(&FieldValue::Single(Value::S32(77))));

		let rebuilt = rebuild_table(&mut decoded, &[read[3]]).expect("decoded table rebuilds");
		let mut writer = Writer::new();
		write_table(&decoded, &rebuilt, &mut writer).expect("decoded table writes");
		assert_eq!(writer.into_bytes(), bytes);
	}

	#[test]
	fn out_of_range_index_leaves_graph_untouched() {
		let schema = schema();
		let mut graph = InstanceGraph::new();
		let null = graph.insert(Instance::null());
		let values = vec![
			FieldValue::Single(Value::S32(1)),
			FieldValue::Single(Value::Index(0)),
			FieldValue::Array(vec![Value::Index(9)]),
		];
		let root = graph.insert(Instance::with_values(class(&schema, "app.Root"), 1, values).expect("root builds"));

		let err = resolve_references(&mut graph, &[null, root]).expect_err("index 9 is out of range");
		assert!(matches!(err, RszError::TableIndexOutOfRange { index: 9, len: 2 }));
		assert_eq!(graph.get(root).expect("root exists").field("child"), Some(&FieldValue::Single(Value::Index(0))));
	}

	#[test]
	fn null_classes_consume_no_bytes() {
		let schema = schema();
		let classes = [RszClass::null(), class(&schema, "app.Leaf"), class(&schema, "app.Leaf")];
		let bytes = [1_u8, 0];
		let mut graph = InstanceGraph::new();
		let mut cursor = Cursor::new(&bytes);
		let ids = read_instances(&mut graph, &classes, &mut cursor, 0, &ReadOptions::default()).expect("table reads");

		assert_eq!(ids.len(), 3);
		assert!(graph.get(ids[0]).expect("null exists").is_null());
		assert_eq!(graph.get(ids[2]).expect("leaf exists").index, 2);
		assert_eq!(graph.get(ids[2]).expect("leaf exists").field("on"), Some(&FieldValue::Single(Value::Bool(false))));
	}
}
