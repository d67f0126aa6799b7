use std::sync::Arc;

use crate::rsz::codec::default_value;
use crate::rsz::graph::MAX_GRAPH_DEPTH;
use crate::rsz::{ClassRegistry, FieldKind, FieldValue, Instance, InstanceGraph, InstanceId, Result, RszClass, RszError, RszField, Value};

const LIST_PREFIX: &str = "System.Collections.Generic.List`1<";

/// Build a default-populated instance of `class` and insert it into `graph`.
///
/// Arrays start empty. Scalar reference fields get a default child instance
/// (index `-1`) when `create_children` is set, looked up by the field's
/// original type name; otherwise they hold the NULL slot index `0`. Children
/// are inserted before their parent. On error the graph is unchanged.
pub fn create_instance<R: ClassRegistry + ?Sized>(registry: &R, graph: &mut InstanceGraph, class: Arc<RszClass>, index: i32, create_children: bool) -> Result<InstanceId> {
	let mut staged: Vec<Instance> = Vec::new();
	let mut stack = vec![Frame::new(class, index)];

	while let Some(frame) = stack.last_mut() {
		let Some(field) = frame.class.fields.get(frame.values.len()) else {
			let Some(done) = stack.pop() else {
				break;
			};
			let id = graph.staged_id(staged.len());
			staged.push(Instance::with_values(done.class, done.index, done.values)?);
			match stack.last_mut() {
				Some(parent) => parent.values.push(FieldValue::Single(Value::Instance(id))),
				None => {
					graph.commit(staged);
					return Ok(id);
				}
			}
			continue;
		};

		if field.array {
			frame.values.push(FieldValue::Array(Vec::new()));
		} else if field.is_reference() && create_children {
			let child_class = resolve_class(registry, &field.original_type)?;
			if stack.len() >= MAX_GRAPH_DEPTH as usize {
				return Err(RszError::GraphDepthExceeded { max_depth: MAX_GRAPH_DEPTH });
			}
			stack.push(Frame::new(child_class, -1));
		} else {
			let value = default_field_value(field)?;
			frame.values.push(FieldValue::Single(value));
		}
	}

	// The root frame always returns above.
	Err(RszError::GraphDepthExceeded { max_depth: MAX_GRAPH_DEPTH })
}

/// Instance under construction; `values` grows one field at a time.
struct Frame {
	class: Arc<RszClass>,
	index: i32,
	values: Vec<FieldValue>,
}

impl Frame {
	fn new(class: Arc<RszClass>, index: i32) -> Self {
		let values = Vec::with_capacity(class.fields.len());
		Self { class, index, values }
	}
}

/// Build one new element for an array field.
///
/// `Object` arrays get a fresh default instance (children included) of
/// `class_name`, or of the element type named by the field's original type.
/// Other fields get their kind's default value.
pub fn create_array_item<R: ClassRegistry + ?Sized>(registry: &R, graph: &mut InstanceGraph, field: &RszField, class_name: Option<&str>) -> Result<Value> {
	if field.kind() != FieldKind::Object {
		return default_field_value(field);
	}
	let name = class_name.unwrap_or_else(|| element_type_name(&field.original_type));
	let class = resolve_class(registry, name)?;
	let id = create_instance(registry, graph, class, -1, true)?;
	Ok(Value::Instance(id))
}

/// Zero value for one element of `field`.
///
/// Reference fields default to the NULL slot index.
pub fn default_field_value(field: &RszField) -> Result<Value> {
	if field.is_reference() {
		return Ok(Value::Index(0));
	}
	default_value(field.kind(), field.size)
}

/// Element class name of an array type name.
///
/// Handles `T[]` and `System.Collections.Generic.List`1<T>`; anything else is
/// returned unchanged.
pub fn element_type_name(array_type: &str) -> &str {
	if let Some(inner) = array_type.strip_suffix("[]") {
		return inner;
	}
	if let Some(inner) = array_type.strip_prefix(LIST_PREFIX).and_then(|rest| rest.strip_suffix('>')) {
		return inner;
	}
	array_type
}

fn resolve_class<R: ClassRegistry + ?Sized>(registry: &R, name: &str) -> Result<Arc<RszClass>> {
	registry.class_by_name(name).ok_or_else(|| RszError::SchemaNotFound { name: name.to_owned() })
}
