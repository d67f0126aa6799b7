use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value as Json, json};

use rsz::rsz::{FieldValue, Instance, InstanceGraph, InstanceId, MAX_GRAPH_DEPTH, Result, RszError, RszField, Value, Vec2, Vec3};

/// Project a top-level instance: name, indices, class, and expanded fields.
///
/// A reference cycle fails with `GraphDepthExceeded`.
pub(crate) fn instance_json(graph: &InstanceGraph, id: InstanceId) -> Result<Json> {
	let instance = graph.get(id)?;
	let mut out = Map::new();
	out.insert("name".to_owned(), Json::from(instance.name()));
	out.insert("index".to_owned(), Json::from(instance.index));
	out.insert("objectTableIndex".to_owned(), Json::from(instance.object_table_index));
	out.insert("className".to_owned(), Json::from(instance.class.name.as_ref()));
	let mut path = vec![id];
	out.insert("fields".to_owned(), fields_json(graph, instance, &mut path)?);
	Ok(Json::Object(out))
}

// `path` holds the instances being expanded, outermost first.
fn reference_json(graph: &InstanceGraph, id: InstanceId, path: &mut Vec<InstanceId>) -> Result<Json> {
	if path.len() >= MAX_GRAPH_DEPTH as usize || path.contains(&id) {
		return Err(RszError::GraphDepthExceeded { max_depth: MAX_GRAPH_DEPTH });
	}
	let instance = graph.get(id)?;
	let mut out = Map::new();
	out.insert("referenceType".to_owned(), Json::from("instance"));
	out.insert("name".to_owned(), Json::from(instance.name()));
	out.insert("index".to_owned(), Json::from(instance.index));
	if !instance.class.fields.is_empty() {
		path.push(id);
		out.insert("fields".to_owned(), fields_json(graph, instance, path)?);
		path.pop();
	}
	Ok(Json::Object(out))
}

fn fields_json(graph: &InstanceGraph, instance: &Instance, path: &mut Vec<InstanceId>) -> Result<Json> {
	let mut out = Map::new();
	if let Some(user_data) = &instance.user_data {
		out.insert("RSZUserDataPath".to_owned(), Json::from(user_data.path.as_str()));
		return Ok(Json::Object(out));
	}

	for (field, slot) in instance.fields() {
		let value = match slot {
			FieldValue::Array(items) => {
				let mut list = Vec::with_capacity(items.len());
				for item in items {
					list.push(element_json(graph, field, item, path)?);
				}
				Json::Array(list)
			}
			FieldValue::Single(value @ Value::Instance(_)) if field.is_reference() => json!({
				"type": field.display_type(),
				"value": element_json(graph, field, value, path)?,
			}),
			FieldValue::Single(value) => element_json(graph, field, value, path)?,
		};
		out.insert(field.name.to_string(), value);
	}
	Ok(Json::Object(out))
}

fn element_json(graph: &InstanceGraph, field: &RszField, value: &Value, path: &mut Vec<InstanceId>) -> Result<Json> {
	match value {
		Value::Instance(id) if field.is_reference() => reference_json(graph, *id, path),
		other => Ok(value_json(other)),
	}
}

/// Project one leaf value.
pub(crate) fn value_json(value: &Value) -> Json {
	match value {
		Value::Bool(v) => json!(v),
		Value::S8(v) => json!(v),
		Value::U8(v) => json!(v),
		Value::S16(v) => json!(v),
		Value::U16(v) => json!(v),
		Value::S32(v) => json!(v),
		Value::U32(v) => json!(v),
		Value::S64(v) => json!(v),
		Value::U64(v) => json!(v),
		Value::F32(v) => json!(v),
		Value::F64(v) => json!(v),
		Value::String(v) => json!(v),
		Value::Data(bytes) => Json::from(STANDARD.encode(bytes)),
		Value::Vec2(v) => vec2(v),
		Value::Vec3(v) => vec3(v),
		Value::Vec4(v) => json!({ "x": v.x, "y": v.y, "z": v.z, "w": v.w }),
		Value::Quaternion(v) => json!({ "x": v.x, "y": v.y, "z": v.z, "w": v.w }),
		Value::Mat4(v) => json!(v.m),
		Value::Color(v) => json!({ "r": v.r, "g": v.g, "b": v.b, "a": v.a }),
		Value::Obb(v) => json!({ "coord": v.coord.m, "extent": vec3(&v.extent) }),
		Value::Aabb(v) => json!({ "min": vec3(&v.min), "max": vec3(&v.max) }),
		Value::Sphere(v) => json!({ "center": vec3(&v.center), "radius": v.radius }),
		Value::Capsule(v) => json!({ "p0": vec3(&v.p0), "p1": vec3(&v.p1), "radius": v.radius }),
		Value::Area(v) => json!({
			"points": v.points.iter().map(vec2).collect::<Vec<_>>(),
			"height": v.height,
			"bottom": v.bottom,
		}),
		Value::Range(v) => json!({ "min": v.min, "max": v.max }),
		Value::Guid(v) => Json::from(v.to_string()),
		Value::Index(v) => json!(v),
		Value::Instance(id) => Json::from(id.to_string()),
	}
}

fn vec2(v: &Vec2) -> Json {
	json!({ "x": v.x, "y": v.y })
}

fn vec3(v: &Vec3) -> Json {
	json!({ "x": v.x, "y": v.y, "z": v.z })
}

#[cfg(test)]
mod tests;
