use std::sync::Arc;

use crate::rsz::bytes::{Cursor, Writer};
use crate::rsz::codec::{decode_value, encode_value};
use crate::rsz::infer::{InferenceOptions, classify, infer_field, raw_bits};
use crate::rsz::{FieldKind, FieldValue, InstanceGraph, Result, RszClass, RszError, RszField, Value};

/// Runtime limits and heuristics for instance decoding.
#[derive(Debug, Clone)]
pub struct ReadOptions {
	/// Maximum accepted array length prefix.
	pub max_array_count: usize,
	/// Constants for `Data` field inference.
	pub inference: InferenceOptions,
}

impl Default for ReadOptions {
	fn default() -> Self {
		Self {
			max_array_count: 1024,
			inference: InferenceOptions::default(),
		}
	}
}

/// External user-data reference that replaces an instance's own payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataRef {
	/// Instance table slot the user data occupies.
	pub instance_index: i32,
	/// Checksum of the referenced class.
	pub class_crc: u32,
	/// Path of the external user-data file.
	pub path: String,
}

/// One decoded object: a class plus one value slot per field.
///
/// `values` stays empty while `user_data` is set; otherwise, once read or
/// created, it holds exactly one slot per class field.
#[derive(Debug, Clone)]
pub struct Instance {
	/// Shared class declaration.
	pub class: Arc<RszClass>,
	/// Slot in the flat instance table, `-1` when detached.
	pub index: i32,
	/// Slot in the object table, `-1` when not a root object.
	pub object_table_index: i32,
	/// Field slots parallel to `class.fields`.
	pub values: Vec<FieldValue>,
	/// External payload, exclusive with `values`.
	pub user_data: Option<UserDataRef>,
}

impl Instance {
	/// Create an instance awaiting `read_instance`; `values` starts empty.
	pub fn new(class: Arc<RszClass>, index: i32) -> Self {
		Self {
			class,
			index,
			object_table_index: -1,
			values: Vec::new(),
			user_data: None,
		}
	}

	/// Create an instance from explicit field values.
	pub fn with_values(class: Arc<RszClass>, index: i32, values: Vec<FieldValue>) -> Result<Self> {
		if values.len() != class.fields.len() {
			return Err(RszError::ValueCountMismatch {
				class: class.name.to_string(),
				expected: class.fields.len(),
				got: values.len(),
			});
		}
		Ok(Self {
			values,
			..Self::new(class, index)
		})
	}

	/// Create an instance whose payload lives in external user data.
	pub fn with_user_data(class: Arc<RszClass>, index: i32, user_data: UserDataRef) -> Self {
		Self {
			user_data: Some(user_data),
			..Self::new(class, index)
		}
	}

	/// The NULL instance occupying table slot 0.
	pub fn null() -> Self {
		Self::new(RszClass::null(), 0)
	}

	/// Whether this instance uses the NULL class.
	pub fn is_null(&self) -> bool {
		self.class.is_null()
	}

	/// Display name `Class[index]`.
	pub fn name(&self) -> String {
		format!("{}[{}]", self.class.name, self.index)
	}

	/// Field declarations paired with their slots, in storage order.
	pub fn fields(&self) -> impl Iterator<Item = (&RszField, &FieldValue)> {
		self.class.fields.iter().zip(self.values.iter())
	}

	/// Look up a field slot by name.
	pub fn field(&self, name: &str) -> Option<&FieldValue> {
		let idx = self.class.index_of_field(name)?;
		self.values.get(idx)
	}

	/// Look up a field slot by name for mutation.
	pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
		let idx = self.class.index_of_field(name)?;
		self.values.get_mut(idx)
	}

	/// Replace a field slot by name.
	pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
		let class = self.class.name.to_string();
		let slot = self.field_mut(name).ok_or_else(|| RszError::FieldNotFound {
			class,
			field: name.to_owned(),
		})?;
		*slot = value;
		Ok(())
	}
}

fn field_alignment(field: &RszField) -> usize {
	if field.array { 4 } else { field.align }
}

/// Decode an instance's field values in place from `cursor`.
///
/// Reference fields come back as raw `Value::Index`. Values read before an
/// error stay on the instance.
pub fn read_instance(instance: &mut Instance, cursor: &mut Cursor<'_>, options: &ReadOptions) -> Result<()> {
	let class = Arc::clone(&instance.class);
	if instance.user_data.is_some() || class.fields.is_empty() {
		return Ok(());
	}

	tracing::trace!(class = %class.name, index = instance.index, at = cursor.pos(), "read instance");
	cursor.align(field_alignment(&class.fields[0]))?;
	instance.values.clear();
	instance.values.reserve(class.fields.len());
	for field in &class.fields {
		let value = read_field(&class, field, instance.index, cursor, options)?;
		instance.values.push(value);
	}
	Ok(())
}

fn read_field(class: &RszClass, field: &RszField, instance_index: i32, cursor: &mut Cursor<'_>, options: &ReadOptions) -> Result<FieldValue> {
	cursor.align(field_alignment(field))?;

	if !field.array {
		let value = decode_value(field.kind(), field.size, cursor)?;
		let value = infer_field(&class.name, field, &value, instance_index, &options.inference).unwrap_or(value);
		return Ok(FieldValue::Single(value));
	}

	let count = cursor.read_i32()?;
	let Ok(len) = usize::try_from(count) else {
		return Err(RszError::MalformedCount {
			class: class.name.to_string(),
			field: field.name.to_string(),
			count,
		});
	};
	if len > options.max_array_count {
		return Err(RszError::CountTooLarge {
			class: class.name.to_string(),
			field: field.name.to_string(),
			count,
			max: options.max_array_count,
		});
	}

	let mut items = Vec::with_capacity(len);
	if len > 0 {
		cursor.align(field.align)?;
	}

	let mut inferred_here = false;
	for element in 0..len {
		if field.is_string() {
			cursor.align(4)?;
		}
		let value = decode_value(field.kind(), field.size, cursor)?;
		let value = if element == 0 {
			match infer_field(&class.name, field, &value, instance_index, &options.inference) {
				Some(inferred) => {
					inferred_here = true;
					inferred
				}
				None => value,
			}
		} else {
			if inferred_here {
				check_inferred_element(class, field, &value, element, instance_index, &options.inference)?;
			}
			value
		};
		items.push(value);
	}
	Ok(FieldValue::Array(items))
}

// Element 0 fixed the kind for the whole array; later elements must not look like object references unless it chose Object.
fn check_inferred_element(class: &RszClass, field: &RszField, value: &Value, element: usize, instance_index: i32, inference: &InferenceOptions) -> Result<()> {
	let kind = field.kind();
	if kind == FieldKind::Object {
		return Ok(());
	}
	let Some(bits) = raw_bits(value) else {
		return Ok(());
	};
	if classify(bits, instance_index, inference) == FieldKind::Object {
		return Err(RszError::FormatInconsistency {
			class: class.name.to_string(),
			field: field.name.to_string(),
			kind,
			element,
		});
	}
	Ok(())
}

/// Encode an instance's field values at the writer's position.
///
/// Resolved references are written as the target instance's current `index`.
pub fn write_instance(graph: &InstanceGraph, instance: &Instance, writer: &mut Writer) -> Result<()> {
	let class = &instance.class;
	if instance.user_data.is_some() || class.fields.is_empty() {
		return Ok(());
	}
	if instance.values.len() != class.fields.len() {
		return Err(RszError::ValueCountMismatch {
			class: class.name.to_string(),
			expected: class.fields.len(),
			got: instance.values.len(),
		});
	}

	tracing::trace!(class = %class.name, index = instance.index, at = writer.pos(), "write instance");
	writer.align(field_alignment(&class.fields[0]));
	for (field, slot) in instance.fields() {
		writer.align(field_alignment(field));
		match (field.array, slot) {
			(true, FieldValue::Array(items)) => {
				let count = i32::try_from(items.len()).map_err(|_| RszError::CountTooLarge {
					class: class.name.to_string(),
					field: field.name.to_string(),
					count: i32::MAX,
					max: i32::MAX as usize,
				})?;
				writer.write_i32(count);
				if !items.is_empty() {
					writer.align(field.align);
				}
				for item in items {
					if field.is_string() {
						writer.align(4);
					}
					write_value(graph, field, item, writer)?;
				}
			}
			(false, FieldValue::Single(value)) => write_value(graph, field, value, writer)?,
			_ => {
				return Err(RszError::FieldShapeMismatch {
					class: class.name.to_string(),
					field: field.name.to_string(),
					array: field.array,
				});
			}
		}
	}
	Ok(())
}

fn write_value(graph: &InstanceGraph, field: &RszField, value: &Value, writer: &mut Writer) -> Result<()> {
	let resolved;
	let value = match value {
		Value::Instance(id) if field.is_reference() => {
			resolved = Value::Index(graph.get(*id)?.index);
			&resolved
		}
		other => other,
	};
	encode_value(field.kind(), field.size, value, writer)?;
	Ok(())
}

#[cfg(test)]
mod tests;
