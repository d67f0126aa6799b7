use crate::rsz::{FieldKind, RszField, Value};

/// Constants of the object back-reference heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceOptions {
	/// Candidates must be strictly greater than this table index.
	pub min_object_index: i32,
	/// Candidates may sit at most this many slots before the current instance.
	pub max_back_distance: i32,
}

impl Default for InferenceOptions {
	fn default() -> Self {
		Self {
			min_object_index: 3,
			max_back_distance: 100,
		}
	}
}

/// Whether a field is still an ambiguous 4-byte `Data` field eligible for inference.
pub fn needs_inference(field: &RszField) -> bool {
	field.kind() == FieldKind::Data && field.size == 4 && field.native
}

/// Classify raw 4-byte field bits read while decoding instance `instance_index`.
///
/// First match wins: a recent back-reference becomes `Object`, a plausible
/// float becomes `F32`, anything else is `S32`.
pub fn classify(bits: [u8; 4], instance_index: i32, options: &InferenceOptions) -> FieldKind {
	let candidate = i32::from_le_bytes(bits);
	let distance = i64::from(instance_index) - i64::from(candidate);
	if distance > 0 && distance <= i64::from(options.max_back_distance) && candidate > options.min_object_index {
		return FieldKind::Object;
	}
	if plausible_f32(u32::from_le_bytes(bits)).is_some() {
		return FieldKind::F32;
	}
	FieldKind::S32
}

/// Accept bit patterns that look like hand-authored float data.
///
/// Finite, normal (never zero or subnormal), with magnitude in `[1e-6, 1e7]`.
/// Small integers reinterpret as subnormals and are rejected.
pub fn plausible_f32(bits: u32) -> Option<f32> {
	let value = f32::from_bits(bits);
	if !value.is_normal() {
		return None;
	}
	let magnitude = value.abs();
	(1e-6..=1e7).contains(&magnitude).then_some(value)
}

/// Reinterpret raw 4-byte field bits under an inferred kind.
pub fn reinterpret(kind: FieldKind, bits: [u8; 4]) -> Value {
	match kind {
		FieldKind::Object | FieldKind::UserData => Value::Index(i32::from_le_bytes(bits)),
		FieldKind::F32 => Value::F32(f32::from_le_bytes(bits)),
		_ => Value::S32(i32::from_le_bytes(bits)),
	}
}

/// Raw bits of a value decoded under an inferred kind.
pub(crate) fn raw_bits(value: &Value) -> Option<[u8; 4]> {
	match value {
		Value::Index(v) | Value::S32(v) => Some(v.to_le_bytes()),
		Value::F32(v) => Some(v.to_le_bytes()),
		Value::Data(bytes) => bytes.as_slice().try_into().ok(),
		_ => None,
	}
}

/// Run inference on a freshly read `Data` value and rewrite the shared field kind.
///
/// Returns the reinterpreted value, or `None` when the field is not eligible or
/// the value is not 4 raw bytes.
pub(crate) fn infer_field(class_name: &str, field: &RszField, raw: &Value, instance_index: i32, options: &InferenceOptions) -> Option<Value> {
	if !needs_inference(field) {
		return None;
	}
	let Value::Data(bytes) = raw else {
		return None;
	};
	let bits: [u8; 4] = bytes.as_slice().try_into().ok()?;

	let decided = classify(bits, instance_index, options);
	let kind = field.set_inferred(decided);
	tracing::debug!(class = class_name, field = %field.name, instance_index, kind = %kind, "inferred field kind");
	Some(reinterpret(kind, bits))
}
