use thiserror::Error;

use crate::rsz::FieldKind;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RszError>;

/// Errors produced while decoding, encoding, and traversing RSZ instance data.
#[derive(Debug, Error)]
pub enum RszError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Schema JSON could not be parsed.
	#[error("schema json: {0}")]
	Json(#[from] serde_json::Error),
	/// Schema JSON parsed but held an invalid entry.
	#[error("invalid schema entry {key}: {detail}")]
	SchemaInvalid {
		/// Dump key (hex type id) of the offending class.
		key: String,
		/// What was wrong with it.
		detail: String,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Not enough bytes remained for a requested read or seek.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Array length prefix was negative.
	#[error("malformed count {count} for {class}.{field}")]
	MalformedCount {
		/// Owning class name.
		class: String,
		/// Field carrying the count.
		field: String,
		/// Parsed signed count.
		count: i32,
	},
	/// String length prefix was negative.
	#[error("malformed string length {count} at offset {at}")]
	MalformedString {
		/// Offset of the length prefix.
		at: usize,
		/// Parsed signed length.
		count: i32,
	},
	/// Array length prefix exceeded the defensive ceiling.
	#[error("count {count} for {class}.{field} exceeds limit {max}")]
	CountTooLarge {
		/// Owning class name.
		class: String,
		/// Field carrying the count.
		field: String,
		/// Parsed count.
		count: i32,
		/// Configured ceiling.
		max: usize,
	},
	/// Type inference disagreed across elements of one array.
	#[error("inferred {class}.{field} as {kind}, but element {element} looks like an object reference")]
	FormatInconsistency {
		/// Owning class name.
		class: String,
		/// Inferred field.
		field: String,
		/// Kind decided from element 0.
		kind: FieldKind,
		/// Element index that disagreed.
		element: usize,
	},
	/// Value kind has no codec entry.
	#[error("unsupported field kind {kind}")]
	UnsupportedKind {
		/// Offending kind.
		kind: FieldKind,
	},
	/// Class name could not be resolved through the schema registry.
	#[error("class not found in schema: {name}")]
	SchemaNotFound {
		/// Requested class name.
		name: String,
	},
	/// Reference field still held a raw table index during traversal.
	#[error("{class}.{field} holds unresolved index {raw}; resolve references before flattening")]
	UnresolvedReference {
		/// Owning class name.
		class: String,
		/// Reference field.
		field: String,
		/// Raw value found in the slot.
		raw: String,
	},
	/// Encoder was handed a value of the wrong variant for the field kind.
	#[error("value kind mismatch: expected {expected}, got {got}")]
	ValueKindMismatch {
		/// Expected value variant.
		expected: &'static str,
		/// Actual value variant.
		got: &'static str,
	},
	/// A value, or the natural width of its kind, does not fit the field's declared size.
	#[error("{kind} value needs {needed} bytes, field declares {declared}")]
	DeclaredSizeMismatch {
		/// Field kind being encoded or decoded.
		kind: FieldKind,
		/// Declared field size.
		declared: usize,
		/// Bytes the value occupies.
		needed: usize,
	},
	/// Field slot held a single value where an array was declared, or the reverse.
	#[error("{class}.{field} shape mismatch (declared array={array})")]
	FieldShapeMismatch {
		/// Owning class name.
		class: String,
		/// Offending field.
		field: String,
		/// Declared array flag.
		array: bool,
	},
	/// Name-keyed accessor did not find the field.
	#[error("field {field} not found on {class}")]
	FieldNotFound {
		/// Class searched.
		class: String,
		/// Requested field name.
		field: String,
	},
	/// Value array length does not match the class field count.
	#[error("{class} expects {expected} values, got {got}")]
	ValueCountMismatch {
		/// Class name.
		class: String,
		/// Field count of the class.
		expected: usize,
		/// Number of values supplied.
		got: usize,
	},
	/// Arena handle does not address an instance.
	#[error("dangling instance handle {id}")]
	DanglingInstance {
		/// Raw arena slot.
		id: u32,
	},
	/// Raw table index lies outside the instance table.
	#[error("table index {index} out of range (table len {len})")]
	TableIndexOutOfRange {
		/// Raw index read from the data.
		index: i32,
		/// Instance table length.
		len: usize,
	},
	/// Recursive traversal exceeded the depth ceiling (usually a cycle).
	#[error("graph depth exceeded (max={max_depth})")]
	GraphDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Re-encoded bytes differ from the source.
	#[error("round trip mismatch at byte offset {at}")]
	RoundTripMismatch {
		/// First differing absolute offset.
		at: usize,
	},
	/// CLI argument was invalid.
	#[error("invalid argument {name}: {value}")]
	InvalidArgument {
		/// Argument name.
		name: &'static str,
		/// User-provided value.
		value: String,
	},
}
