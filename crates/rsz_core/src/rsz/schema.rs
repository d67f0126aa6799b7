use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock, OnceLock};

use serde::Deserialize;

use crate::rsz::compression::{MAX_SCHEMA_BYTES, schema_json_bytes};
use crate::rsz::{FieldKind, Result, RszError};

/// One field declaration of an RSZ class.
///
/// Everything is immutable except the kind, which a `Data` field may have
/// rewritten once by type inference. The rewrite lands on the shared
/// declaration, so every later instance of the class sees it. `OnceLock` makes
/// the first writer win, but reads racing the first inference pass of a class
/// still need outside serialization to agree on which raw value decided it.
#[derive(Debug, Clone)]
pub struct RszField {
	/// Field name, unique within its class.
	pub name: Box<str>,
	declared: FieldKind,
	inferred: OnceLock<FieldKind>,
	/// Bytes per element.
	pub size: usize,
	/// Element alignment in bytes.
	pub align: usize,
	/// Field stores a length-prefixed sequence.
	pub array: bool,
	/// Field is eligible for runtime kind inference.
	pub native: bool,
	/// Source type name; names the element class of `Object` arrays.
	pub original_type: Box<str>,
}

impl RszField {
	/// Declare a scalar, non-native field.
	pub fn new(name: &str, kind: FieldKind, size: usize, align: usize) -> Self {
		Self {
			name: name.into(),
			declared: kind,
			inferred: OnceLock::new(),
			size,
			align,
			array: false,
			native: false,
			original_type: "".into(),
		}
	}

	/// Mark the field as an array.
	pub fn with_array(mut self) -> Self {
		self.array = true;
		self
	}

	/// Mark the field as eligible for inference.
	pub fn with_native(mut self) -> Self {
		self.native = true;
		self
	}

	/// Set the source type name.
	pub fn with_original_type(mut self, original_type: &str) -> Self {
		self.original_type = original_type.into();
		self
	}

	/// Effective kind: the inferred kind once decided, else the declared one.
	pub fn kind(&self) -> FieldKind {
		self.inferred.get().copied().unwrap_or(self.declared)
	}

	/// Kind as written in the schema.
	pub fn declared_kind(&self) -> FieldKind {
		self.declared
	}

	/// Whether inference has rewritten this field.
	pub fn is_inferred(&self) -> bool {
		self.inferred.get().is_some()
	}

	/// Record an inferred kind; returns the kind that won if one was already set.
	pub(crate) fn set_inferred(&self, kind: FieldKind) -> FieldKind {
		*self.inferred.get_or_init(|| kind)
	}

	/// Whether values are length-prefixed strings.
	pub fn is_string(&self) -> bool {
		self.kind().is_string()
	}

	/// Whether values reference other instances.
	pub fn is_reference(&self) -> bool {
		self.kind().is_reference()
	}

	/// Source type name, falling back to the kind name.
	pub fn display_type(&self) -> &str {
		if self.original_type.is_empty() { self.kind().as_str() } else { &self.original_type }
	}
}

/// One RSZ class declaration.
#[derive(Debug, Clone)]
pub struct RszClass {
	/// Fully qualified class name.
	pub name: Box<str>,
	/// Type id the schema dump keys this class by.
	pub type_id: u32,
	/// Schema checksum; `0` only for the NULL class.
	pub crc: u32,
	/// Field declarations in storage order.
	pub fields: Vec<RszField>,
}

static NULL_CLASS: LazyLock<Arc<RszClass>> = LazyLock::new(|| {
	Arc::new(RszClass {
		name: "NULL".into(),
		type_id: 0,
		crc: 0,
		fields: Vec::new(),
	})
});

impl RszClass {
	/// Build a class declaration.
	pub fn new(name: &str, crc: u32, fields: Vec<RszField>) -> Self {
		Self {
			name: name.into(),
			type_id: 0,
			crc,
			fields,
		}
	}

	/// Shared zero-field class backing the NULL instance.
	pub fn null() -> Arc<RszClass> {
		Arc::clone(&NULL_CLASS)
	}

	/// Whether this is the NULL class.
	pub fn is_null(&self) -> bool {
		self.crc == 0
	}

	/// Position of a field by name.
	pub fn index_of_field(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|field| field.name.as_ref() == name)
	}
}

/// Name-based class lookup consumed by instance construction.
pub trait ClassRegistry {
	/// Resolve a class by fully qualified name.
	fn class_by_name(&self, name: &str) -> Option<Arc<RszClass>>;
}

/// Class registry loaded from an RSZ schema dump.
#[derive(Debug, Clone, Default)]
pub struct Schema {
	classes: Vec<Arc<RszClass>>,
	by_name: HashMap<Box<str>, usize>,
	by_type_id: HashMap<u32, usize>,
}

impl Schema {
	/// Index an explicit class list. The first class wins on duplicate names.
	pub fn from_classes(classes: Vec<RszClass>) -> Self {
		let classes: Vec<Arc<RszClass>> = classes.into_iter().map(Arc::new).collect();
		let mut by_name = HashMap::new();
		let mut by_type_id = HashMap::new();
		for (idx, class) in classes.iter().enumerate() {
			by_name.entry(class.name.clone()).or_insert(idx);
			if class.type_id != 0 {
				by_type_id.entry(class.type_id).or_insert(idx);
			}
		}

		Self {
			classes,
			by_name,
			by_type_id,
		}
	}

	/// Parse schema dump JSON: an object keyed by hex type id.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
		let raw: BTreeMap<String, RawClass> = serde_json::from_slice(bytes)?;
		let mut classes = Vec::with_capacity(raw.len());
		for (key, item) in raw {
			classes.push(item.into_class(&key)?);
		}
		Ok(Self::from_classes(classes))
	}

	/// Load a schema dump from disk, transparently handling zstd compression.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		let (_, bytes) = schema_json_bytes(raw, MAX_SCHEMA_BYTES)?;
		Self::from_json_slice(&bytes)
	}

	/// All classes in load order.
	pub fn classes(&self) -> &[Arc<RszClass>] {
		&self.classes
	}

	/// Number of classes.
	pub fn len(&self) -> usize {
		self.classes.len()
	}

	/// Whether the schema holds no classes.
	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}

	/// Look up a class by exact name.
	pub fn get_by_name(&self, name: &str) -> Option<&Arc<RszClass>> {
		let idx = self.by_name.get(name)?;
		self.classes.get(*idx)
	}

	/// Look up a class by type id.
	pub fn get_by_type_id(&self, type_id: u32) -> Option<&Arc<RszClass>> {
		let idx = self.by_type_id.get(&type_id)?;
		self.classes.get(*idx)
	}
}

impl ClassRegistry for Schema {
	fn class_by_name(&self, name: &str) -> Option<Arc<RszClass>> {
		self.get_by_name(name).cloned()
	}
}

#[derive(Deserialize)]
struct RawClass {
	name: String,
	crc: String,
	#[serde(default)]
	fields: Vec<RawField>,
}

#[derive(Deserialize)]
struct RawField {
	name: String,
	#[serde(rename = "type")]
	kind: String,
	size: usize,
	align: usize,
	#[serde(default)]
	array: bool,
	#[serde(default)]
	native: bool,
	#[serde(default)]
	original_type: String,
}

impl RawClass {
	fn into_class(self, key: &str) -> Result<RszClass> {
		let type_id = parse_hex(key).ok_or_else(|| invalid(key, format!("type id {key:?} is not hex")))?;
		let crc = parse_hex(&self.crc).ok_or_else(|| invalid(key, format!("crc {:?} is not hex", self.crc)))?;

		let mut fields = Vec::with_capacity(self.fields.len());
		for raw in self.fields {
			if raw.align == 0 || !raw.align.is_power_of_two() {
				return Err(invalid(key, format!("field {} has alignment {}", raw.name, raw.align)));
			}
			fields.push(RszField {
				name: raw.name.into_boxed_str(),
				declared: FieldKind::parse(&raw.kind),
				inferred: OnceLock::new(),
				size: raw.size,
				align: raw.align,
				array: raw.array,
				native: raw.native,
				original_type: raw.original_type.into_boxed_str(),
			});
		}

		Ok(RszClass {
			name: self.name.into_boxed_str(),
			type_id,
			crc,
			fields,
		})
	}
}

fn parse_hex(value: &str) -> Option<u32> {
	let digits = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")).unwrap_or(value);
	u32::from_str_radix(digits, 16).ok()
}

fn invalid(key: &str, detail: String) -> RszError {
	RszError::SchemaInvalid { key: key.to_owned(), detail }
}
