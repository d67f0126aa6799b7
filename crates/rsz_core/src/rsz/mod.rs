mod bytes;
mod clone;
mod codec;
mod compression;
mod create;
mod error;
mod flatten;
mod geom;
mod graph;
mod infer;
mod instance;
mod kind;
mod schema;
mod stringify;
mod table;
mod value;

/// Binary cursor, writer, and fixed-layout trait.
pub use bytes::{Cursor, FixedLayout, Writer};
/// Graph-aware deep cloning.
pub use clone::{CloneCache, clone_instance, clone_instance_cached, clone_into, structurally_equal};
/// Table-driven per-kind value codec.
pub use codec::{decode_value, default_value, encode_value, natural_size};
/// Schema dump storage detection and unwrapping.
pub use compression::{Compression, MAX_SCHEMA_BYTES, ZSTD_MAGIC, schema_json_bytes};
/// Default instance and array element construction.
pub use create::{create_array_item, create_instance, default_field_value, element_type_name};
/// Error and result aliases.
pub use error::{Result, RszError};
/// Post-order graph linearization.
pub use flatten::{Flatten, flatten};
/// Geometry and identifier structs carried by field values.
pub use geom::{Aabb, Area, Capsule, Color, Guid, Mat4, Obb, Quaternion, Range, Sphere, Vec2, Vec3, Vec4};
/// Instance arena and handles.
pub use graph::{InstanceGraph, InstanceId, MAX_GRAPH_DEPTH};
/// Runtime kind inference for ambiguous `Data` fields.
pub use infer::{InferenceOptions, classify, needs_inference, plausible_f32, reinterpret};
/// Instance model and per-instance binary read/write.
pub use instance::{Instance, ReadOptions, UserDataRef, read_instance, write_instance};
/// Field value kinds.
pub use kind::FieldKind;
/// Class and field declarations plus the schema registry.
pub use schema::{ClassRegistry, RszClass, RszField, Schema};
/// Indented text dump of instance graphs.
pub use stringify::{StringifyOptions, stringify};
/// Whole-table read, reference resolution, rebuild, and write.
pub use table::{read_instances, rebuild_table, resolve_references, write_table};
/// Decoded field value types.
pub use value::{FieldValue, Value};
