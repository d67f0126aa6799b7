use std::fmt;

/// Closed set of field value kinds named by RSZ class schemas.
///
/// Kinds from `Struct` onward are recognised by name so schemas load, but
/// have no codec entry; reading or writing them fails with `UnsupportedKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// Name not recognised.
	Unknown,
	/// Signed 8-bit integer.
	S8,
	/// Unsigned 8-bit integer.
	U8,
	/// Signed 16-bit integer.
	S16,
	/// Unsigned 16-bit integer.
	U16,
	/// Signed 32-bit integer.
	S32,
	/// Unsigned 32-bit integer.
	U32,
	/// Signed 64-bit integer.
	S64,
	/// Unsigned 64-bit integer.
	U64,
	/// IEEE-754 single.
	F32,
	/// IEEE-754 double.
	F64,
	/// One-byte boolean.
	Bool,
	/// Length-prefixed UTF-16 string.
	String,
	/// Length-prefixed UTF-16 resource path.
	Resource,
	/// Raw bytes of the declared field size.
	Data,
	/// Two f32 components.
	Vec2,
	/// Three f32 components.
	Vec3,
	/// Four f32 components.
	Vec4,
	/// Alias layout of `Vec2`.
	Float2,
	/// Alias layout of `Vec3`.
	Float3,
	/// Alias layout of `Vec4`.
	Float4,
	/// Rotation quaternion.
	Quaternion,
	/// 4x4 f32 matrix.
	Mat4,
	/// RGBA8 color.
	Color,
	/// Oriented bounding box.
	Obb,
	/// Axis-aligned bounding box.
	Aabb,
	/// Bounding sphere.
	Sphere,
	/// Capsule volume.
	Capsule,
	/// Extruded quad area.
	Area,
	/// Min/max f32 pair.
	Range,
	/// 16-byte GUID.
	Guid,
	/// GUID referencing a game object.
	GameObjectRef,
	/// Table index of another instance.
	Object,
	/// Table index of a user-data instance.
	UserData,
	/// Inline struct.
	Struct,
	/// Integer point.
	Point,
	/// f64 position.
	Position,
	/// Two i32 components.
	Int2,
	/// Three i32 components.
	Int3,
	/// Four i32 components.
	Int4,
	/// Integer rectangle.
	Rect,
}

const NAMES: &[(FieldKind, &str)] = &[
	(FieldKind::Unknown, "ukn_type"),
	(FieldKind::S8, "S8"),
	(FieldKind::U8, "U8"),
	(FieldKind::S16, "S16"),
	(FieldKind::U16, "U16"),
	(FieldKind::S32, "S32"),
	(FieldKind::U32, "U32"),
	(FieldKind::S64, "S64"),
	(FieldKind::U64, "U64"),
	(FieldKind::F32, "F32"),
	(FieldKind::F64, "F64"),
	(FieldKind::Bool, "Bool"),
	(FieldKind::String, "String"),
	(FieldKind::Resource, "Resource"),
	(FieldKind::Data, "Data"),
	(FieldKind::Vec2, "Vec2"),
	(FieldKind::Vec3, "Vec3"),
	(FieldKind::Vec4, "Vec4"),
	(FieldKind::Float2, "Float2"),
	(FieldKind::Float3, "Float3"),
	(FieldKind::Float4, "Float4"),
	(FieldKind::Quaternion, "Quaternion"),
	(FieldKind::Mat4, "Mat4"),
	(FieldKind::Color, "Color"),
	(FieldKind::Obb, "OBB"),
	(FieldKind::Aabb, "AABB"),
	(FieldKind::Sphere, "Sphere"),
	(FieldKind::Capsule, "Capsule"),
	(FieldKind::Area, "Area"),
	(FieldKind::Range, "Range"),
	(FieldKind::Guid, "Guid"),
	(FieldKind::GameObjectRef, "GameObjectRef"),
	(FieldKind::Object, "Object"),
	(FieldKind::UserData, "UserData"),
	(FieldKind::Struct, "Struct"),
	(FieldKind::Point, "Point"),
	(FieldKind::Position, "Position"),
	(FieldKind::Int2, "Int2"),
	(FieldKind::Int3, "Int3"),
	(FieldKind::Int4, "Int4"),
	(FieldKind::Rect, "Rect"),
];

impl FieldKind {
	/// Parse a schema type name; unrecognised names map to `Unknown`.
	pub fn parse(name: &str) -> Self {
		NAMES
			.iter()
			.find(|(_, label)| label.eq_ignore_ascii_case(name))
			.map(|(kind, _)| *kind)
			.unwrap_or(Self::Unknown)
	}

	/// Stable schema type name.
	pub fn as_str(self) -> &'static str {
		NAMES.iter().find(|(kind, _)| *kind == self).map(|(_, label)| *label).unwrap_or("ukn_type")
	}

	/// Whether values are length-prefixed strings.
	pub fn is_string(self) -> bool {
		matches!(self, Self::String | Self::Resource)
	}

	/// Whether values are table indices of other instances.
	pub fn is_reference(self) -> bool {
		matches!(self, Self::Object | Self::UserData)
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
