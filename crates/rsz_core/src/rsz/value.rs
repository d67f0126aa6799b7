use std::fmt;

use crate::rsz::InstanceId;
use crate::rsz::geom::{Aabb, Area, Capsule, Color, Guid, Mat4, Obb, Quaternion, Range, Sphere, Vec2, Vec3, Vec4};

/// One decoded leaf value or instance reference.
///
/// Reference fields hold `Index` straight after a read and `Instance` once the
/// owning table has been resolved; never both for the same slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// `Bool`.
	Bool(bool),
	/// `S8`.
	S8(i8),
	/// `U8`.
	U8(u8),
	/// `S16`.
	S16(i16),
	/// `U16`.
	U16(u16),
	/// `S32`.
	S32(i32),
	/// `U32`.
	U32(u32),
	/// `S64`.
	S64(i64),
	/// `U64`.
	U64(u64),
	/// `F32`, bit pattern preserved.
	F32(f32),
	/// `F64`, bit pattern preserved.
	F64(f64),
	/// `String` or `Resource`.
	String(String),
	/// Raw `Data` bytes.
	Data(Vec<u8>),
	/// `Vec2` or `Float2`.
	Vec2(Vec2),
	/// `Vec3` or `Float3`.
	Vec3(Vec3),
	/// `Vec4` or `Float4`.
	Vec4(Vec4),
	/// `Quaternion`.
	Quaternion(Quaternion),
	/// `Mat4`.
	Mat4(Mat4),
	/// `Color`.
	Color(Color),
	/// `OBB`.
	Obb(Obb),
	/// `AABB`.
	Aabb(Aabb),
	/// `Sphere`.
	Sphere(Sphere),
	/// `Capsule`.
	Capsule(Capsule),
	/// `Area`.
	Area(Area),
	/// `Range`.
	Range(Range),
	/// `Guid` or `GameObjectRef`.
	Guid(Guid),
	/// Unresolved instance-table index.
	Index(i32),
	/// Resolved reference to an arena instance.
	Instance(InstanceId),
}

impl Value {
	/// Stable variant label used in diagnostics.
	pub fn kind_label(&self) -> &'static str {
		match self {
			Self::Bool(_) => "Bool",
			Self::S8(_) => "S8",
			Self::U8(_) => "U8",
			Self::S16(_) => "S16",
			Self::U16(_) => "U16",
			Self::S32(_) => "S32",
			Self::U32(_) => "U32",
			Self::S64(_) => "S64",
			Self::U64(_) => "U64",
			Self::F32(_) => "F32",
			Self::F64(_) => "F64",
			Self::String(_) => "String",
			Self::Data(_) => "Data",
			Self::Vec2(_) => "Vec2",
			Self::Vec3(_) => "Vec3",
			Self::Vec4(_) => "Vec4",
			Self::Quaternion(_) => "Quaternion",
			Self::Mat4(_) => "Mat4",
			Self::Color(_) => "Color",
			Self::Obb(_) => "Obb",
			Self::Aabb(_) => "Aabb",
			Self::Sphere(_) => "Sphere",
			Self::Capsule(_) => "Capsule",
			Self::Area(_) => "Area",
			Self::Range(_) => "Range",
			Self::Guid(_) => "Guid",
			Self::Index(_) => "Index",
			Self::Instance(_) => "Instance",
		}
	}

	/// Return the resolved instance handle, if any.
	pub fn as_instance(&self) -> Option<InstanceId> {
		match self {
			Self::Instance(id) => Some(*id),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::S8(v) => write!(f, "{v}"),
			Self::U8(v) => write!(f, "{v}"),
			Self::S16(v) => write!(f, "{v}"),
			Self::U16(v) => write!(f, "{v}"),
			Self::S32(v) => write!(f, "{v}"),
			Self::U32(v) => write!(f, "{v}"),
			Self::S64(v) => write!(f, "{v}"),
			Self::U64(v) => write!(f, "{v}"),
			Self::F32(v) => write!(f, "{v}"),
			Self::F64(v) => write!(f, "{v}"),
			Self::String(v) => write!(f, "{v:?}"),
			Self::Data(v) => write!(f, "bytes[{}]", v.len()),
			Self::Vec2(v) => write!(f, "({}, {})", v.x, v.y),
			Self::Vec3(v) => write!(f, "{}", Xyz(v)),
			Self::Vec4(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
			Self::Quaternion(v) => write!(f, "({}, {}, {}, {})", v.x, v.y, v.z, v.w),
			Self::Mat4(v) => write!(f, "mat4{:?}", v.m),
			Self::Color(v) => write!(f, "#{:02x}{:02x}{:02x}{:02x}", v.r, v.g, v.b, v.a),
			Self::Obb(v) => write!(f, "obb(coord={:?}, extent={})", v.coord.m, Xyz(&v.extent)),
			Self::Aabb(v) => write!(f, "aabb({}, {})", Xyz(&v.min), Xyz(&v.max)),
			Self::Sphere(v) => write!(f, "sphere({}, r={})", Xyz(&v.center), v.radius),
			Self::Capsule(v) => write!(f, "capsule({}, {}, r={})", Xyz(&v.p0), Xyz(&v.p1), v.radius),
			Self::Area(v) => {
				let [a, b, c, d] = &v.points;
				write!(
					f,
					"area([({}, {}), ({}, {}), ({}, {}), ({}, {})], height={}, bottom={})",
					a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y, v.height, v.bottom
				)
			}
			Self::Range(v) => write!(f, "[{}, {}]", v.min, v.max),
			Self::Guid(v) => write!(f, "{v}"),
			Self::Index(v) => write!(f, "{v}"),
			Self::Instance(v) => write!(f, "{v}"),
		}
	}
}

struct Xyz<'a>(&'a Vec3);

impl fmt::Display for Xyz<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
	}
}

/// Contents of one field slot on an instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	/// Non-array field.
	Single(Value),
	/// Array field, in element order.
	Array(Vec<Value>),
}

impl FieldValue {
	/// Iterate the slot's values (one for `Single`, each element for `Array`).
	pub fn values(&self) -> std::slice::Iter<'_, Value> {
		match self {
			Self::Single(value) => std::slice::from_ref(value).iter(),
			Self::Array(items) => items.iter(),
		}
	}

	/// Iterate the slot's values mutably.
	pub fn values_mut(&mut self) -> std::slice::IterMut<'_, Value> {
		match self {
			Self::Single(value) => std::slice::from_mut(value).iter_mut(),
			Self::Array(items) => items.iter_mut(),
		}
	}
}
