//! Fixed-layout geometry and identity payloads.
//!
//! Every component is little-endian with no padding between components; any
//! trailing padding comes from the owning field's declared size.

use std::fmt;

use crate::rsz::bytes::{Cursor, FixedLayout, Writer};
use crate::rsz::Result;

macro_rules! float_struct {
	($(#[$meta:meta])* $name:ident { $($field:ident),+ }) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Default)]
		pub struct $name {
			$(
				#[doc = concat!("`", stringify!($field), "` component.")]
				pub $field: f32,
			)+
		}

		impl FixedLayout for $name {
			const SIZE: usize = 4 * [$(stringify!($field)),+].len();

			fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
				Ok(Self { $($field: cursor.read_f32()?),+ })
			}

			fn write(&self, writer: &mut Writer) {
				$(writer.write_f32(self.$field);)+
			}
		}
	};
}

float_struct!(
	/// Two-component vector.
	Vec2 { x, y }
);
float_struct!(
	/// Three-component vector.
	Vec3 { x, y, z }
);
float_struct!(
	/// Four-component vector.
	Vec4 { x, y, z, w }
);
float_struct!(
	/// Rotation quaternion.
	Quaternion { x, y, z, w }
);
float_struct!(
	/// Closed float interval.
	Range { min, max }
);

/// Row-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat4 {
	/// Sixteen components in storage order.
	pub m: [f32; 16],
}

impl FixedLayout for Mat4 {
	const SIZE: usize = 64;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let mut m = [0.0_f32; 16];
		for item in &mut m {
			*item = cursor.read_f32()?;
		}
		Ok(Self { m })
	}

	fn write(&self, writer: &mut Writer) {
		for item in self.m {
			writer.write_f32(item);
		}
	}
}

/// Oriented bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Obb {
	/// Box transform.
	pub coord: Mat4,
	/// Half extents along the box axes.
	pub extent: Vec3,
}

impl FixedLayout for Obb {
	const SIZE: usize = Mat4::SIZE + Vec3::SIZE;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			coord: Mat4::read(cursor)?,
			extent: Vec3::read(cursor)?,
		})
	}

	fn write(&self, writer: &mut Writer) {
		self.coord.write(writer);
		self.extent.write(writer);
	}
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
	/// Minimum corner.
	pub min: Vec3,
	/// Maximum corner.
	pub max: Vec3,
}

impl FixedLayout for Aabb {
	const SIZE: usize = 2 * Vec3::SIZE;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			min: Vec3::read(cursor)?,
			max: Vec3::read(cursor)?,
		})
	}

	fn write(&self, writer: &mut Writer) {
		self.min.write(writer);
		self.max.write(writer);
	}
}

/// Bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
	/// Center point.
	pub center: Vec3,
	/// Radius.
	pub radius: f32,
}

impl FixedLayout for Sphere {
	const SIZE: usize = Vec3::SIZE + 4;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			center: Vec3::read(cursor)?,
			radius: cursor.read_f32()?,
		})
	}

	fn write(&self, writer: &mut Writer) {
		self.center.write(writer);
		writer.write_f32(self.radius);
	}
}

/// Capsule between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Capsule {
	/// First end point.
	pub p0: Vec3,
	/// Second end point.
	pub p1: Vec3,
	/// Radius.
	pub radius: f32,
}

impl FixedLayout for Capsule {
	const SIZE: usize = 2 * Vec3::SIZE + 4;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self {
			p0: Vec3::read(cursor)?,
			p1: Vec3::read(cursor)?,
			radius: cursor.read_f32()?,
		})
	}

	fn write(&self, writer: &mut Writer) {
		self.p0.write(writer);
		self.p1.write(writer);
		writer.write_f32(self.radius);
	}
}

/// Quad footprint extruded between `bottom` and `bottom + height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Area {
	/// Footprint corners.
	pub points: [Vec2; 4],
	/// Extrusion height.
	pub height: f32,
	/// Base elevation.
	pub bottom: f32,
}

impl FixedLayout for Area {
	const SIZE: usize = 4 * Vec2::SIZE + 8;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let mut points = [Vec2::default(); 4];
		for point in &mut points {
			*point = Vec2::read(cursor)?;
		}
		Ok(Self {
			points,
			height: cursor.read_f32()?,
			bottom: cursor.read_f32()?,
		})
	}

	fn write(&self, writer: &mut Writer) {
		for point in &self.points {
			point.write(writer);
		}
		writer.write_f32(self.height);
		writer.write_f32(self.bottom);
	}
}

/// RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha.
	pub a: u8,
}

impl FixedLayout for Color {
	const SIZE: usize = 4;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let [r, g, b, a] = cursor.read_array()?;
		Ok(Self { r, g, b, a })
	}

	fn write(&self, writer: &mut Writer) {
		writer.write_bytes(&[self.r, self.g, self.b, self.a]);
	}
}

/// Raw 16-byte GUID in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid(pub [u8; 16]);

impl FixedLayout for Guid {
	const SIZE: usize = 16;

	fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		Ok(Self(cursor.read_array()?))
	}

	fn write(&self, writer: &mut Writer) {
		writer.write_bytes(&self.0);
	}
}

impl fmt::Display for Guid {
	/// Renders the mixed-endian `8-4-4-4-12` form (first three groups little-endian).
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let b = &self.0;
		write!(
			f,
			"{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
			u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
			u16::from_le_bytes([b[4], b[5]]),
			u16::from_le_bytes([b[6], b[7]]),
			b[8],
			b[9],
			b[10],
			b[11],
			b[12],
			b[13],
			b[14],
			b[15]
		)
	}
}
