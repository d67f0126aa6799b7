use crate::rsz::bytes::{Cursor, FixedLayout, Writer};
use crate::rsz::geom::{Aabb, Area, Capsule, Color, Guid, Mat4, Obb, Quaternion, Range, Sphere, Vec2, Vec3, Vec4};
use crate::rsz::{FieldKind, Result, RszError, Value};

/// Codec entry for one fixed-layout kind.
///
/// Decode, encode, natural width, and default value come from one table row so
/// they cannot drift apart.
#[derive(Clone, Copy)]
pub(crate) struct KindCodec {
	pub natural_size: usize,
	pub decode: fn(&mut Cursor<'_>) -> Result<Value>,
	pub encode: fn(&Value, &mut Writer) -> Result<()>,
	pub default: fn() -> Value,
}

macro_rules! codec_table {
	($($kind:ident => $variant:ident($ty:ty)),* $(,)?) => {
		fn fixed_codec(kind: FieldKind) -> Option<KindCodec> {
			match kind {
				$(
					FieldKind::$kind => Some(KindCodec {
						natural_size: <$ty as FixedLayout>::SIZE,
						decode: |cursor| Ok(Value::$variant(<$ty as FixedLayout>::read(cursor)?)),
						encode: |value, writer| match value {
							Value::$variant(item) => {
								item.write(writer);
								Ok(())
							}
							other => Err(RszError::ValueKindMismatch {
								expected: stringify!($variant),
								got: other.kind_label(),
							}),
						},
						default: || Value::$variant(<$ty>::default()),
					}),
				)*
				_ => None,
			}
		}
	};
}

codec_table! {
	S8 => S8(i8),
	U8 => U8(u8),
	S16 => S16(i16),
	U16 => U16(u16),
	S32 => S32(i32),
	U32 => U32(u32),
	S64 => S64(i64),
	U64 => U64(u64),
	F32 => F32(f32),
	F64 => F64(f64),
	Bool => Bool(bool),
	Vec2 => Vec2(Vec2),
	Float2 => Vec2(Vec2),
	Vec3 => Vec3(Vec3),
	Float3 => Vec3(Vec3),
	Vec4 => Vec4(Vec4),
	Float4 => Vec4(Vec4),
	Quaternion => Quaternion(Quaternion),
	Mat4 => Mat4(Mat4),
	Color => Color(Color),
	Obb => Obb(Obb),
	Aabb => Aabb(Aabb),
	Sphere => Sphere(Sphere),
	Capsule => Capsule(Capsule),
	Area => Area(Area),
	Range => Range(Range),
	Guid => Guid(Guid),
	GameObjectRef => Guid(Guid),
	Object => Index(i32),
	UserData => Index(i32),
}

fn lookup(kind: FieldKind) -> Result<KindCodec> {
	fixed_codec(kind).ok_or(RszError::UnsupportedKind { kind })
}

/// Natural encoded width of one value of `kind`, ignoring declared padding.
///
/// Strings report their 4-byte length prefix; `Data` reports `size`.
pub fn natural_size(kind: FieldKind, size: usize) -> Result<usize> {
	match kind {
		FieldKind::String | FieldKind::Resource => Ok(4),
		FieldKind::Data => Ok(size),
		_ => lookup(kind).map(|codec| codec.natural_size),
	}
}

/// Decode one value of `kind`, leaving the cursor exactly `size` bytes past the start.
///
/// Strings are framed by their own length prefix instead of `size`. A declared
/// size narrower than the kind is tolerated; the cursor still lands on `size`.
pub fn decode_value(kind: FieldKind, size: usize, cursor: &mut Cursor<'_>) -> Result<Value> {
	match kind {
		FieldKind::String | FieldKind::Resource => decode_string(cursor),
		FieldKind::Data => Ok(Value::Data(cursor.read_exact(size)?.to_vec())),
		_ => {
			let codec = lookup(kind)?;
			let start = cursor.pos();
			let value = (codec.decode)(cursor)?;
			cursor.seek(start + size)?;
			Ok(value)
		}
	}
}

/// Encode one value of `kind`, returning the number of bytes the value occupies.
///
/// Fixed-layout kinds always occupy exactly `size` bytes: short payloads are
/// zero padded. A kind wider than `size`, or `Data` of any other length, fails
/// with `DeclaredSizeMismatch` since the overflow would land in the next field.
/// Reference kinds expect a raw `Index`; resolve instances first.
pub fn encode_value(kind: FieldKind, size: usize, value: &Value, writer: &mut Writer) -> Result<usize> {
	let start = writer.pos();
	match kind {
		FieldKind::String | FieldKind::Resource => encode_string(value, writer)?,
		FieldKind::Data => {
			let Value::Data(bytes) = value else {
				return Err(RszError::ValueKindMismatch {
					expected: "Data",
					got: value.kind_label(),
				});
			};
			if bytes.len() != size {
				return Err(RszError::DeclaredSizeMismatch {
					kind,
					declared: size,
					needed: bytes.len(),
				});
			}
			writer.write_bytes(bytes);
		}
		_ => {
			let codec = lookup(kind)?;
			check_fits(kind, codec.natural_size, size)?;
			(codec.encode)(value, writer)?;
			writer.seek(start + size);
		}
	}
	Ok(writer.pos() - start)
}

/// Zero value for `kind`; `Data` becomes `size` zero bytes.
pub fn default_value(kind: FieldKind, size: usize) -> Result<Value> {
	match kind {
		FieldKind::String | FieldKind::Resource => Ok(Value::String(String::new())),
		FieldKind::Data => Ok(Value::Data(vec![0_u8; size])),
		_ => lookup(kind).map(|codec| (codec.default)()),
	}
}

fn check_fits(kind: FieldKind, natural: usize, declared: usize) -> Result<()> {
	if natural > declared {
		return Err(RszError::DeclaredSizeMismatch { kind, declared, needed: natural });
	}
	Ok(())
}

fn decode_string(cursor: &mut Cursor<'_>) -> Result<Value> {
	let at = cursor.pos();
	let count = cursor.read_i32()?;
	let Ok(units) = usize::try_from(count) else {
		return Err(RszError::MalformedString { at, count });
	};

	let start = cursor.pos();
	let value = if units <= 1 {
		String::new()
	} else {
		let raw = cursor.read_exact(units * 2)?;
		let code_units: Vec<u16> = raw
			.chunks_exact(2)
			.map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
			.take_while(|unit| *unit != 0)
			.collect();
		String::from_utf16_lossy(&code_units)
	};
	cursor.seek(start + units * 2)?;
	Ok(Value::String(value))
}

fn encode_string(value: &Value, writer: &mut Writer) -> Result<()> {
	let Value::String(text) = value else {
		return Err(RszError::ValueKindMismatch {
			expected: "String",
			got: value.kind_label(),
		});
	};

	let units: Vec<u16> = text.encode_utf16().collect();
	let count = i32::try_from(units.len() + 1).map_err(|_| RszError::InvalidArgument {
		name: "string",
		value: format!("{} code units", units.len()),
	})?;
	writer.write_i32(count);
	for unit in units {
		writer.write_u16(unit);
	}
	writer.write_u16(0);
	Ok(())
}
