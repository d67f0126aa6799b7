use std::io::Read;

use crate::rsz::{Result, RszError};

/// Upper bound on the decompressed size of a schema dump.
pub const MAX_SCHEMA_BYTES: usize = 256 * 1024 * 1024;
/// zstd frame magic.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// How a schema dump was stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Plain JSON.
	None,
	/// zstd-compressed JSON.
	Zstd,
}

impl Compression {
	/// Detect the storage mode from the leading bytes.
	pub fn detect(raw: &[u8]) -> Self {
		if raw.starts_with(&ZSTD_MAGIC) { Self::Zstd } else { Self::None }
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Zstd => "zstd",
		}
	}
}

/// Unwrap a stored schema dump into plain JSON bytes.
///
/// zstd frames are decompressed up to `limit` bytes. A leading UTF-8 BOM is
/// dropped.
pub fn schema_json_bytes(raw: Vec<u8>, limit: usize) -> Result<(Compression, Vec<u8>)> {
	let compression = Compression::detect(&raw);
	let mut json = match compression {
		Compression::Zstd => decompress_capped(&raw, limit)?,
		Compression::None => raw,
	};
	if json.starts_with(&UTF8_BOM) {
		json.drain(..UTF8_BOM.len());
	}
	tracing::debug!(compression = compression.as_str(), bytes = json.len(), "loaded schema dump");
	Ok((compression, json))
}

fn decompress_capped(raw: &[u8], limit: usize) -> Result<Vec<u8>> {
	let decoder = zstd::stream::read::Decoder::new(raw)?;
	let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
	let mut out = Vec::new();
	decoder.take(cap).read_to_end(&mut out)?;
	if out.len() > limit {
		return Err(RszError::DecompressedTooLarge { limit });
	}
	Ok(out)
}
