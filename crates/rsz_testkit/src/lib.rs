//! Shared paths and scratch files for RSZ workspace tests.

use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	let root = manifest_dir.join("..").join("..");
	root.canonicalize().unwrap_or(root)
}

/// Path of a file under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Cargo target directory, honoring `CARGO_TARGET_DIR`.
pub fn target_dir() -> PathBuf {
	match std::env::var_os("CARGO_TARGET_DIR") {
		Some(dir) => PathBuf::from(dir),
		None => workspace_root().join("target"),
	}
}

/// Write `bytes` to a per-test scratch file under the target directory and return its path.
pub fn scratch_file(name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("rsz-scratch");
	std::fs::create_dir_all(&dir).expect("scratch dir creates");
	let path = dir.join(name);
	std::fs::write(&path, bytes).expect("scratch file writes");
	path
}

/// Parse a JSON fixture into a dynamic value.
pub fn load_json(name: &str) -> serde_json::Value {
	let raw = std::fs::read(fixture_path(name)).expect("fixture reads");
	serde_json::from_slice(&raw).expect("fixture is valid json")
}
