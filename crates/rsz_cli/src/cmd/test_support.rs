//! Helpers for driving the `rsz` binary against the sample schema.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use rsz_testkit::{fixture_path, scratch_file, target_dir};

/// Class order `rsz new <schema> app.Root` writes its object table in.
pub(crate) const SAMPLE_ROOT_TABLE: [&str; 4] = ["NULL", "app.Leaf", "app.Child", "app.Root"];

static RSZ_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Captured output of an `rsz` run that exited non-zero.
pub(crate) struct Failure {
	pub stdout: String,
	pub stderr: String,
}

pub(crate) fn sample_schema() -> String {
	fixture_path("rsz_sample.json").to_string_lossy().into_owned()
}

pub(crate) fn scratch_arg(name: &str, bytes: &[u8]) -> String {
	scratch_file(name, bytes).to_string_lossy().into_owned()
}

/// Build a default graph for `class` with `rsz new --out` and return the data file path.
pub(crate) fn created_data(name: &str, class: &str) -> String {
	let out = scratch_arg(name, &[]);
	run_rsz_json(&["new", &sample_schema(), class, "--out", &out, "--json"]);
	out
}

/// `args` followed by one `--class <name>` pair per entry.
pub(crate) fn with_classes<'a>(args: &[&'a str], classes: &[&'a str]) -> Vec<&'a str> {
	let mut all = args.to_vec();
	for &class in classes {
		all.extend(["--class", class]);
	}
	all
}

pub(crate) fn run_rsz(args: &[&str]) -> Output {
	Command::new(rsz_bin()).args(args).output().expect("rsz command executes")
}

pub(crate) fn run_rsz_json(args: &[&str]) -> serde_json::Value {
	let output = run_rsz(args);
	assert!(
		output.status.success(),
		"rsz {args:?} failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

pub(crate) fn run_rsz_text(args: &[&str]) -> String {
	let output = run_rsz(args);
	assert!(output.status.success(), "rsz {args:?} failed: {}", String::from_utf8_lossy(&output.stderr));
	String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Run `rsz` and require a non-zero exit.
pub(crate) fn run_rsz_failure(args: &[&str]) -> Failure {
	let output = run_rsz(args);
	assert!(!output.status.success(), "rsz {args:?} unexpectedly succeeded");
	Failure {
		stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
		stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
	}
}

fn rsz_bin() -> &'static PathBuf {
	RSZ_BIN.get_or_init(locate_rsz_bin)
}

fn locate_rsz_bin() -> PathBuf {
	if let Some(path) = option_env!("CARGO_BIN_EXE_rsz") {
		return PathBuf::from(path);
	}

	let mut build = Command::new("cargo");
	build.current_dir(env!("CARGO_MANIFEST_DIR")).args(["build", "--quiet", "--bin", "rsz"]);
	if !cfg!(debug_assertions) {
		build.arg("--release");
	}
	let status = build.status().expect("cargo build executes");
	assert!(status.success(), "cargo build --bin rsz failed");

	let exe_name = if cfg!(windows) { "rsz.exe" } else { "rsz" };
	// Unit test executables live in `<profile>/deps`; the binary sits one level up.
	let profile_dir = std::env::current_exe()
		.ok()
		.and_then(|exe| exe.parent().and_then(|deps| deps.parent()).map(PathBuf::from))
		.unwrap_or_else(|| target_dir().join("debug"));
	let bin = profile_dir.join(exe_name);
	assert!(bin.is_file(), "rsz binary missing at {}", bin.display());
	bin
}
