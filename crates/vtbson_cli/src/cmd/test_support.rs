use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

pub(crate) use vtbson_testkit::fixture_path;

static VTBSON_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_vtbson(args: &[&str]) -> Output {
	Command::new(vtbson_bin()).args(args).output().expect("vtbson command executes")
}

pub(crate) fn run_vtbson_json(args: &[&str]) -> serde_json::Value {
	let output = run_vtbson(args);
	assert!(
		output.status.success(),
		"vtbson command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

/// Fresh path under the system temp dir, unique per process and test name.
pub(crate) fn temp_path(name: &str) -> PathBuf {
	std::env::temp_dir().join(format!("vtbson-{}-{name}", std::process::id()))
}

fn vtbson_bin() -> &'static PathBuf {
	VTBSON_BIN.get_or_init(resolve_vtbson_bin)
}

fn resolve_vtbson_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_vtbson") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let mut bin = vtbson_testkit::target_dir().join("debug");
	bin.push(if cfg!(windows) { "vtbson.exe" } else { "vtbson" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "vtbson"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build vtbson binary at {}", bin.display());

	bin
}
