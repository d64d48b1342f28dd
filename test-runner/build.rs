use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use serde::Deserialize;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");

    generate_link_manifest();
}

// rustc drops a dependency that no code refers to before the linker ever
// sees it, and its registration section goes with it.
// see https://github.com/rust-lang/rust/issues/133491#issue-2694064193
fn generate_link_manifest() {
    let dependencies = collect_local_dependencies();
    let manifest = generate_link_manifest_string(&dependencies);

    let out_dir = std::env::var("OUT_DIR").unwrap();
    let dest_path = PathBuf::from(out_dir).join("generated.rs");

    generate_file(&dest_path, manifest.as_bytes());
}

fn collect_local_dependencies() -> Vec<Dependency> {
    let current_crate_name = std::env::var("CARGO_PKG_NAME").unwrap();
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();

    let command = std::process::Command::new(std::env::var("CARGO").unwrap_or("cargo".into()))
        .args([
            "metadata",
            "--offline",
            "--no-deps",
            "--format-version",
            "1",
        ])
        .current_dir(&manifest_dir)
        .output()
        .expect("Failed to get workspace members");

    let output = String::from_utf8_lossy(&command.stdout);

    let metadata: WorkspaceMetadata =
        serde_json::from_str(&output).expect("Failed to parse JSON output");

    // Select current package
    let current_package = metadata
        .packages
        .iter()
        .find(|pkg| pkg.name == current_crate_name)
        .expect("Current package not found");

    current_package
        .dependencies
        .iter()
        .filter(|d| d.path.is_some() && d.target.is_none() && d.kind.is_none())
        .cloned()
        .collect()
}

fn generate_link_manifest_string(crates: &[Dependency]) -> String {
    let imports = crates
        .iter()
        .map(|d| {
            format!(
                "    extern crate {};",
                d.rename.as_ref().unwrap_or(&d.name).replace('-', "_")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"
#[doc(hidden)]
#[rustfmt::skip]
mod _generated {{
{imports}
}}"#,
    )
}

fn generate_file<P: AsRef<Path>>(path: P, text: &[u8]) {
    let mut file = File::create(path).unwrap();
    file.write_all(text).unwrap()
}

#[derive(Deserialize)]
struct WorkspaceMetadata {
    packages: Vec<Package>,
}

#[derive(Deserialize, Clone)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Deserialize, Clone)]
struct Dependency {
    name: String,
    rename: Option<String>,
    path: Option<String>,
    target: Option<String>,
    /// `None` for normal dependencies, `"dev"` or `"build"` otherwise.
    kind: Option<String>,
}
