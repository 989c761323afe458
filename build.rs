use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest = Path::new(&out_dir).join("rustc_version.rs");
    fs::write(
        &dest,
        format!("pub const RUSTC_VERSION: &str = {:?};\n", version),
    )
    .expect("Failed to write rustc_version.rs");
    println!("cargo:rerun-if-changed=build.rs");
}
