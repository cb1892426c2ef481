//! Build script for the storefront crate.
//!
//! Fingerprints `static/css/main.css` so the stylesheet can be served with
//! an immutable cache lifetime.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex characters kept from the digest.
const HASH_LEN: usize = 8;

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR is not set, skipping CSS hash");
        println!("cargo:rustc-env=CSS_HASH=");
        return;
    };
    let static_dir = Path::new(&manifest_dir).join("static");
    let css_path = static_dir.join("css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let hash = match fs::read(&css_path) {
        Ok(content) => short_hash(&content),
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            String::new()
        }
    };

    println!("cargo:rustc-env=CSS_HASH={hash}");

    if hash.is_empty() {
        return;
    }

    match publish_css(&css_path, &static_dir.join("css/derived"), &hash) {
        Ok(path) => println!("cargo:warning=CSS published as {}", path.display()),
        Err(e) => println!("cargo:warning=Could not publish hashed CSS: {e}"),
    }
}

/// First `HASH_LEN` hex characters of the SHA-256 digest.
fn short_hash(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut hash = format!("{digest:x}");
    hash.truncate(HASH_LEN);
    hash
}

/// Copy the stylesheet to `derived/main.<hash>.css`.
fn publish_css(css_path: &Path, derived_dir: &Path, hash: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(derived_dir)?;
    let derived_path = derived_dir.join(format!("main.{hash}.css"));
    fs::copy(css_path, &derived_path)?;
    Ok(derived_path)
}
