// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

// Exposes the version reported by `/version` and `--version` as
// LINE_VAS_VERSION. A deploy pipeline may set LINE_VAS_BUILD to stamp its
// build number into the patch segment.

use std::env;

fn main() {
    let major = env::var("CARGO_PKG_VERSION_MAJOR").unwrap_or_default();
    let minor = env::var("CARGO_PKG_VERSION_MINOR").unwrap_or_default();
    let patch = match env::var("LINE_VAS_BUILD") {
        Ok(build) if !build.trim().is_empty() => build.trim().to_string(),
        _ => env::var("CARGO_PKG_VERSION_PATCH").unwrap_or_default(),
    };

    println!("cargo:rustc-env=LINE_VAS_VERSION={major}.{minor}.{patch}");
    println!("cargo:rerun-if-env-changed=LINE_VAS_BUILD");
}
