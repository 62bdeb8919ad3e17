//! Build script to compile the C comparison kernel.

use std::env;

fn main() {
    println!("cargo:rustc-check-cfg=cfg(c_implementation_active)");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_C_IMPL").is_none() {
        return;
    }

    let build = cc::Build::new();
    let compiler = build.get_compiler();
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();

    // Vanilla Clang shares Rust's LLVM backend, so it tells us nothing a Rust
    // variant doesn't. Apple Clang is the only C compiler on macOS.
    let compiler_name = if compiler.is_like_clang() {
        if target_os == "macos" {
            Some("Apple Clang")
        } else {
            println!("cargo:warning=Vanilla Clang detected. C kernel disabled (requires GCC, MSVC, or Apple Clang).");
            None
        }
    } else if compiler.is_like_gnu() {
        Some("GCC")
    } else if compiler.is_like_msvc() {
        Some("MSVC")
    } else {
        println!("cargo:warning=C compiler is not compatible (needs GCC, Apple Clang, or MSVC). C kernel disabled.");
        None
    };

    let Some(compiler_name) = compiler_name else {
        return;
    };

    let mut build = cc::Build::new();

    let c_files = match glob::glob("src/**/*.c") {
        Ok(paths) => paths.filter_map(|entry| entry.ok()),
        Err(e) => {
            println!("cargo:warning=Invalid glob pattern for C sources: {}", e);
            return;
        }
    };

    for file in c_files {
        println!("cargo:rerun-if-changed={}", file.display());
        build.file(file);
    }

    // No -ffast-math: the C loop must keep its left-to-right summation so the
    // only difference from the Rust baseline is what target_clones picks.
    build.opt_level(3);
    build.compile("dot_product_c");

    println!("cargo:rustc-cfg=c_implementation_active");
    println!("cargo:rustc-env=C_COMPILER_NAME={}", compiler_name);
}
