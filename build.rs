//! Build script for xmas-lights: picks the linker memory map for the target board.

use std::{env, fs, io, path::PathBuf};

fn main() -> io::Result<()> {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");

    let target = env::var("TARGET").unwrap_or_default();
    let memory_map = if target.starts_with("thumbv6m") {
        // Pico 1 (RP2040): needs the second-stage bootloader section.
        Some(("memory-pico1.x", "-Tlink-rp.x"))
    } else if target.starts_with("thumbv8m") {
        // Pico 2 (RP2350) ARM cores.
        Some(("memory-pico2.x", ""))
    } else {
        None
    };

    // Host builds link against std and need no memory map.
    let Some((memory_file, chip_script)) = memory_map else {
        return Ok(());
    };

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap_or_default());
    fs::write(out_dir.join("memory.x"), fs::read_to_string(memory_file)?)?;
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={memory_file}");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if !chip_script.is_empty() {
        println!("cargo:rustc-link-arg-bins={chip_script}");
    }
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    Ok(())
}
