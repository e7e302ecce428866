//! Build script for spooky-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates demo.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use spooky_core::config::{parse_config, DemoConfig};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate demo.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=demo.toml");

    let config_path = Path::new("demo.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: demo.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds demo.toml from the spooky-firmware          ║\n\
            ║  directory. Restore it or create a new one.                      ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read demo.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax and types, via the same structs the firmware uses
    let config: DemoConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => fail("Invalid demo.toml", &[e.to_string()]),
    };

    let mut errors = Vec::new();

    // The firmware parses with its own no_std parser; it must agree
    match parse_config(&content) {
        Ok(parsed) if parsed != config => {
            errors.push("on-device parser reads different values than toml".to_string());
        }
        Ok(_) => {}
        Err(e) => errors.push(format!("on-device parser rejects the file: {:?}", e)),
    }

    if let Err(e) = config.validate() {
        errors.push(format!("{:?}", e));
    }

    let known = ["ghost1", "ghost2", "coin"];
    if !known.contains(&config.demo.asset.as_str()) {
        // Still builds: the firmware shows the fallback color instead
        println!(
            "cargo:warning=demo.toml asset '{}' is not bundled, the canvas will show the fallback color",
            config.demo.asset
        );
    }

    if !errors.is_empty() {
        fail("Invalid demo configuration", &errors);
    }

    println!("cargo:warning=demo.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(errors)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(errors: &[String]) -> String {
    errors
        .iter()
        .flat_map(|e| e.lines())
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                let cut = line.char_indices().nth(59).map_or(line.len(), |(i, _)| i);
                format!("{}...", &line[..cut])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
