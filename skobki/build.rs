// Emits `config::compile_time` constants from config/<profile>.toml
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(serde::Deserialize)]
struct Profile {
    lexical: Lexical,
    logging: Logging,
}

#[derive(serde::Deserialize)]
struct Lexical {
    punctuation_capacity: usize,
    max_token_count: usize,
    max_directive_count: usize,
}

#[derive(serde::Deserialize)]
struct Logging {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    for var in ["SKOBKI_BUILD_PROFILE", "SKOBKI_CONFIG_DIR"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rerun-if-changed=build.rs");

    let profile = env::var("SKOBKI_BUILD_PROFILE").unwrap_or_else(|_| "development".into());
    let path = profile_path(&profile);
    println!("cargo:rerun-if-changed={}", path.display());

    let source = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read build profile {}: {e}", path.display()));
    let limits: Profile = toml::from_str(&source)
        .unwrap_or_else(|e| panic!("build profile {} is not valid TOML: {e}", path.display()));

    if let Err(problem) = check(&limits, &profile) {
        panic!("build profile {}: {problem}", path.display());
    }

    let out = Path::new(&env::var("OUT_DIR").expect("cargo sets OUT_DIR")).join("constants.rs");
    fs::write(&out, render(&limits, &profile))
        .unwrap_or_else(|e| panic!("cannot write {}: {e}", out.display()));
}

/// Profiles live next to the workspace manifest, one directory above this crate
fn profile_path(profile: &str) -> PathBuf {
    let config_dir = env::var("SKOBKI_CONFIG_DIR").unwrap_or_else(|_| "config".into());
    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR"));
    let workspace = crate_dir.parent().unwrap_or(&crate_dir);
    workspace.join(config_dir).join(format!("{profile}.toml"))
}

fn check(limits: &Profile, profile: &str) -> Result<(), String> {
    let lexical = &limits.lexical;
    let logging = &limits.logging;

    // Default table holds 4 bytes; u8 counts must not wrap
    if !(16..=255).contains(&lexical.punctuation_capacity) {
        return Err("punctuation_capacity must be within 16..=255".into());
    }
    if lexical.max_token_count == 0 {
        return Err("max_token_count must be positive".into());
    }
    if lexical.max_directive_count != 3 {
        return Err("max_directive_count must equal the number of directive keywords (3)".into());
    }
    if !(100..=100_000).contains(&logging.log_buffer_size) {
        return Err("log_buffer_size must be within 100..=100000".into());
    }
    if logging.max_log_message_length == 0 {
        return Err("max_log_message_length must be positive".into());
    }
    if logging.security_min_log_level > 2 {
        return Err("security_min_log_level must be 0, 1 or 2".into());
    }
    if profile == "production" && lexical.max_token_count > 10_000_000 {
        return Err("production max_token_count is capped at 10000000".into());
    }
    Ok(())
}

fn render(limits: &Profile, profile: &str) -> String {
    let lexical = &limits.lexical;
    let logging = &limits.logging;
    let mut code = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(code, "// Generated by build.rs from the `{profile}` profile");
    let _ = writeln!(code, "pub mod compile_time {{");
    let _ = writeln!(code, "    pub mod lexical {{");
    let _ = writeln!(code, "        pub const PUNCTUATION_CAPACITY: usize = {};", lexical.punctuation_capacity);
    let _ = writeln!(code, "        pub const MAX_TOKEN_COUNT: usize = {};", lexical.max_token_count);
    let _ = writeln!(code, "        pub const MAX_DIRECTIVE_COUNT: usize = {};", lexical.max_directive_count);
    let _ = writeln!(code, "    }}");
    let _ = writeln!(code, "    pub mod logging {{");
    let _ = writeln!(code, "        pub const LOG_BUFFER_SIZE: usize = {};", logging.log_buffer_size);
    let _ = writeln!(code, "        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};", logging.max_log_message_length);
    let _ = writeln!(code, "        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};", logging.security_min_log_level);
    let _ = writeln!(code, "    }}");
    let _ = writeln!(code, "}}");
    code
}
