//! Configuration
//!
//! `compile_time` holds limits generated by build.rs from the selected
//! profile under `config/`. [`runtime`] holds preferences that only affect
//! reporting.

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Where the compile-time limits came from
pub mod build_info {
    pub fn profile() -> &'static str {
        option_env!("SKOBKI_BUILD_PROFILE").unwrap_or("development")
    }

    pub fn config_dir() -> &'static str {
        option_env!("SKOBKI_CONFIG_DIR").unwrap_or("config")
    }

    /// Profile file path relative to the workspace root
    pub fn source_info() -> String {
        format!("{}/{}.toml", config_dir(), profile())
    }
}
