// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Host-side configuration for the CLI harness.
//!
//! Save-state serialization is out of scope for this crate, so `serde` is
//! deliberately not derived anywhere except here: [`Config`] is the one
//! piece of state that is legitimately persisted (as `psx-core.toml`), and
//! it holds nothing about the emulated machine itself.

use serde::{Deserialize, Serialize};

/// Harness-level configuration, loadable from a `psx-core.toml` file and
/// overridable by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the 512 KiB BIOS image. Required to boot.
    pub bios_path: Option<String>,

    /// Optional PSX-EXE to sideload once the BIOS reaches the shell
    /// (PC & 0x1FFFFFFF == 0x00030000), per spec.md §6.
    pub exe_path: Option<String>,

    /// `env_logger` filter string, e.g. "info" or "psx_core=debug".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Suppress the harness's per-VBlank progress log line while the BIOS
    /// splash screen is running (before the sideload hook fires, or when
    /// no EXE is staged at all).
    #[serde(default)]
    pub skip_bios_animation: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bios_path: None,
            exe_path: None,
            log_level: default_log_level(),
            skip_bios_animation: false,
        }
    }
}

impl Config {
    /// Load a config file, falling back to defaults if it does not exist.
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("failed to parse {path}: {err}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_level_is_info() {
        assert_eq!(Config::default().log_level, "info");
    }

    #[test]
    fn load_missing_file_falls_back_to_defaults() {
        let cfg = Config::load("/nonexistent/path/psx-core.toml");
        assert!(cfg.bios_path.is_none());
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn parses_toml() {
        let toml_str = r#"
            bios_path = "bios/scph1001.bin"
            log_level = "debug"
        "#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.bios_path.as_deref(), Some("bios/scph1001.bin"));
        assert_eq!(cfg.log_level, "debug");
    }
}
