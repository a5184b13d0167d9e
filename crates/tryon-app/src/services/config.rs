// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen configuration for the desktop shell.

use std::path::Path;

use tracing::{error, info};
use tryon_core::{BridgeConfig, HandlerChannel};

use super::data_dir;

pub const CONFIG_FILE: &str = "config.json";

/// Load `config.json` from the data directory, or the built-in sample
/// screen if there is none. A broken file is logged and ignored.
pub fn load_config() -> BridgeConfig {
    let path = data_dir::data_dir().join(CONFIG_FILE);
    for_desktop(load_from(&path))
}

fn load_from(path: &Path) -> BridgeConfig {
    if !path.exists() {
        info!(path = %path.display(), "no config file, using sample configuration");
        return BridgeConfig::default();
    }
    match BridgeConfig::load(path) {
        Ok(config) => {
            info!(path = %path.display(), partner = %config.partner_id, "loaded config");
            config
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "config unreadable, using sample configuration");
            BridgeConfig::default()
        }
    }
}

/// wry only exposes `window.ipc`, whatever channel the file names.
fn for_desktop(mut config: BridgeConfig) -> BridgeConfig {
    if config.handler != HandlerChannel::Ipc {
        info!(configured = ?config.handler, "using window.ipc handler channel on desktop");
        config.handler = HandlerChannel::Ipc;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_gives_sample() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_from(&dir.path().join(CONFIG_FILE));
        assert_eq!(config, BridgeConfig::default());
    }

    #[test]
    fn broken_file_gives_sample() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "partner_id": "" }}"#).expect("write");
        assert_eq!(load_from(file.path()), BridgeConfig::default());
    }

    #[test]
    fn file_values_are_used() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "partner_id": "abc", "show_pdp_button": true }}"#).expect("write");
        let config = load_from(file.path());
        assert_eq!(config.partner_id, "abc");
        assert!(config.show_pdp_button);
    }

    #[test]
    fn desktop_forces_ipc_channel() {
        let config = for_desktop(BridgeConfig::default());
        assert_eq!(config.handler, HandlerChannel::Ipc);
    }
}
