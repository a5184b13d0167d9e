// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Widget API environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Test,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Prod => "prod",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the sandbox reaches native code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerChannel {
    /// `window.webkit.messageHandlers[name]` (WKWebView).
    #[serde(rename = "webkit")]
    WebKit { name: String },
    /// `window[name]`, an object registered with `addJavascriptInterface`.
    AndroidInterface { name: String },
    /// `window.ipc` (wry).
    Ipc,
}

impl HandlerChannel {
    /// Registered handler name, if the channel is named.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::WebKit { name } | Self::AndroidInterface { name } => Some(name),
            Self::Ipc => None,
        }
    }
}

impl Default for HandlerChannel {
    fn default() -> Self {
        Self::WebKit {
            name: DEFAULT_HANDLER_NAME.into(),
        }
    }
}

/// When a user script runs relative to document parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionTime {
    DocumentStart,
    #[default]
    DocumentEnd,
}

/// Which widget load surface the screen uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    /// Navigate to the hosted `app.html` with query parameters.
    #[default]
    Hosted,
    /// Load a generated HTML document that injects the loader script.
    Inline,
}

pub const DEFAULT_CDN_DOMAIN: &str = "https://d38knilzwtuys1.cloudfront.net";
pub const DEFAULT_HANDLER_NAME: &str = "revieveMessageHandler";

/// Static description of one widget screen. Immutable once a bridge is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Partner identifier issued by the widget vendor.
    pub partner_id: String,
    /// Widget UI locale (e.g. "en").
    pub locale: String,
    /// Widget API environment.
    pub environment: Environment,
    /// Origin the widget posts to; `postMessage` targets are checked against it.
    pub allowed_origin: String,
    /// CDN the widget is served from. Also accepted as a `postMessage` target.
    pub cdn_domain: String,
    /// Path of the hosted widget page under the CDN.
    pub app_path: String,
    /// Path of the widget loader script under the CDN (inline mode).
    pub loader_path: String,
    /// Global the loader reads its configuration from (inline mode).
    pub config_global: String,
    /// Hide the widget's own floating launcher button.
    pub disable_launcher_button: bool,
    /// Show the demo "product detail page" trigger.
    pub show_pdp_button: bool,
    /// Product the PDP trigger adds to try-on.
    pub pdp_product_id: String,
    /// Native handler the shim forwards to.
    pub handler: HandlerChannel,
    pub injection_time: InjectionTime,
    pub main_frame_only: bool,
    pub load_mode: LoadMode,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            partner_id: "kToSMAjsNx".into(),
            locale: "en".into(),
            environment: Environment::Test,
            allowed_origin: "*".into(),
            cdn_domain: DEFAULT_CDN_DOMAIN.into(),
            app_path: "revieve-plugin-v4/app.html".into(),
            loader_path: "revieve-plugin-v4/revieve-plugin-loader.js".into(),
            config_global: "revieveConfig".into(),
            disable_launcher_button: true,
            show_pdp_button: false,
            pdp_product_id: "02750".into(),
            handler: HandlerChannel::default(),
            injection_time: InjectionTime::DocumentEnd,
            main_frame_only: false,
            load_mode: LoadMode::Hosted,
        }
    }
}

impl BridgeConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// CDN domain without a trailing slash.
    pub fn cdn_base(&self) -> &str {
        self.cdn_domain.trim_end_matches('/')
    }

    /// Reject configurations that would produce a broken shim or URL.
    pub fn validate(&self) -> Result<()> {
        if self.partner_id.trim().is_empty() {
            return Err(BridgeError::InvalidConfig("partner_id is empty".into()));
        }
        if self.locale.trim().is_empty() {
            return Err(BridgeError::InvalidConfig("locale is empty".into()));
        }
        if self.allowed_origin.trim().is_empty() {
            return Err(BridgeError::InvalidConfig("allowed_origin is empty".into()));
        }
        if !(self.cdn_domain.starts_with("https://") || self.cdn_domain.starts_with("http://")) {
            return Err(BridgeError::InvalidConfig(format!(
                "cdn_domain must be an http(s) origin, got {:?}",
                self.cdn_domain
            )));
        }
        if self.show_pdp_button && self.pdp_product_id.trim().is_empty() {
            return Err(BridgeError::InvalidConfig(
                "show_pdp_button requires pdp_product_id".into(),
            ));
        }
        if let Some(name) = self.handler.name() {
            if name.trim().is_empty() {
                return Err(BridgeError::InvalidConfig("handler name is empty".into()));
            }
        }
        if !is_js_identifier(&self.config_global) {
            return Err(BridgeError::InvalidConfig(format!(
                "config_global {:?} is not a JavaScript identifier",
                self.config_global
            )));
        }
        Ok(())
    }
}

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_matches_sample_screen() {
        let config = BridgeConfig::default();
        assert_eq!(config.partner_id, "kToSMAjsNx");
        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.allowed_origin, "*");
        assert_eq!(config.handler.name(), Some(DEFAULT_HANDLER_NAME));
        assert_eq!(config.injection_time, InjectionTime::DocumentEnd);
        assert!(!config.main_frame_only);
        config.validate().expect("default config is valid");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = BridgeConfig::from_json_str(
            r#"{ "partner_id": "abc123", "environment": "prod", "handler": { "kind": "ipc" } }"#,
        )
        .expect("parse");
        assert_eq!(config.partner_id, "abc123");
        assert_eq!(config.environment, Environment::Prod);
        assert_eq!(config.handler, HandlerChannel::Ipc);
        assert_eq!(config.locale, "en");
    }

    #[test]
    fn empty_partner_is_rejected() {
        let err = BridgeConfig::from_json_str(r#"{ "partner_id": "  " }"#).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
    }

    #[test]
    fn non_http_cdn_is_rejected() {
        let config = BridgeConfig {
            cdn_domain: "javascript:alert(1)".into(),
            ..BridgeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_global_must_be_identifier() {
        let config = BridgeConfig {
            config_global: "a; b".into(),
            ..BridgeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pdp_button_requires_product() {
        let config = BridgeConfig {
            show_pdp_button: true,
            pdp_product_id: String::new(),
            ..BridgeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cdn_base_strips_trailing_slash() {
        let config = BridgeConfig {
            cdn_domain: "https://cdn.example.com/".into(),
            ..BridgeConfig::default()
        };
        assert_eq!(config.cdn_base(), "https://cdn.example.com");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "locale": "fi", "show_pdp_button": true }}"#).expect("write");

        let config = BridgeConfig::load(file.path()).expect("load");
        assert_eq!(config.locale, "fi");
        assert!(config.show_pdp_button);
    }

    #[test]
    fn load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let err = BridgeConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, BridgeError::Serialization(_)));
    }
}
