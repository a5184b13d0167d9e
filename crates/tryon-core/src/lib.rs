// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Try-on shell: core types, configuration and error definitions shared by
// the bridge and the host application.

pub mod config;
pub mod error;
pub mod script;
pub mod types;

pub use config::{BridgeConfig, Environment, HandlerChannel, InjectionTime, LoadMode};
pub use error::{BridgeError, DropClass};
pub use script::{ScriptCommand, UserScript};
pub use types::*;
