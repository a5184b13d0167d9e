// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Native/web message bridge for an embedded try-on widget.
//!
//! The widget runs in a web view and talks to the host through a
//! `postMessage` shim ([`shim`]). Inbound JSON is decoded into typed
//! messages and routed to native actions by [`Bridge`]; commands flow back
//! as script expressions. The host side is abstracted by the traits in
//! [`traits`] so the same bridge drives WKWebView, Android WebView, or wry.

pub mod bridge;
pub mod loader;
pub mod recording;
pub mod shim;
pub mod traits;

pub use bridge::Bridge;
pub use loader::WidgetSource;
pub use recording::RecordingHost;
pub use traits::{NativeAlert, NativeHost, ScriptEvaluator};
