// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the native side of the bridge.
//
// A host embeds the web view and owns the UI thread. The bridge decides what
// should happen; the host makes it happen.

use tryon_core::Alert;
use tryon_core::error::Result;

/// Everything the bridge needs from the embedding application.
pub trait NativeHost: NativeAlert + ScriptEvaluator {
    /// Human-readable host name (e.g. "Desktop (wry)").
    fn platform_name(&self) -> &str;
}

/// Present native alerts.
pub trait NativeAlert {
    /// Present an alert now. Callers are on the UI thread.
    fn show_alert(&self, alert: &Alert) -> Result<()>;

    /// Post an alert to the UI thread's scheduler and return immediately.
    /// Safe to call from any thread the web view's callbacks run on.
    fn schedule_alert(&self, alert: Alert) -> Result<()>;
}

/// Evaluate script inside the loaded sandbox.
pub trait ScriptEvaluator {
    /// Evaluate `script` without waiting for a result. An error means the
    /// host could not hand the script to the web view at all.
    fn evaluate_script(&self, script: &str) -> Result<()>;
}
