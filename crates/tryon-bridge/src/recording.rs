// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Headless host for CI and replay: nothing is drawn, every request is
// recorded so callers can inspect what the bridge asked for.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tryon_core::Alert;
use tryon_core::error::{BridgeError, Result};

use crate::traits::*;

/// Records alerts and scripts instead of presenting them.
#[derive(Debug, Default)]
pub struct RecordingHost {
    shown: Mutex<Vec<Alert>>,
    scheduled: Mutex<Vec<Alert>>,
    scripts: Mutex<Vec<String>>,
    fail_scripts: AtomicBool,
    fail_alerts: AtomicBool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `evaluate_script` fail, as a web view that has
    /// been torn down would.
    pub fn fail_scripts(&self, fail: bool) {
        self.fail_scripts.store(fail, Ordering::Relaxed);
    }

    /// Make every subsequent alert request fail, as a host with no window
    /// to present on would.
    pub fn fail_alerts(&self, fail: bool) {
        self.fail_alerts.store(fail, Ordering::Relaxed);
    }

    fn check_alerts(&self) -> Result<()> {
        if self.fail_alerts.load(Ordering::Relaxed) {
            return Err(BridgeError::Platform("no window to present on".into()));
        }
        Ok(())
    }

    /// Alerts presented immediately.
    pub fn shown_alerts(&self) -> Vec<Alert> {
        lock(&self.shown).clone()
    }

    /// Alerts posted to the (simulated) UI scheduler but not yet run.
    pub fn scheduled_alerts(&self) -> Vec<Alert> {
        lock(&self.scheduled).clone()
    }

    /// Run the scheduled alerts, as the UI thread would on its next turn.
    /// Returns how many were presented.
    pub fn drain_scheduled(&self) -> usize {
        let pending: Vec<Alert> = lock(&self.scheduled).drain(..).collect();
        let count = pending.len();
        lock(&self.shown).extend(pending);
        count
    }

    /// Every alert the bridge requested, shown or scheduled.
    pub fn alert_count(&self) -> usize {
        lock(&self.shown).len() + lock(&self.scheduled).len()
    }

    pub fn evaluated_scripts(&self) -> Vec<String> {
        lock(&self.scripts).clone()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NativeHost for RecordingHost {
    fn platform_name(&self) -> &str {
        "Headless (recording)"
    }
}

impl NativeAlert for RecordingHost {
    fn show_alert(&self, alert: &Alert) -> Result<()> {
        self.check_alerts()?;
        tracing::debug!(title = %alert.title, "recording alert");
        lock(&self.shown).push(alert.clone());
        Ok(())
    }

    fn schedule_alert(&self, alert: Alert) -> Result<()> {
        self.check_alerts()?;
        tracing::debug!(title = %alert.title, "recording scheduled alert");
        lock(&self.scheduled).push(alert);
        Ok(())
    }
}

impl ScriptEvaluator for RecordingHost {
    fn evaluate_script(&self, script: &str) -> Result<()> {
        if self.fail_scripts.load(Ordering::Relaxed) {
            return Err(BridgeError::ScriptEvaluation("web view is not loaded".into()));
        }
        lock(&self.scripts).push(script.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_moves_scheduled_to_shown() {
        let host = RecordingHost::new();
        host.schedule_alert(Alert::new("a", "b")).expect("schedule");
        assert!(host.shown_alerts().is_empty());
        assert_eq!(host.alert_count(), 1);

        assert_eq!(host.drain_scheduled(), 1);
        assert_eq!(host.shown_alerts(), vec![Alert::new("a", "b")]);
        assert!(host.scheduled_alerts().is_empty());
    }

    #[test]
    fn failing_scripts_are_not_recorded() {
        let host = RecordingHost::new();
        host.fail_scripts(true);
        assert!(host.evaluate_script("1").is_err());
        host.fail_scripts(false);
        host.evaluate_script("2").expect("eval");
        assert_eq!(host.evaluated_scripts(), vec!["2".to_owned()]);
    }
}
