// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop host: the bridge's native side, backed by the tao event loop.
//
// The web view is owned by the event loop and is not `Send`, so script
// evaluation and deferred alerts travel as user events and run on the
// event-loop thread.

use tao::event_loop::EventLoopProxy;
use tryon_bridge::traits::*;
use tryon_core::Alert;
use tryon_core::error::{BridgeError, Result};

use crate::dialog;

/// Work posted to the event-loop thread.
#[derive(Debug)]
pub enum ShellEvent {
    /// Present an alert.
    Alert(Alert),
    /// Evaluate a script in the widget web view.
    Evaluate(String),
    /// The PDP trigger was pressed.
    PdpPressed,
}

#[derive(Clone)]
pub struct DesktopHost {
    proxy: EventLoopProxy<ShellEvent>,
}

impl DesktopHost {
    pub fn new(proxy: EventLoopProxy<ShellEvent>) -> Self {
        Self { proxy }
    }

    pub fn post(&self, event: ShellEvent) -> Result<()> {
        self.proxy
            .send_event(event)
            .map_err(|_| BridgeError::Platform("event loop has exited".into()))
    }
}

impl NativeHost for DesktopHost {
    fn platform_name(&self) -> &str {
        "Desktop (wry)"
    }
}

impl NativeAlert for DesktopHost {
    fn show_alert(&self, alert: &Alert) -> Result<()> {
        dialog::present(alert);
        Ok(())
    }

    fn schedule_alert(&self, alert: Alert) -> Result<()> {
        self.post(ShellEvent::Alert(alert))
    }
}

impl ScriptEvaluator for DesktopHost {
    fn evaluate_script(&self, script: &str) -> Result<()> {
        self.post(ShellEvent::Evaluate(script.to_owned()))
    }
}
