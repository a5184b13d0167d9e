// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native alert presentation.

use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tryon_core::Alert;

/// Show a modal informational dialog with a single OK button. Blocks the
/// calling (UI) thread until dismissed.
pub fn present(alert: &Alert) {
    MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(alert.title.as_str())
        .set_description(alert.body.as_str())
        .set_buttons(MessageButtons::Ok)
        .show();
}
