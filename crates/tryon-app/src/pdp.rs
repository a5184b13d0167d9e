// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Demo "product detail page" trigger. tao has no native buttons, so the
// control is a fixed overlay button injected into the widget page. It talks
// to the shell over the same ipc channel as the bridge, using a marker that
// is never valid JSON.

use tryon_core::script::js_string;
use tryon_core::{InjectionTime, UserScript};

pub const TRIGGER: &str = "tryon-shell:pdp";

/// Overlay script for the PDP trigger.
pub fn overlay_script(product_id: &str) -> UserScript {
    let label = format!("Try on product {product_id}");
    let source = format!(
        r#"(function() {{
    var button = document.createElement("button");
    button.textContent = {label};
    button.style.cssText = "position:fixed;right:16px;bottom:16px;z-index:2147483647;padding:12px 16px;border:none;border-radius:8px;background:#111;color:#fff;font:14px system-ui,-apple-system,sans-serif;";
    button.addEventListener("click", function() {{
        window.ipc.postMessage({trigger});
    }});
    document.body.appendChild(button);
    return true;
}})()"#,
        label = js_string(&label),
        trigger = js_string(TRIGGER),
    );
    UserScript::new(source, InjectionTime::DocumentEnd, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_is_not_json() {
        assert!(serde_json::from_str::<serde_json::Value>(TRIGGER).is_err());
    }

    #[test]
    fn overlay_posts_trigger() {
        let script = overlay_script("02750");
        assert!(script.source.contains(r#"button.textContent = "Try on product 02750";"#));
        assert!(script.source.contains(r#"window.ipc.postMessage("tryon-shell:pdp");"#));
        assert!(script.main_frame_only);
        assert_eq!(script.injection_time, InjectionTime::DocumentEnd);
    }
}
