// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outbound shim: the widget expects to run inside an iframe and talks to its
// parent with `window.parent.postMessage(data, target)`. Loaded standalone in
// a web view there is no parent, so we install a fake one that forwards to
// the native handler channel.

use tryon_core::script::js_string;
use tryon_core::{HandlerChannel, InjectionTime, UserScript};

/// JavaScript expression that evaluates to the native handler object, or to
/// something falsy when the channel is not registered.
pub fn handler_expression(channel: &HandlerChannel) -> String {
    match channel {
        HandlerChannel::WebKit { name } => format!(
            "(window.webkit && window.webkit.messageHandlers && window.webkit.messageHandlers[{}])",
            js_string(name)
        ),
        HandlerChannel::AndroidInterface { name } => format!("window[{}]", js_string(name)),
        HandlerChannel::Ipc => "window.ipc".to_owned(),
    }
}

/// Build the shim.
///
/// `postMessage` calls are forwarded only when `target` equals
/// `allowed_origin` or `allowed_domain`, and never for an undefined payload.
/// Objects are sent as JSON text, anything else through `String(data)`.
pub fn outbound_shim(
    allowed_origin: &str,
    allowed_domain: &str,
    channel: &HandlerChannel,
    injection_time: InjectionTime,
    main_frame_only: bool,
) -> UserScript {
    let source = format!(
        r#"(function() {{
    var allowedOrigin = {origin};
    var allowedDomain = {domain};
    window.parent = {{
        postMessage: function(data, target) {{
            if (target !== allowedOrigin && target !== allowedDomain) return;
            if (data === undefined || data === "undefined") return;
            var dataNormalized = typeof data === "object" ? JSON.stringify(data) : String(data);
            var handler = {handler};
            if (handler) handler.postMessage(dataNormalized);
        }}
    }};
    return true;
}})()"#,
        origin = js_string(allowed_origin),
        domain = js_string(allowed_domain),
        handler = handler_expression(channel),
    );

    UserScript::new(source, injection_time, main_frame_only)
}
