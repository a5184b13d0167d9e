// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Script text sent into the sandbox: user scripts installed at load time and
// one-shot commands evaluated later.

use serde_json::Value;

use crate::config::InjectionTime;

/// A script the host installs into the web view before or after the
/// document is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScript {
    pub source: String,
    pub injection_time: InjectionTime,
    pub main_frame_only: bool,
}

impl UserScript {
    pub fn new(source: impl Into<String>, injection_time: InjectionTime, main_frame_only: bool) -> Self {
        Self {
            source: source.into(),
            injection_time,
            main_frame_only,
        }
    }

    /// Source for hosts that inject at document start but choose the frame
    /// scope themselves. Document-end scripts are deferred to
    /// `DOMContentLoaded`.
    pub fn deferred_source(&self) -> String {
        match self.injection_time {
            InjectionTime::DocumentStart => self.source.clone(),
            InjectionTime::DocumentEnd => format!(
                "(function() {{\n\
                 var run = function() {{\n{}\n}};\n\
                 if (document.readyState === \"loading\") {{\n\
                 document.addEventListener(\"DOMContentLoaded\", run, {{ once: true }});\n\
                 }} else {{\n\
                 run();\n\
                 }}\n\
                 }})();",
                self.source
            ),
        }
    }

    /// Source for hosts that can only inject at document start into every
    /// frame. Main-frame-only scripts bail out inside iframes.
    pub fn to_document_start_source(&self) -> String {
        let source = self.deferred_source();
        if self.main_frame_only {
            format!("if (window.top === window) {{\n{source}\n}}")
        } else {
            source
        }
    }
}

/// A one-way command evaluated inside the sandbox. The bridge never reads a
/// result back; hosts may log evaluation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// Ask the widget to open try-on for a product (the PDP demo action).
    AddTryOnProduct { product_id: String },
    /// Dispatch a synthetic `message` event on `window`, as if a parent frame
    /// had posted `data`.
    SimulatePostMessage { data: Value },
    /// Any other expression.
    Raw(String),
}

impl ScriptCommand {
    /// Render the command as an expression. Every rendered command ends in
    /// `true;` so WebKit hosts get a serialisable completion value.
    pub fn to_expression(&self) -> String {
        match self {
            Self::AddTryOnProduct { product_id } => format!(
                "(function() {{\n\
                 if (typeof window.addTryOnProduct === \"function\") {{\n\
                 window.addTryOnProduct({});\n\
                 }}\n\
                 }})();\n\
                 true;",
                js_string(product_id)
            ),
            Self::SimulatePostMessage { data } => format!(
                "window.dispatchEvent(new MessageEvent(\"message\", {{ data: {} }}));\ntrue;",
                js_literal(data)
            ),
            Self::Raw(expression) => expression.clone(),
        }
    }
}

/// Quote `s` as a JavaScript string literal that is also safe inside an
/// inline `<script>` element.
pub fn js_string(s: &str) -> String {
    js_literal(&Value::String(s.to_owned()))
}

/// Render a JSON value as a JavaScript literal.
///
/// JSON is valid JavaScript apart from `</script>` sequences when inlined in
/// HTML, and U+2028/U+2029 on pre-ES2019 engines; both are escaped.
pub fn js_literal(value: &Value) -> String {
    value
        .to_string()
        .replace('<', "\\u003c")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
