// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// What the web view loads: either the hosted widget page, or a generated
// document that configures and injects the widget loader itself.

use url::Url;

use tryon_core::error::{BridgeError, Result};
use tryon_core::script::js_string;
use tryon_core::{BridgeConfig, HandlerChannel, InjectionTime, LoadMode, ON_CLICK_PRODUCT, ON_CLOSE, UserScript};

use crate::shim::handler_expression;

/// Content to load into the web view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetSource {
    Url(Url),
    Html(String),
}

impl WidgetSource {
    /// Pick the load surface named by `config.load_mode`.
    pub fn for_config(config: &BridgeConfig) -> Result<Self> {
        match config.load_mode {
            LoadMode::Hosted => hosted_url(config).map(Self::Url),
            LoadMode::Inline => inline_html(config).map(Self::Html),
        }
    }
}

/// `{cdn}/{app_path}?partnerId=..&env=..&crossOrigin=1&origin=..`
pub fn hosted_url(config: &BridgeConfig) -> Result<Url> {
    let mut url = cdn_url(config, &config.app_path)?;
    url.query_pairs_mut()
        .append_pair("partnerId", &config.partner_id)
        .append_pair("env", config.environment.as_str())
        .append_pair("crossOrigin", "1")
        .append_pair("origin", &config.allowed_origin);
    Ok(url)
}

/// Absolute URL of the widget loader script.
pub fn loader_url(config: &BridgeConfig) -> Result<Url> {
    cdn_url(config, &config.loader_path)
}

fn cdn_url(config: &BridgeConfig, path: &str) -> Result<Url> {
    let raw = format!("{}/{}", config.cdn_base(), path.trim_start_matches('/'));
    Url::parse(&raw).map_err(|e| BridgeError::InvalidConfig(format!("bad widget URL {raw:?}: {e}")))
}

/// Statement that assigns the loader's configuration global. The callback
/// hooks post bridge messages to the native channel, so the same dispatch
/// path handles both load surfaces.
pub fn config_object_script(config: &BridgeConfig, channel: &HandlerChannel) -> String {
    format!(
        r#"(function() {{
    var post = function(message) {{
        var handler = {handler};
        if (handler) handler.postMessage(JSON.stringify(message));
    }};
    window.{global} = {{
        partner_id: {partner_id},
        locale: {locale},
        env: {env},
        disableLauncherButton: {disable_launcher},
        onClose: function() {{
            post({{ type: {on_close} }});
        }},
        onClickProduct: function(products) {{
            post({{ type: {on_click}, payload: Array.isArray(products) ? products : [products] }});
        }}
    }};
}})();"#,
        handler = handler_expression(channel),
        global = config.config_global,
        partner_id = js_string(&config.partner_id),
        locale = js_string(&config.locale),
        env = js_string(config.environment.as_str()),
        disable_launcher = config.disable_launcher_button,
        on_close = js_string(ON_CLOSE),
        on_click = js_string(ON_CLICK_PRODUCT),
    )
}

/// The configuration object as a document-start user script, for hosts that
/// load a bundled page which already contains the loader `<script>` tag.
pub fn preload_config_script(config: &BridgeConfig) -> UserScript {
    UserScript::new(
        format!("{}\ntrue;", config_object_script(config, &config.handler)),
        InjectionTime::DocumentStart,
        true,
    )
}

/// Self-contained page: set the configuration global, then inject the
/// loader so it reads that configuration on start.
pub fn inline_html(config: &BridgeConfig) -> Result<String> {
    let loader = loader_url(config)?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1, viewport-fit=cover">
<title>Try-on</title>
</head>
<body>
<script>
{config_js}
(function() {{
    var script = document.createElement("script");
    script.src = {loader};
    script.async = true;
    document.body.appendChild(script);
}})();
</script>
</body>
</html>
"#,
        lang = html_attr(&config.locale),
        config_js = config_object_script(config, &config.handler),
        loader = js_string(loader.as_str()),
    ))
}

fn html_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryon_core::Environment;

    #[test]
    fn hosted_url_matches_sample() {
        let url = hosted_url(&BridgeConfig::default()).expect("url");
        assert_eq!(
            url.as_str(),
            "https://d38knilzwtuys1.cloudfront.net/revieve-plugin-v4/app.html?partnerId=kToSMAjsNx&env=test&crossOrigin=1&origin=*"
        );
    }

    #[test]
    fn hosted_url_encodes_query_values() {
        let config = BridgeConfig {
            partner_id: "a b&c".into(),
            allowed_origin: "https://shop.example.com".into(),
            environment: Environment::Prod,
            ..BridgeConfig::default()
        };
        let url = hosted_url(&config).expect("url");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("partnerId".to_owned(), "a b&c".to_owned()),
                ("env".to_owned(), "prod".to_owned()),
                ("crossOrigin".to_owned(), "1".to_owned()),
                ("origin".to_owned(), "https://shop.example.com".to_owned()),
            ]
        );
    }

    #[test]
    fn source_follows_load_mode() {
        let hosted = WidgetSource::for_config(&BridgeConfig::default()).expect("hosted");
        assert!(matches!(hosted, WidgetSource::Url(_)));

        let config = BridgeConfig {
            load_mode: LoadMode::Inline,
            ..BridgeConfig::default()
        };
        let inline = WidgetSource::for_config(&config).expect("inline");
        assert!(matches!(inline, WidgetSource::Html(_)));
    }

    #[test]
    fn inline_html_configures_then_loads() {
        let config = BridgeConfig {
            locale: "fi".into(),
            ..BridgeConfig::default()
        };
        let html = inline_html(&config).expect("html");

        assert!(html.contains(r#"<html lang="fi">"#));
        assert!(html.contains(r#"partner_id: "kToSMAjsNx","#));
        assert!(html.contains(r#"locale: "fi","#));
        assert!(html.contains(r#"env: "test","#));
        assert!(html.contains("disableLauncherButton: true,"));
        assert!(html.contains(
            r#"script.src = "https://d38knilzwtuys1.cloudfront.net/revieve-plugin-v4/revieve-plugin-loader.js";"#
        ));

        let config_at = html.find("window.revieveConfig = {").expect("config");
        let loader_at = html.find("document.createElement(\"script\")").expect("loader");
        assert!(config_at < loader_at);
    }

    #[test]
    fn callbacks_post_bridge_messages() {
        let js = config_object_script(&BridgeConfig::default(), &HandlerChannel::Ipc);
        assert!(js.contains("var handler = window.ipc;"));
        assert!(js.contains(r#"post({ type: "onClose" });"#));
        assert!(js.contains(
            r#"post({ type: "onClickProduct", payload: Array.isArray(products) ? products : [products] });"#
        ));
    }

    #[test]
    fn inline_html_cannot_close_script_tag() {
        let config = BridgeConfig {
            partner_id: "</script><script>alert(1)</script>".into(),
            ..BridgeConfig::default()
        };
        let html = inline_html(&config).expect("html");
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn preload_script_runs_at_document_start() {
        let script = preload_config_script(&BridgeConfig::default());
        assert_eq!(script.injection_time, InjectionTime::DocumentStart);
        assert!(script.main_frame_only);
        assert!(script.source.contains("window.revieveConfig = {"));
        assert!(script.source.ends_with("true;"));
    }
}
