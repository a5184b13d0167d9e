// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One window, one web view, one bridge.

use tao::dpi::LogicalSize;
use tao::event::{Event, StartCause, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing::{debug, info, warn};
use wry::WebViewBuilder;
use wry::http::Request;

use tryon_bridge::{Bridge, WidgetSource};
use tryon_core::{BridgeConfig, UserScript};

use crate::host::{DesktopHost, ShellEvent};
use crate::{dialog, pdp};

/// Build the window and web view, then run the event loop until the window
/// is closed. Only returns on setup failure.
pub fn run(config: BridgeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = Bridge::new(config)?;

    let event_loop = EventLoopBuilder::<ShellEvent>::with_user_event().build();
    let host = DesktopHost::new(event_loop.create_proxy());

    let window = WindowBuilder::new()
        .with_title("Try-on")
        .with_inner_size(LogicalSize::new(420.0, 860.0))
        .build(&event_loop)?;

    let (shim, shim_main_only) = init_script(&bridge.outbound_shim());
    let mut builder = WebViewBuilder::new()
        .with_devtools(cfg!(debug_assertions))
        .with_initialization_script_for_main_only(&shim, shim_main_only);

    let pdp_command = bridge.pdp_command();
    if pdp_command.is_some() {
        let (overlay, overlay_main_only) =
            init_script(&pdp::overlay_script(&bridge.config().pdp_product_id));
        builder = builder.with_initialization_script_for_main_only(&overlay, overlay_main_only);
    }

    builder = match bridge.widget_source()? {
        WidgetSource::Url(url) => {
            info!(url = %url, "loading hosted widget");
            builder.with_url(url.as_str())
        }
        WidgetSource::Html(html) => {
            info!(bytes = html.len(), "loading inline widget page");
            builder.with_html(html)
        }
    };

    let ipc_bridge = bridge.clone();
    let ipc_host = host.clone();
    builder = builder.with_ipc_handler(move |request: Request<String>| {
        let body = request.body();
        if body == pdp::TRIGGER {
            if let Err(e) = ipc_host.post(ShellEvent::PdpPressed) {
                warn!(error = %e, "could not queue PDP action");
            }
            return;
        }
        // Failures are logged by the bridge; the UI shows nothing for them.
        let _ = ipc_bridge.receive(body, &ipc_host);
    });

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        builder.build_gtk(window.gtk_window())?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::NewEvents(StartCause::Init) => {
                info!(partner = %bridge.config().partner_id, env = %bridge.config().environment, "shell ready");
            }
            Event::UserEvent(ShellEvent::Alert(alert)) => dialog::present(&alert),
            Event::UserEvent(ShellEvent::Evaluate(script)) => {
                if let Err(e) = webview.evaluate_script(&script) {
                    warn!(error = %e, "web view rejected script");
                }
            }
            Event::UserEvent(ShellEvent::PdpPressed) => {
                if let Some(command) = &pdp_command {
                    debug!("PDP trigger pressed");
                    let _ = bridge.invoke(command, &host);
                }
            }
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }
            _ => {}
        }
    });
}

/// wry injects at document start and takes the frame scope as a flag, so
/// only the injection time needs rewriting.
fn init_script(script: &UserScript) -> (String, bool) {
    (script.deferred_source(), script.main_frame_only)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tryon_core::InjectionTime;

    #[test]
    fn shim_keeps_all_frames_scope() {
        let bridge = Bridge::new(BridgeConfig::default()).expect("bridge");
        let (source, main_only) = init_script(&bridge.outbound_shim());
        assert!(!main_only);
        assert!(!source.contains("window.top"));
        assert!(source.contains("DOMContentLoaded"));
    }

    #[test]
    fn main_frame_scope_is_passed_as_flag() {
        let script = UserScript::new("var a = 1;", InjectionTime::DocumentStart, true);
        let (source, main_only) = init_script(&script);
        assert!(main_only);
        assert_eq!(source, "var a = 1;");
    }
}
