// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The bridge: decodes sandbox messages, routes them to native actions, and
// sends script commands back into the sandbox.
//
// Every failure is logged here and also returned, so hosts can ignore it and
// tests can assert on it. Nothing panics and nothing is thrown back into the
// web view.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tryon_core::error::{BridgeError, Result};
use tryon_core::{
    Alert, BridgeConfig, BridgeMessage, Delivery, Dispatched, NativeAction, ScriptCommand,
    UserScript,
};

use crate::loader::WidgetSource;
use crate::shim;
use crate::traits::{NativeHost, ScriptEvaluator};

pub const ON_CLOSE_BODY: &str = "The try-on widget was closed.";

/// One screen's bridge. Cheap to clone; the configuration is shared.
#[derive(Debug, Clone)]
pub struct Bridge {
    config: Arc<BridgeConfig>,
}

impl Bridge {
    pub fn new(config: BridgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The `postMessage` shim for this screen's origin, CDN and channel.
    pub fn outbound_shim(&self) -> UserScript {
        let config = &self.config;
        shim::outbound_shim(
            &config.allowed_origin,
            config.cdn_base(),
            &config.handler,
            config.injection_time,
            config.main_frame_only,
        )
    }

    pub fn widget_source(&self) -> Result<WidgetSource> {
        WidgetSource::for_config(&self.config)
    }

    /// Entry point for raw text from the native handler channel.
    pub fn receive<H>(&self, raw: &str, host: &H) -> Result<Dispatched>
    where
        H: NativeHost + ?Sized,
    {
        let message = BridgeMessage::parse(raw).inspect_err(|e| {
            warn!(error = %e, class = ?e.drop_class(), bytes = raw.len(), "dropping bridge message");
        })?;
        debug!(kind = message.kind(), "inbound message");
        self.dispatch(&message, host)
    }

    /// Route a decoded message to its native action and perform it.
    pub fn dispatch<H>(&self, message: &BridgeMessage, host: &H) -> Result<Dispatched>
    where
        H: NativeHost + ?Sized,
    {
        let Some(action) = action_for(message).inspect_err(log_drop)? else {
            debug!(kind = message.kind(), "ignoring unhandled message type");
            return Ok(Dispatched::Ignored {
                kind: message.kind().to_owned(),
            });
        };

        perform(&action, host).inspect_err(|e| {
            warn!(error = %e, kind = message.kind(), host = host.platform_name(), "native action failed");
        })?;
        Ok(Dispatched::Performed(action))
    }

    /// Evaluate a command in the sandbox. Fire-and-forget: only a failure to
    /// hand the script to the web view is reported.
    pub fn invoke<H>(&self, command: &ScriptCommand, host: &H) -> Result<()>
    where
        H: ScriptEvaluator + ?Sized,
    {
        let expression = command.to_expression();
        debug!(bytes = expression.len(), "evaluating script in sandbox");
        host.evaluate_script(&expression).inspect_err(|e| {
            warn!(error = %e, "script evaluation failed");
        })
    }

    /// The demo PDP action, if this screen shows the PDP trigger.
    pub fn pdp_command(&self) -> Option<ScriptCommand> {
        self.config
            .show_pdp_button
            .then(|| ScriptCommand::AddTryOnProduct {
                product_id: self.config.pdp_product_id.clone(),
            })
    }
}

/// Pure routing. `None` for message types with no native action; an
/// `onClickProduct` without products is an error, not a no-op.
pub fn action_for(message: &BridgeMessage) -> Result<Option<NativeAction>> {
    let action = match message {
        BridgeMessage::Close => NativeAction::ShowAlert {
            alert: Alert::new("onClose", ON_CLOSE_BODY),
            delivery: Delivery::Immediate,
        },
        BridgeMessage::ClickProduct { products } => {
            let product = products.first().ok_or(BridgeError::EmptyProductPayload)?;
            NativeAction::ShowAlert {
                alert: Alert::new(
                    "onClickProduct",
                    format!("Product id: {}\nURL: {}", product.id, product.url),
                ),
                delivery: Delivery::MainThread,
            }
        }
        BridgeMessage::Unknown { .. } => return Ok(None),
    };
    Ok(Some(action))
}

fn perform<H>(action: &NativeAction, host: &H) -> Result<()>
where
    H: NativeHost + ?Sized,
{
    match action {
        NativeAction::ShowAlert { alert, delivery } => {
            info!(title = %alert.title, ?delivery, host = host.platform_name(), "presenting alert");
            match delivery {
                Delivery::Immediate => host.show_alert(alert),
                Delivery::MainThread => host.schedule_alert(alert.clone()),
            }
        }
    }
}

fn log_drop(error: &BridgeError) {
    warn!(error = %error, class = ?error.drop_class(), "dropping bridge message");
}
