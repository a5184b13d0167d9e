// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Messages exchanged with the sandbox and the native actions they map to.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{BridgeError, Result};

pub const ON_CLOSE: &str = "onClose";
pub const ON_CLICK_PRODUCT: &str = "onClickProduct";

/// A product reference from an `onClickProduct` payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: String,
    pub url: String,
    /// Any other fields the widget sent (name, brand, shade...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Strict decode: the element must be an object with string `id` and `url`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            BridgeError::InvalidProductPayload("product entry is not an object".into())
        })?;
        let id = obj
            .get("id")
            .and_then(Value::as_str)
            .ok_or(BridgeError::MissingProductField("id"))?;
        let url = obj
            .get("url")
            .and_then(Value::as_str)
            .ok_or(BridgeError::MissingProductField("url"))?;

        let extra = obj
            .iter()
            .filter(|(k, _)| k.as_str() != "id" && k.as_str() != "url")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            id: id.to_owned(),
            url: url.to_owned(),
            extra,
        })
    }
}

/// Inbound message from the sandbox, keyed by its `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    /// `onClose`: the user dismissed the widget.
    Close,
    /// `onClickProduct`: the user tapped a product. Never empty; the first
    /// entry is the one acted on.
    ClickProduct { products: Vec<Product> },
    /// Any other `type`. Kept so newer widget events pass through untouched.
    Unknown { kind: String, payload: Value },
}

impl BridgeMessage {
    /// Decode raw text delivered over the native handler channel.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(BridgeError::MalformedJson)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut obj) = value else {
            return Err(BridgeError::NotAnObject);
        };
        let kind = match obj.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => return Err(BridgeError::MissingType),
        };
        let payload = obj.remove("payload").unwrap_or(Value::Null);

        match kind.as_str() {
            ON_CLOSE => Ok(Self::Close),
            ON_CLICK_PRODUCT => Ok(Self::ClickProduct {
                products: decode_products(&payload)?,
            }),
            _ => Ok(Self::Unknown { kind, payload }),
        }
    }

    /// The wire `type` tag.
    pub fn kind(&self) -> &str {
        match self {
            Self::Close => ON_CLOSE,
            Self::ClickProduct { .. } => ON_CLICK_PRODUCT,
            Self::Unknown { kind, .. } => kind,
        }
    }

    /// Wire form, as the widget would send it.
    pub fn to_value(&self) -> Value {
        let payload = match self {
            Self::Close => None,
            Self::ClickProduct { products } => {
                Some(serde_json::to_value(products).unwrap_or(Value::Null))
            }
            Self::Unknown { payload, .. } if !payload.is_null() => Some(payload.clone()),
            Self::Unknown { .. } => None,
        };

        let mut obj = Map::new();
        obj.insert("type".into(), Value::String(self.kind().to_owned()));
        if let Some(payload) = payload {
            obj.insert("payload".into(), payload);
        }
        Value::Object(obj)
    }
}

/// The first entry must be a complete product. Later malformed entries are
/// skipped rather than failing the whole message.
fn decode_products(payload: &Value) -> Result<Vec<Product>> {
    let entries = payload.as_array().ok_or_else(|| {
        BridgeError::InvalidProductPayload(format!("expected an array, got {}", type_name(payload)))
    })?;
    let (first, rest) = entries
        .split_first()
        .ok_or(BridgeError::EmptyProductPayload)?;

    let mut products = Vec::with_capacity(entries.len());
    products.push(Product::from_value(first)?);
    products.extend(rest.iter().filter_map(|v| Product::from_value(v).ok()));
    Ok(products)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A native alert: title plus informational body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Where an alert is presented from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Present now; the caller is already on the UI thread.
    Immediate,
    /// Re-post to the UI thread's scheduler before presenting.
    MainThread,
}

/// Native side effect chosen for a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeAction {
    ShowAlert { alert: Alert, delivery: Delivery },
}

/// Result of dispatching one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// A native action was performed (or scheduled).
    Performed(NativeAction),
    /// Unrecognised message type; nothing happened.
    Ignored { kind: String },
}
