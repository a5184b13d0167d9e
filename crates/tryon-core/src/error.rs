// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the bridge.

use thiserror::Error;

/// Top-level error type for all bridge operations.
///
/// None of these are fatal: the UI layer drops the message and carries on.
/// They exist so callers and tests can tell *why* nothing happened.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Inbound decoding --
    #[error("inbound message is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("inbound message is not a JSON object")]
    NotAnObject,

    #[error("inbound message has no string `type` field")]
    MissingType,

    // -- Payload shape --
    #[error("onClickProduct payload is empty")]
    EmptyProductPayload,

    #[error("onClickProduct payload is not a sequence of objects: {0}")]
    InvalidProductPayload(String),

    #[error("product is missing string field `{0}`")]
    MissingProductField(&'static str),

    // -- Outbound --
    #[error("script evaluation failed: {0}")]
    ScriptEvaluation(String),

    // -- Configuration --
    #[error("invalid bridge configuration: {0}")]
    InvalidConfig(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Host --
    #[error("native host error: {0}")]
    Platform(String),
}

/// Coarse classification of why a message or command was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropClass {
    /// The raw text was not a JSON object with a string `type`.
    Malformed,
    /// A recognised message type carried a payload of the wrong shape.
    Shape,
    /// Evaluating a script in the sandbox failed.
    Evaluation,
    /// Configuration or host failure, not tied to a single message.
    Host,
}

impl BridgeError {
    pub fn drop_class(&self) -> DropClass {
        match self {
            Self::MalformedJson(_) | Self::NotAnObject | Self::MissingType => DropClass::Malformed,
            Self::EmptyProductPayload
            | Self::InvalidProductPayload(_)
            | Self::MissingProductField(_) => DropClass::Shape,
            Self::ScriptEvaluation(_) => DropClass::Evaluation,
            Self::InvalidConfig(_)
            | Self::Io(_)
            | Self::Serialization(_)
            | Self::Platform(_) => DropClass::Host,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
