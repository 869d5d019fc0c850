//! Diagnostics: fatal conditions surface as `ResolveError` values and abort
//! the current resolution; recoverable ones are collected by a `Reporter`
//! threaded through every recursive call, so a hosted or test environment
//! never sees a process-wide abort.

use std::sync::Mutex;

use colored::Colorize;
use serde::Serialize;
use thiserror::Error;

/// A type expression that cannot be represented as an OpenAPI schema.
/// Every variant names the diagnostic context it was raised from.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("{context}: unable to resolve OpenAPI type for identifier '{name}'")]
    UnknownIdentifier { context: String, name: String },

    #[error("{context}: 'value-of' is not supported")]
    ValueOfUnsupported { context: String },

    #[error("{context}: JSON objects can only be indexed by 'string' but got '{key}'")]
    NonStringMapKey { context: String, key: String },

    #[error("{context}: constants of this kind are not supported")]
    UnsupportedConstant { context: String },

    #[error("{context}: unable to resolve OpenAPI type: {node}")]
    UnsupportedNode { context: String, node: String },
}

impl ResolveError {
    pub fn context(&self) -> &str {
        match self {
            ResolveError::UnknownIdentifier { context, .. }
            | ResolveError::ValueOfUnsupported { context }
            | ResolveError::NonStringMapKey { context, .. }
            | ResolveError::UnsupportedConstant { context }
            | ResolveError::UnsupportedNode { context, .. } => context,
        }
    }
}

/// A representable-but-discouraged construct. Serializable so hosts can
/// embed collected warnings in their own reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub context: String,
    pub message: String,
}

/// Collects recoverable diagnostics. Interior mutability behind a mutex so
/// one reporter can be shared across parallel top-level resolutions.
#[derive(Debug, Default)]
pub struct Reporter {
    warnings: Mutex<Vec<Diagnostic>>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&self, context: &str, message: impl Into<String>) {
        self.warnings
            .lock()
            .expect("reporter mutex poisoned")
            .push(Diagnostic {
                context: context.to_string(),
                message: message.into(),
            });
    }

    /// Snapshot of everything collected so far, in emission order.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.warnings
            .lock()
            .expect("reporter mutex poisoned")
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings
            .lock()
            .expect("reporter mutex poisoned")
            .is_empty()
    }

    /// Render collected warnings to stderr, color-coded by severity.
    pub fn print_warnings(&self) {
        for diag in self.warnings() {
            eprintln!(
                "{} {}: {}",
                "warning".yellow().bold(),
                diag.context,
                diag.message
            );
        }
    }
}

/// Render a fatal diagnostic the same way, red.
pub fn print_error(error: &ResolveError) {
    eprintln!("{} {}", "error".red().bold(), error);
}
