//! Top-level error type for lumina.
//!
//! Each subsystem defines its own error enum with miette `#[diagnostic]`
//! derives (codes and help text); `LuminaError` wraps them transparently so the
//! full diagnostic reaches the user.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::controller::ViewError;
use crate::gateway::AiError;
use crate::paths::PathError;
use crate::store::StoreError;

#[derive(Debug, Error, Diagnostic)]
pub enum LuminaError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    View(#[from] ViewError),
}

pub type LuminaResult<T> = std::result::Result<T, LuminaError>;
