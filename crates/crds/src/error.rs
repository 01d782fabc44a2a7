//! Error types for the resource schema crate.
//!
//! Schema violations are reported by validation; registry failures by the
//! scheme. Neither is recovered from inside this crate.

use thiserror::Error;

use crate::compute::Virtualization;

/// A desired-state value outside its declared domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required string is empty
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be strictly positive
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    /// Value must not be negative
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    /// Value exceeds its upper bound
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },

    /// `use_ssh_keys` without any key to use
    #[error("spec.forProvider.existingSSHKeys must contain at least one key when sshOptions is use_ssh_keys")]
    MissingSshKeys,

    /// Blank entry in the existing key list
    #[error("spec.forProvider.existingSSHKeys[{index}] is empty")]
    BlankSshKey { index: usize },

    /// VNC password supplied while VNC is disabled
    #[error("spec.forProvider.vncPassword is set but enableVNC is false")]
    VncPasswordWithoutVnc,

    /// Field is only meaningful for another virtualization family
    #[error("{field} is only supported for {supported} virtualization, got {virtualization}")]
    UnsupportedForVirtualization {
        field: &'static str,
        supported: &'static str,
        virtualization: Virtualization,
    },
}

/// Errors from registering or (de)serializing through the scheme
#[derive(Debug, Error)]
pub enum SchemeError {
    /// Another definition is already registered under the same group/version/kind
    #[error("conflicting registration for {0}")]
    Conflict(String),

    /// Kind used before being registered
    #[error("kind not registered: {0}")]
    NotRegistered(String),

    /// Document carries a different apiVersion/kind than requested
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
