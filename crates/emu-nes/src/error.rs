//! Machine construction errors.

use std::fmt;

/// Why a [`NesConfig`](crate::NesConfig) could not be turned into a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The program image has no bytes.
    EmptyProgram,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProgram => write!(f, "program image is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
