// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use operation_model::ChainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("unsupported output format `{0}`, expected `text/javascript` or `text/x-python`")]
    UnsupportedFormat(String),
    #[error("the operation has no inverse transform")]
    UnsupportedDirection,
    #[error("CRS definitions cannot be produced as `{0}`")]
    UnsupportedDefinitionFormat(String),
    #[error("malformed transform chain: {0}")]
    MalformedChain(#[from] ChainError),
    #[error("cannot serialize CRS definition: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// How a failure should be reported to the caller of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is wrong, e.g. an unknown media type.
    InvalidRequest,
    /// The request is valid but cannot be served for this operation.
    UnsupportedOperation,
    /// The collaborators handed over inconsistent data.
    Internal,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::UnsupportedFormat(_) => ErrorKind::InvalidRequest,
            GenerationError::UnsupportedDirection
            | GenerationError::UnsupportedDefinitionFormat(_) => ErrorKind::UnsupportedOperation,
            GenerationError::MalformedChain(_) | GenerationError::Serialization(_) => {
                ErrorKind::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            GenerationError::UnsupportedFormat("text/html".to_string()).kind(),
            ErrorKind::InvalidRequest
        );
        assert_eq!(
            GenerationError::UnsupportedDirection.kind(),
            ErrorKind::UnsupportedOperation
        );
        assert_eq!(
            GenerationError::from(ChainError::Empty).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            GenerationError::from(ChainError::Empty).to_string(),
            "malformed transform chain: transform chain has no steps"
        );
    }
}
