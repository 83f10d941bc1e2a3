// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Library error type.
//!
//! Consistency violations have their own type (`InvariantError`) because the
//! verifier collects many of them at once; everything else funnels through here.

use std::path::PathBuf;

use crate::verify::InvariantError;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid index JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid book.toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("not a search index script: {0}")]
    MalformedWrapper(&'static str),

    #[error("unknown pipeline step '{0}'")]
    UnknownPipelineStep(String),

    #[error("{}: {message}", path.display())]
    Summary { path: PathBuf, message: String },

    #[error("index failed verification: {0}")]
    Invariant(#[from] InvariantError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
