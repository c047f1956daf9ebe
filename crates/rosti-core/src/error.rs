//! Error types for the resolvers and the archive builder.
//!
//! Orchestration code above this layer works with `anyhow`; these variants
//! are the ones callers are expected to match on.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The current user (and therefore the home directory) is unknown
    #[error("getting user info error: could not determine home directory")]
    UserInfo,

    /// None of the candidate key pairs exist
    #[error("no ssh key found in {dir}")]
    NoSshKey { dir: PathBuf },

    /// The account does not belong to any company
    #[error("no company found")]
    NoCompany,

    /// The selected company is not in the catalog
    #[error("selected company ({id}) not found")]
    CompanyNotFound { id: u32 },

    /// The runtime catalog is empty
    #[error("no runtime available")]
    NoRuntime,

    /// Catalog fetch failed
    #[error(transparent)]
    Upstream(#[from] ApiError),

    /// Filesystem failure with the path that caused it
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the "nothing matched" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoSshKey { .. } | Self::NoCompany | Self::CompanyNotFound { .. } | Self::NoRuntime
        )
    }
}
