use std::path::{Path, PathBuf};

/// Convenience result type used across stagepub.
pub type PublishResult<T> = Result<T, PublishError>;

/// Top-level error taxonomy used by the publish pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    /// A host service or media export capability is missing or declined the request.
    ///
    /// Non-fatal: the affected resource is still recorded, without the missing artifact.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// Shape geometry the exporter expected (boundary, edge list, dash period) is absent or unusable.
    #[error("geometry missing: {0}")]
    GeometryMissing(String),

    /// Caller misuse of resource or timeline identity.
    #[error("identity violation: {0}")]
    IdentityViolation(String),

    /// Invalid user-provided settings or document data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem failure while emitting publish artifacts. Always aborts the publish.
    #[error("io error at '{}': {source}", path.display())]
    Io {
        /// Path the failing operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PublishError {
    /// Build a [`PublishError::ResourceUnavailable`] value.
    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// Build a [`PublishError::GeometryMissing`] value.
    pub fn geometry_missing(msg: impl Into<String>) -> Self {
        Self::GeometryMissing(msg.into())
    }

    /// Build a [`PublishError::IdentityViolation`] value.
    pub fn identity_violation(msg: impl Into<String>) -> Self {
        Self::IdentityViolation(msg.into())
    }

    /// Build a [`PublishError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PublishError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PublishError::Io`] value for `path`.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Return `true` for error kinds that only affect a single resource.
    ///
    /// Such errors are logged and swallowed at the resource boundary; everything else aborts the
    /// enclosing publish.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ResourceUnavailable(_) | Self::GeometryMissing(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
