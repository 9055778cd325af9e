//=========================================================================
// Error Types
//=========================================================================
//
// Recoverable failures raised by asset resolution and scene lifecycle.
//
// Contract violations (lifecycle calls on a disposed scene, a second
// runtime in one process) are not modelled here. They panic at the call
// site or surface from the engine builder.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== AssetError ==========================================================

/// Failure to resolve a logical asset name through a [`ResourceScope`].
///
/// Never retried automatically: the caller decides whether the owning
/// transition should be abandoned.
///
/// [`ResourceScope`]: crate::core::assets::ResourceScope
#[derive(Debug, Error)]
pub enum AssetError {
    /// No asset exists for the logical name under the scope root.
    #[error("asset '{name}' not found under '{}'", .root.display())]
    NotFound { name: String, root: PathBuf },

    /// The asset exists but its contents cannot be used.
    #[error("asset '{name}' is invalid: {reason}")]
    Invalid { name: String, reason: String },

    /// The loader hit an I/O error other than a missing file.
    #[error("failed to read asset '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The scope was torn down; acquisition is no longer allowed.
    #[error("resource scope '{scope}' is released, cannot acquire '{name}'")]
    ScopeReleased { scope: String, name: String },
}

//=== SceneError ==========================================================

/// Failure reported by a scene from `initialize` or `load_content`.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Scene-specific failure with a human readable reason.
    #[error("{0}")]
    Custom(String),
}

//=== TransitionError =====================================================

/// A committed transition whose incoming scene failed to initialize.
///
/// By the time this is returned the outgoing scene has already been
/// retired and the failed scene disposed; the host is left empty.
#[derive(Debug, Error)]
#[error("failed to activate scene '{scene}': {source}")]
pub struct TransitionError {
    pub scene: String,
    #[source]
    pub source: SceneError,
}

//=========================================================================
// Unit Tests
//=========================================================================
