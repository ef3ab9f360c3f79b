//! Error Types
//!
//! This module defines the error types used throughout croak.
//!
//! # Overview
//!
//! The main error type [`CroakError`] covers all failure modes including:
//! - Malformed rig topology tables (fail fast at startup)
//! - Hierarchy edits that would break the tree invariant
//! - Asset binding, loading and decoding errors
//! - Settings parsing errors
//! - Missing rendering capability and renderer setup failures
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, CroakError>`.
//!
//! ```rust,ignore
//! use croak_core::errors::Result;
//!
//! fn build() -> Result<()> {
//!     let rig = Rig::from_topology(FROG_TOPOLOGY)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for croak.
#[derive(Error, Debug)]
pub enum CroakError {
    // ========================================================================
    // Topology & Hierarchy Errors
    // ========================================================================
    /// A topology entry names a parent that is not in the table.
    #[error("Rig node '{node}' references missing parent '{parent}'")]
    MissingParent {
        /// The entry whose parent could not be resolved
        node: String,
        /// The unresolved parent name
        parent: String,
    },

    /// Two topology entries share the same name.
    #[error("Rig node '{0}' is defined more than once")]
    DuplicateNode(String),

    /// The parent links of the topology table form a cycle.
    #[error("Rig topology contains a cycle through '{0}'")]
    CycleDetected(String),

    /// The topology table has no parentless entry.
    #[error("Rig topology has no root node")]
    NoRoot,

    /// The topology table has more than one parentless entry.
    #[error("Rig topology has multiple roots: '{first}' and '{second}'")]
    MultipleRoots {
        /// First root encountered
        first: String,
        /// Second root encountered
        second: String,
    },

    /// A lookup by name or handle failed.
    #[error("Rig node not found: {0}")]
    NodeNotFound(String),

    /// A re-parenting request would break the tree invariant.
    #[error("Invalid attach: {0}")]
    InvalidAttach(String),

    // ========================================================================
    // Asset Errors
    // ========================================================================
    /// The asset name has no slot in the binding table.
    #[error("No rig slot for asset '{0}'")]
    UnknownAsset(String),

    /// An asset load reported by the loader collaborator failed.
    #[error("Failed to load asset '{path}': {reason}")]
    AssetLoad {
        /// Relative asset path
        path: String,
        /// Loader-provided reason
        reason: String,
    },

    /// Loaded bytes are not a usable mesh or image.
    #[error("Failed to decode asset '{path}': {reason}")]
    AssetDecode {
        /// Relative asset path
        path: String,
        /// Decoder-provided reason
        reason: String,
    },

    // ========================================================================
    // I/O & Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings parsing error.
    #[error("Settings parse error: {0}")]
    SettingsError(#[from] serde_json::Error),

    /// Settings parsed but hold an unusable value.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// No rendering adapter is available on this host.
    #[error("Rendering is unavailable: {0}")]
    RenderUnavailable(String),

    /// Surface or device setup failed after an adapter was found.
    #[error("Renderer setup failed: {0}")]
    RenderSetup(String),

    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),
}

/// Alias for `Result<T, CroakError>`.
pub type Result<T> = std::result::Result<T, CroakError>;
