//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`PrismError`] covers all failure modes:
//! - Setup validation failures (cyclic or unsatisfiable pass dependencies)
//! - Asset loading failures during the setup phase
//! - Per-frame pass execution failures
//!
//! Setup errors are fatal: no frame ever runs against an invalid plan.
//! [`PrismError::PassExecution`] aborts only the current frame; the caller
//! may keep ticking and the previously completed frame stays on screen.
//!
//! There is no retry logic anywhere: every failure is either fatal at setup
//! or surfaced per frame.

use thiserror::Error;

/// The main error type for the prism scheduler.
#[derive(Error, Debug)]
pub enum PrismError {
    // ========================================================================
    // Setup Validation Errors (fatal, before any frame runs)
    // ========================================================================
    /// No topological order exists for the pass set.
    #[error("cyclic dependency among passes: {passes:?}")]
    CyclicDependency {
        /// Names of the passes participating in the cycle.
        passes: Vec<String>,
    },

    /// A pass declares an input key that no pass produces.
    #[error("pass '{pass}' reads '{key}' but no pass produces it")]
    MissingProducer {
        /// The consuming pass.
        pass: String,
        /// The unsatisfied input key.
        key: String,
    },

    /// Two passes declare the same output key.
    #[error("output '{key}' is declared by both '{first}' and '{second}'")]
    DuplicateProducer {
        /// The conflicting output key.
        key: String,
        /// The pass that declared the key first.
        first: String,
        /// The pass that declared it again.
        second: String,
    },

    // ========================================================================
    // Asset Loading Errors (fatal, surfaced to the caller, no retry)
    // ========================================================================
    /// An asset required by the scene composition failed to load.
    #[error("failed to load asset '{path}': {source}")]
    AssetLoad {
        /// Path or identifier of the asset.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    // ========================================================================
    // Per-Frame Errors (abort the current frame only)
    // ========================================================================
    /// A pass failed to draw. The frame is discarded, not presented.
    #[error("pass '{pass}' failed, frame aborted: {source}")]
    PassExecution {
        /// Name of the failing pass.
        pass: String,
        /// The underlying draw failure.
        #[source]
        source: DrawError,
    },
}

/// Failure reported by a [`DrawBackend`](crate::graph::DrawBackend) or by
/// output validation after a draw.
#[derive(Error, Debug)]
pub enum DrawError {
    /// A surface referenced geometry the backend cannot resolve.
    #[error("geometry '{geometry}' for surface '{surface}' is unavailable")]
    MissingGeometry {
        /// Name of the surface being drawn.
        surface: String,
        /// Name of the missing geometry.
        geometry: String,
    },

    /// The pass target lacks a required attachment.
    #[error("target has no {attachment} attachment")]
    MissingAttachment {
        /// Which attachment was required ("color" or "depth").
        attachment: &'static str,
    },

    /// The backend produced an output key the pass never declared.
    #[error("pass produced undeclared output '{key}'")]
    UndeclaredOutput {
        /// The undeclared key.
        key: String,
    },

    /// A declared output key was not produced by the draw.
    #[error("declared output '{key}' was not produced")]
    MissingOutput {
        /// The missing key.
        key: String,
    },

    /// The same output key was produced more than once by one draw.
    #[error("output '{key}' was produced more than once")]
    DuplicateOutput {
        /// The repeated key.
        key: String,
    },

    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Alias for `Result<T, PrismError>`.
pub type Result<T> = std::result::Result<T, PrismError>;
