//! Monorepo Core - Shared library for the `create-monorepo` scaffolder
//!
//! Generates a JavaScript workspace with a frontend app in `apps/client` and a backend
//! app in `apps/server`, wired together through a single `GET /api/message` endpoint.
//! The real scaffolding is delegated to each framework's official generator; this
//! crate runs them, moves their output into place and patches a handful of files.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Name validation, runtime detection, external
//!   commands, manifest editing and file patching
//! - **Layer 2: Workflow Steps** - [`workspace::initialize`], [`provision::provision_client`]
//!   and [`provision::provision_server`], all taking the project root explicitly
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//! - `testing`: Exposes [`testing::RecordingRunner`] for integration tests
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use monorepo_core::{provision, workspace, SystemRunner};
//!
//! let runner = SystemRunner::default();
//! workspace::initialize(&runner, &choice, &root).await?;
//! provision::provision_client(&runner, &choice, &root).await?;
//! provision::provision_server(&runner, &choice, &root).await?;
//! ```

pub mod choice;
pub mod config;
pub mod provision;
pub mod runtime;
pub mod summary;
pub mod validate;
pub mod workspace;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use choice::{ClientFramework, PackageManager, ScaffoldChoice, ServerFramework};
pub use config::Settings;
pub use provision::{PatchOutcome, PatchReport, ProvisionReport};
pub use runtime::{CommandError, CommandRunner, Invocation, SystemRunner};
pub use validate::{validate_project_name, ProjectNameError};

#[cfg(feature = "tui")]
pub use tui::run;
