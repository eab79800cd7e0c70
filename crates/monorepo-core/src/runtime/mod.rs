//! Runtime detection and external command execution
//!
//! This module provides:
//! - Node.js and package manager detection
//! - The [`CommandRunner`] seam used for every generator and package manager call

pub mod check;
pub mod command;

pub use check::{check_node, check_package_manager, check_runtimes, RuntimeInfo};
pub use command::{CommandError, CommandRunner, Invocation, SystemRunner};
