//! Runtime detection for Node.js and the chosen package manager

use crate::choice::PackageManager;
use anyhow::Result;
use semver::Version;
use std::process::Command;

/// Oldest Node.js release the current framework generators support
pub const MIN_NODE_VERSION: Version = Version::new(18, 0, 0);

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `<program> --version` and capture the trimmed output
fn probe(name: &'static str, program: &str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if the package manager binary is available
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    let program = if cfg!(windows) {
        format!("{}.cmd", pm.command())
    } else {
        pm.command().to_string()
    };
    probe(pm.command(), &program)
}

/// Parse `node --version` output (`v20.11.1`)
pub fn parse_node_version(raw: &str) -> Option<Version> {
    let cleaned = raw.trim().strip_prefix('v').unwrap_or(raw.trim());
    Version::parse(cleaned).ok()
}

/// Warning for a Node.js older than [`MIN_NODE_VERSION`]
pub fn node_version_warning(node: &RuntimeInfo) -> Option<String> {
    let version = parse_node_version(node.version.as_deref()?)?;
    if version < MIN_NODE_VERSION {
        Some(format!(
            "Node.js {} is older than {}; the framework generators may refuse to run",
            version, MIN_NODE_VERSION
        ))
    } else {
        None
    }
}

/// Fail unless Node.js and `pm` are both installed
pub fn check_runtimes(pm: PackageManager) -> Result<Vec<RuntimeInfo>> {
    verify(vec![check_node(), check_package_manager(pm)])
}

fn verify(runtimes: Vec<RuntimeInfo>) -> Result<Vec<RuntimeInfo>> {
    let missing: Vec<String> = runtimes
        .iter()
        .filter(|r| !r.available)
        .map(|r| match r.name {
            "Node.js" => "Node.js (install from https://nodejs.org)".to_string(),
            "yarn" | "pnpm" => format!("{} (enable with `corepack enable`)", r.name),
            other => other.to_string(),
        })
        .collect();

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(runtimes)
}
