//! The operator's scaffolding choices
//!
//! Every downstream step works off a [`ScaffoldChoice`]. The three framework/tool enums
//! double as `clap` value enums so the binary can accept them as flags.

use clap::ValueEnum;
use std::fmt;
use std::path::Path;

/// Package manager used to initialize and drive the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// All package managers in prompt order
    pub const ALL: [PackageManager; 3] = [Self::Npm, Self::Yarn, Self::Pnpm];

    /// Binary name, also used for display
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Arguments for a non-interactive `init`
    ///
    /// pnpm's `init` never prompts, so it takes no `-y`.
    pub fn init_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Npm | PackageManager::Yarn => &["init", "-y"],
            PackageManager::Pnpm => &["init"],
        }
    }

    /// Whether workspace membership lives in `pnpm-workspace.yaml` as well as package.json
    pub fn writes_workspace_file(&self) -> bool {
        matches!(self, PackageManager::Pnpm)
    }

    /// Command line that runs `script` in the workspace package at `dir`
    ///
    /// npm addresses workspaces by package name (the last path component), the
    /// others by directory.
    pub fn run_in(&self, dir: &str, script: &str) -> String {
        match self {
            PackageManager::Npm => {
                let name = Path::new(dir)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(dir);
                format!("npm run {} -w={}", script, name)
            }
            PackageManager::Pnpm => format!("pnpm --dir={} run {}", dir, script),
            PackageManager::Yarn => format!("yarn --cwd={} run {}", dir, script),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// Frontend framework for `apps/client`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ClientFramework {
    React,
    Vue,
    Angular,
}

impl ClientFramework {
    pub const ALL: [ClientFramework; 3] = [Self::React, Self::Vue, Self::Angular];

    pub fn display_name(&self) -> &'static str {
        match self {
            ClientFramework::React => "React",
            ClientFramework::Vue => "Vue",
            ClientFramework::Angular => "Angular",
        }
    }
}

impl fmt::Display for ClientFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Backend framework for `apps/server`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ServerFramework {
    Express,
    Koa,
    #[value(name = "nestjs", alias = "nest")]
    NestJS,
}

impl ServerFramework {
    pub const ALL: [ServerFramework; 3] = [Self::Express, Self::Koa, Self::NestJS];

    pub fn display_name(&self) -> &'static str {
        match self {
            ServerFramework::Express => "Express",
            ServerFramework::Koa => "Koa",
            ServerFramework::NestJS => "NestJS",
        }
    }
}

impl fmt::Display for ServerFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Everything the operator picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldChoice {
    pub package_manager: PackageManager,
    pub client: ClientFramework,
    pub server: ServerFramework,
    /// Name exactly as typed; also the `cd` target in the next steps
    pub project_name: String,
}
