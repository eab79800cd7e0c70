//! Workspace root initialization
//!
//! Creates the project directory, runs the package manager's `init`, and turns the
//! resulting package.json into a workspace root over `apps/*`.

pub mod manifest;

use crate::choice::{PackageManager, ScaffoldChoice};
use crate::runtime::{CommandRunner, Invocation};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use manifest::{configure_root, dev_script, ManifestError, PackageManifest, APPS_GLOB};

/// Directory all workspace members live in
pub const APPS_DIR: &str = "apps";

/// `pnpm-workspace.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnpmWorkspace {
    pub packages: Vec<String>,
}

impl PnpmWorkspace {
    pub const FILE_NAME: &'static str = "pnpm-workspace.yaml";

    pub fn apps() -> Self {
        Self {
            packages: vec![APPS_GLOB.to_string()],
        }
    }
}

/// Build the `init` invocation for a package manager
pub fn init_invocation(pm: PackageManager, root: &Path) -> Invocation {
    Invocation::new(pm.command(), root).args(pm.init_args().iter().copied())
}

/// Create and initialize the workspace root at `root`
///
/// `root` must not exist yet. External failures propagate as-is; nothing already
/// written is cleaned up.
pub async fn initialize<R: CommandRunner>(
    runner: &R,
    choice: &ScaffoldChoice,
    root: &Path,
) -> Result<PathBuf> {
    let pm = choice.package_manager;

    tokio::fs::create_dir(root)
        .await
        .with_context(|| format!("Failed to create project directory: {}", root.display()))?;

    runner.run(&init_invocation(pm, root)).await?;

    if pm.writes_workspace_file() {
        let path = root.join(PnpmWorkspace::FILE_NAME);
        let yaml = serde_yaml::to_string(&PnpmWorkspace::apps())
            .context("Failed to serialize pnpm workspace file")?;
        tokio::fs::write(&path, yaml)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let manifest_path = root.join("package.json");
    let mut manifest = PackageManifest::load(&manifest_path)?;
    configure_root(&mut manifest, pm, choice.client);
    manifest.save()?;

    let apps = root.join(APPS_DIR);
    tokio::fs::create_dir(&apps)
        .await
        .with_context(|| format!("Failed to create {}", apps.display()))?;

    Ok(apps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{ClientFramework, ServerFramework};
    use crate::testing::RecordingRunner;
    use serde_json::json;

    fn choice(pm: PackageManager) -> ScaffoldChoice {
        ScaffoldChoice {
            package_manager: pm,
            client: ClientFramework::React,
            server: ServerFramework::Express,
            project_name: "demo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_every_manager_produces_workspace_root() {
        for pm in PackageManager::ALL {
            let base = tempfile::tempdir().unwrap();
            let root = base.path().join("demo");
            let runner = RecordingRunner::new();

            let apps = initialize(&runner, &choice(pm), &root).await.unwrap();

            assert!(apps.is_dir());
            let manifest = PackageManifest::load(&root.join("package.json")).unwrap();
            assert_eq!(manifest.get("private"), Some(&json!(true)));
            assert_eq!(manifest.get("workspaces"), Some(&json!(["apps/*"])));

            let init = &runner.calls()[0];
            assert_eq!(init.program, pm.command());
            assert_eq!(init.cwd, root);
        }
    }

    #[tokio::test]
    async fn test_only_pnpm_gets_workspace_yaml() {
        for pm in PackageManager::ALL {
            let base = tempfile::tempdir().unwrap();
            let root = base.path().join("demo");
            initialize(&RecordingRunner::new(), &choice(pm), &root)
                .await
                .unwrap();

            let yaml_path = root.join(PnpmWorkspace::FILE_NAME);
            if pm == PackageManager::Pnpm {
                let content = std::fs::read_to_string(&yaml_path).unwrap();
                let parsed: PnpmWorkspace = serde_yaml::from_str(&content).unwrap();
                assert_eq!(parsed, PnpmWorkspace::apps());
            } else {
                assert!(!yaml_path.exists(), "{pm} must not write {}", yaml_path.display());
            }
        }
    }

    #[tokio::test]
    async fn test_existing_directory_fails() {
        let base = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();

        let result = initialize(&runner, &choice(PackageManager::Npm), base.path()).await;

        assert!(result.is_err());
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_init_propagates() {
        let base = tempfile::tempdir().unwrap();
        let root = base.path().join("demo");
        let runner = RecordingRunner::new().failing("npm");

        let err = initialize(&runner, &choice(PackageManager::Npm), &root)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("npm init -y"));
        // No cleanup of the partially created workspace
        assert!(root.exists());
        assert!(!root.join(APPS_DIR).exists());
    }
}
