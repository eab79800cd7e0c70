//! Client and server app provisioning
//!
//! Apps are either produced by a framework generator in the workspace root and then
//! moved under `apps/`, or written directly. Patches run afterwards.

pub mod assets;
pub mod patch;
pub mod recipes;

use crate::choice::{PackageManager, ScaffoldChoice};
use crate::runtime::CommandRunner;
use crate::workspace::APPS_DIR;
use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use patch::{apply_patch, apply_patches, FilePatch, PatchOutcome, PatchReport, Transform};
pub use recipes::{client_recipe, server_recipe, AppSource, Recipe};

/// What provisioning one app produced
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub app_dir: PathBuf,
    /// False when a generator ran but left nothing to move
    pub relocated: bool,
    pub patches: Vec<PatchReport>,
    pub file_count: usize,
}

impl ProvisionReport {
    /// Patches the operator should be told about
    pub fn warnings(&self) -> impl Iterator<Item = &PatchReport> {
        self.patches.iter().filter(|p| p.outcome.is_warning())
    }
}

/// Move `<root>/<name>` to `<root>/apps/<name>` if the generator created it
pub fn relocate(root: &Path, name: &str) -> Result<bool> {
    let from = root.join(name);
    if !from.exists() {
        return Ok(false);
    }
    let to = root.join(APPS_DIR).join(name);
    std::fs::rename(&from, &to)
        .with_context(|| format!("Failed to move {} to {}", from.display(), to.display()))?;
    Ok(true)
}

/// Count regular files under `dir`, ignoring installed dependencies
pub fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

/// package.json for a hand-written server
pub fn server_manifest(name: &str, dependencies: &[(&str, &str)]) -> Value {
    let deps: Map<String, Value> = dependencies
        .iter()
        .map(|(dep, version)| (dep.to_string(), Value::String(version.to_string())))
        .collect();

    json!({
        "name": name,
        "version": "0.0.0",
        "private": true,
        "dependencies": deps,
        "scripts": { "start:dev": "node index.js" },
    })
}

async fn write_hand_written(
    app_dir: &Path,
    app: &str,
    entry_file: &str,
    entry: &str,
    dependencies: &[(&str, &str)],
) -> Result<()> {
    tokio::fs::create_dir(app_dir)
        .await
        .with_context(|| format!("Failed to create {}", app_dir.display()))?;

    let entry_path = app_dir.join(entry_file);
    tokio::fs::write(&entry_path, entry)
        .await
        .with_context(|| format!("Failed to write {}", entry_path.display()))?;

    let manifest_path = app_dir.join("package.json");
    let mut manifest = serde_json::to_string_pretty(&server_manifest(app, dependencies))?;
    manifest.push('\n');
    tokio::fs::write(&manifest_path, manifest)
        .await
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(())
}

/// Produce, relocate and patch one app inside the workspace at `root`
pub async fn provision<R: CommandRunner>(
    runner: &R,
    recipe: &Recipe,
    pm: PackageManager,
    root: &Path,
) -> Result<ProvisionReport> {
    let app_dir = root.join(APPS_DIR).join(recipe.app);

    let relocated = match &recipe.source {
        AppSource::Generator { .. } => {
            if let Some(invocation) = recipe.source.invocation(pm, root) {
                runner.run(&invocation).await?;
            }
            relocate(root, recipe.app)?
        }
        AppSource::HandWritten {
            entry_file,
            entry,
            dependencies,
        } => {
            write_hand_written(&app_dir, recipe.app, entry_file, entry, dependencies).await?;
            true
        }
    };

    let patches = apply_patches(&app_dir, recipe.patches)?;

    Ok(ProvisionReport {
        file_count: count_files(&app_dir),
        app_dir,
        relocated,
        patches,
    })
}

pub async fn provision_client<R: CommandRunner>(
    runner: &R,
    choice: &ScaffoldChoice,
    root: &Path,
) -> Result<ProvisionReport> {
    provision(runner, &client_recipe(choice.client), choice.package_manager, root).await
}

pub async fn provision_server<R: CommandRunner>(
    runner: &R,
    choice: &ScaffoldChoice,
    root: &Path,
) -> Result<ProvisionReport> {
    provision(runner, &server_recipe(choice.server), choice.package_manager, root).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{ClientFramework, ServerFramework};
    use crate::testing::RecordingRunner;

    fn workspace() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join(APPS_DIR)).unwrap();
        root
    }

    fn choice(client: ClientFramework, server: ServerFramework) -> ScaffoldChoice {
        ScaffoldChoice {
            package_manager: PackageManager::Npm,
            client,
            server,
            project_name: "demo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_express_and_koa_are_hand_written() {
        for (server, greeting) in [
            (ServerFramework::Express, "Hello from Express!"),
            (ServerFramework::Koa, "Hello from Koa!"),
        ] {
            let root = workspace();
            let runner = RecordingRunner::new();

            let report = provision_server(&runner, &choice(ClientFramework::React, server), root.path())
                .await
                .unwrap();

            assert!(runner.calls().is_empty(), "{server} must not run a generator");
            let entry = std::fs::read_to_string(report.app_dir.join("index.js")).unwrap();
            assert!(entry.contains(greeting));
            assert!(entry.contains("/api/message"));
            assert_eq!(report.file_count, 2);
        }
    }

    #[tokio::test]
    async fn test_hand_written_manifest() {
        let root = workspace();
        let report = provision_server(
            &RecordingRunner::new(),
            &choice(ClientFramework::React, ServerFramework::Koa),
            root.path(),
        )
        .await
        .unwrap();

        let raw = std::fs::read_to_string(report.app_dir.join("package.json")).unwrap();
        let manifest: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(manifest["name"], "server");
        assert_eq!(manifest["scripts"]["start:dev"], "node index.js");
        assert_eq!(manifest["dependencies"]["@koa/cors"], "5.0.0");
        assert_eq!(manifest["dependencies"].as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_nest_is_generated_relocated_and_patched() {
        let root = workspace();
        let runner = RecordingRunner::new();

        let report = provision_server(
            &runner,
            &choice(ClientFramework::React, ServerFramework::NestJS),
            root.path(),
        )
        .await
        .unwrap();

        assert!(report.relocated);
        assert!(!root.path().join("server").exists());
        assert_eq!(report.warnings().count(), 0);

        let main = std::fs::read_to_string(report.app_dir.join("src/main.ts")).unwrap();
        assert_eq!(main.matches("app.enableCors()").count(), 1);

        let controller =
            std::fs::read_to_string(report.app_dir.join("src/app.controller.ts")).unwrap();
        assert!(controller.contains("@Get('api/message')"));
        assert!(controller.contains("Hello from NestJS!"));

        let raw = std::fs::read_to_string(report.app_dir.join("package.json")).unwrap();
        let manifest: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(manifest["scripts"]["start:dev"], "nest start --watch");
    }

    #[tokio::test]
    async fn test_nest_cors_patch_twice_inserts_once() {
        let root = workspace();
        let report = provision_server(
            &RecordingRunner::new(),
            &choice(ClientFramework::React, ServerFramework::NestJS),
            root.path(),
        )
        .await
        .unwrap();

        let again = apply_patches(&report.app_dir, server_recipe(ServerFramework::NestJS).patches)
            .unwrap();
        assert_eq!(again[0].outcome, PatchOutcome::AlreadyPresent);

        let main = std::fs::read_to_string(report.app_dir.join("src/main.ts")).unwrap();
        assert_eq!(main.matches("app.enableCors()").count(), 1);
    }

    #[tokio::test]
    async fn test_angular_drift_skips_missing_component() {
        let root = workspace();
        let runner = RecordingRunner::new().without_file("src/app/app.component.ts");

        let report = provision_client(
            &runner,
            &choice(ClientFramework::Angular, ServerFramework::Express),
            root.path(),
        )
        .await
        .unwrap();

        let missing: Vec<_> = report.warnings().collect();
        assert_eq!(missing.len(), 1);
        assert!(missing[0].path.ends_with("src/app/app.component.ts"));
        assert!(!report.app_dir.join("src/app/app.component.ts").exists());

        // Untouched by the skipped patch; still rewritten by its own
        let routes = std::fs::read_to_string(report.app_dir.join("src/app/app.routes.ts")).unwrap();
        assert_eq!(routes, crate::testing::ANGULAR_ROUTES);
        let config = std::fs::read_to_string(report.app_dir.join("src/app/app.config.ts")).unwrap();
        assert!(config.contains("provideHttpClient()"));
    }

    #[tokio::test]
    async fn test_generator_without_output_reports_missing() {
        let root = workspace();
        let runner = RecordingRunner::new().silent();

        let report = provision_client(
            &runner,
            &choice(ClientFramework::Vue, ServerFramework::Express),
            root.path(),
        )
        .await
        .unwrap();

        assert!(!report.relocated);
        assert_eq!(report.file_count, 0);
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let root = workspace();
        let runner = RecordingRunner::new().failing("npx");

        let result = provision_client(
            &runner,
            &choice(ClientFramework::Angular, ServerFramework::Express),
            root.path(),
        )
        .await;

        assert!(result.is_err());
        assert!(!root.path().join("apps/client").exists());
    }

    #[test]
    fn test_count_files_skips_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/react")).unwrap();
        std::fs::write(dir.path().join("node_modules/react/index.js"), "").unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/main.js"), "").unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();

        assert_eq!(count_files(dir.path()), 2);
    }
}
