//! Full workspace scaffolding against simulated generators

use monorepo_core::provision::{provision_client, provision_server};
use monorepo_core::testing::RecordingRunner;
use monorepo_core::validate::validate_project_name;
use monorepo_core::workspace::{self, PackageManifest};
use monorepo_core::{summary, ClientFramework, PackageManager, ScaffoldChoice, ServerFramework};
use serde_json::json;
use std::path::Path;

async fn scaffold(runner: &RecordingRunner, choice: &ScaffoldChoice, base: &Path) {
    let root = validate_project_name(&choice.project_name, base).expect("valid name");
    workspace::initialize(runner, choice, &root)
        .await
        .expect("workspace init");
    provision_client(runner, choice, &root)
        .await
        .expect("client provisioning");
    provision_server(runner, choice, &root)
        .await
        .expect("server provisioning");
}

#[tokio::test]
async fn npm_react_express_demo() {
    let base = tempfile::tempdir().unwrap();
    let choice = ScaffoldChoice {
        package_manager: PackageManager::Npm,
        client: ClientFramework::React,
        server: ServerFramework::Express,
        project_name: "demo".to_string(),
    };
    let runner = RecordingRunner::new();

    scaffold(&runner, &choice, base.path()).await;

    let root = base.path().join("demo");
    assert!(root.is_dir());

    let manifest = PackageManifest::load(&root.join("package.json")).unwrap();
    let dev = manifest.get("scripts").unwrap()["dev"].as_str().unwrap();
    assert!(dev.contains("npm run dev -w=client"), "{dev}");
    assert_eq!(manifest.get("private"), Some(&json!(true)));

    let server = std::fs::read_to_string(root.join("apps/server/index.js")).unwrap();
    assert!(server.contains("Hello from Express!"));

    let app = std::fs::read_to_string(root.join("apps/client/src/App.jsx")).unwrap();
    assert!(app.contains("fetch('http://localhost:3000/api/message')"));

    // Only init and the vite generator ran
    let programs: Vec<String> = runner.calls().iter().map(|c| c.to_string()).collect();
    assert_eq!(
        programs,
        vec![
            "npm init -y".to_string(),
            "npm create vite@latest client -- --template react".to_string(),
        ]
    );
    assert!(runner.calls().iter().all(|c| c.cwd == root));
    assert!(!root.join("pnpm-workspace.yaml").exists());
}

#[tokio::test]
async fn every_combination_produces_client_and_server() {
    for client in ClientFramework::ALL {
        for server in ServerFramework::ALL {
            let base = tempfile::tempdir().unwrap();
            let choice = ScaffoldChoice {
                package_manager: PackageManager::Pnpm,
                client,
                server,
                project_name: format!("{}-{}", client, server).to_lowercase(),
            };

            scaffold(&RecordingRunner::new(), &choice, base.path()).await;

            let root = base.path().join(&choice.project_name);
            assert!(root.join("apps/client").is_dir(), "{client}/{server}");
            assert!(root.join("apps/server").is_dir(), "{client}/{server}");
            assert!(root.join("pnpm-workspace.yaml").is_file());
        }
    }
}

#[tokio::test]
async fn nested_project_name_resolves_against_base() {
    let base = tempfile::tempdir().unwrap();
    std::fs::create_dir(base.path().join("projects")).unwrap();
    let choice = ScaffoldChoice {
        package_manager: PackageManager::Yarn,
        client: ClientFramework::Vue,
        server: ServerFramework::Koa,
        project_name: "projects/shop".to_string(),
    };

    scaffold(&RecordingRunner::new(), &choice, base.path()).await;

    let root = base.path().join("projects/shop");
    let vue = std::fs::read_to_string(root.join("apps/client/src/App.vue")).unwrap();
    assert!(vue.contains("onMounted"));
    let koa = std::fs::read_to_string(root.join("apps/server/index.js")).unwrap();
    assert!(koa.contains("Hello from Koa!"));

    assert_eq!(summary::next_steps(&choice)[0], "cd projects/shop");
}
