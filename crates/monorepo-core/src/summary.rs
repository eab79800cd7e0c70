//! Final project tree and next-step instructions

use crate::choice::ScaffoldChoice;
use crate::workspace::PnpmWorkspace;

/// Static tree view of the generated workspace
pub fn project_tree(choice: &ScaffoldChoice) -> String {
    let mut lines = vec![
        format!("{}/", choice.project_name.trim_end_matches('/')),
        "├── package.json".to_string(),
    ];
    if choice.package_manager.writes_workspace_file() {
        lines.push(format!("├── {}", PnpmWorkspace::FILE_NAME));
    }
    lines.push("└── apps/".to_string());
    lines.push(format!("    ├── client/ ({})", choice.client));
    lines.push(format!("    └── server/ ({})", choice.server));
    lines.join("\n")
}

/// Commands to run after scaffolding, in order
pub fn next_steps(choice: &ScaffoldChoice) -> Vec<String> {
    let pm = choice.package_manager;
    vec![
        format!("cd {}", choice.project_name),
        format!("{} install", pm),
        format!("{} run dev", pm),
    ]
}
