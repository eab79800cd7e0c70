//! package.json editing for the workspace root and app packages

use crate::choice::{ClientFramework, PackageManager};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Glob every workspace member lives under
pub const APPS_GLOB: &str = "apps/*";

/// Process runner the root `dev` script relies on
pub const CONCURRENTLY_VERSION: &str = "^9.1.2";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object", .path.display())]
    NotAnObject { path: PathBuf },
}

/// An order-preserving package.json loaded from disk
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageManifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(fields) => Ok(Self {
                path: path.to_path_buf(),
                fields,
            }),
            _ => Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    /// Set one entry under `scripts`, creating the table if needed
    pub fn set_script(&mut self, name: &str, command: &str) {
        let scripts = self
            .fields
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        if !scripts.is_object() {
            *scripts = Value::Object(Map::new());
        }
        if let Value::Object(table) = scripts {
            table.insert(name.to_string(), Value::String(command.to_string()));
        }
    }

    /// Pretty-printed with two-space indent and a trailing newline
    pub fn render(&self) -> String {
        let mut out = serde_json::to_string_pretty(&self.fields)
            .unwrap_or_else(|_| "{}".to_string());
        out.push('\n');
        out
    }

    pub fn save(&self) -> Result<(), ManifestError> {
        std::fs::write(&self.path, self.render()).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Root `dev` command starting client and server together
pub fn dev_script(pm: PackageManager, client: ClientFramework) -> String {
    let client_cmd = match client {
        ClientFramework::Angular => "cd apps/client && ng serve".to_string(),
        _ => pm.run_in("apps/client", "dev"),
    };
    let server_cmd = pm.run_in("apps/server", "start:dev");
    format!("concurrently \"{}\" \"{}\"", client_cmd, server_cmd)
}

/// Turn a freshly initialized manifest into the workspace root
pub fn configure_root(manifest: &mut PackageManifest, pm: PackageManager, client: ClientFramework) {
    manifest.set("private", Value::Bool(true));
    manifest.set("workspaces", json!([APPS_GLOB]));
    manifest.set("dependencies", json!({ "concurrently": CONCURRENTLY_VERSION }));
    manifest.set("scripts", json!({ "dev": dev_script(pm, client) }));
}
