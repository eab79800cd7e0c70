//! Project name validation

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a project name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectNameError {
    #[error("Project name cannot be empty")]
    Empty,

    #[error("Project name may only contain letters, digits, '-', '_', '.' and '/' (found '{0}')")]
    InvalidCharacters(char),

    #[error("Directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '/' | '.' | '-')
}

/// Resolve a project name against `base` (absolute names are kept as-is)
pub fn resolve_project_dir(name: &str, base: &Path) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Validate a project name and return the directory it resolves to
///
/// The existence check is a snapshot; creation later uses a non-recursive
/// `create_dir`, so a directory appearing in between fails the run.
pub fn validate_project_name(input: &str, base: &Path) -> Result<PathBuf, ProjectNameError> {
    if input.trim().is_empty() {
        return Err(ProjectNameError::Empty);
    }

    if let Some(bad) = input.chars().find(|c| !is_allowed(*c)) {
        return Err(ProjectNameError::InvalidCharacters(bad));
    }

    let dir = resolve_project_dir(input, base);
    if dir.exists() {
        return Err(ProjectNameError::AlreadyExists(dir));
    }

    Ok(dir)
}
