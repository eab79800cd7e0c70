//! Targeted edits to files produced by third-party generators
//!
//! Generated apps are treated as opaque. A patch names one file relative to the app
//! directory and one transform; a missing file or anchor is reported, never an error.

use crate::workspace::manifest::PackageManifest;
use anyhow::{Context, Result};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

/// What to do to a single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Replace the whole file
    Overwrite(&'static str),

    /// Insert text right after the first `anchor` match, unless the file already
    /// contains `unless_contains`
    InsertAfter {
        anchor: &'static str,
        insertion: &'static str,
        unless_contains: &'static str,
    },

    /// Set `scripts.<name>` in a package.json
    SetScript {
        name: &'static str,
        command: &'static str,
    },
}

/// A transform bound to a path inside the app directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    pub path: &'static str,
    pub transform: Transform,
}

impl FilePatch {
    pub const fn overwrite(path: &'static str, contents: &'static str) -> Self {
        Self {
            path,
            transform: Transform::Overwrite(contents),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Applied,
    /// The guard text was already present
    AlreadyPresent,
    AnchorNotFound,
    /// The generator did not produce the file
    Missing,
}

impl PatchOutcome {
    /// Whether the operator should hear about it
    pub fn is_warning(&self) -> bool {
        matches!(self, PatchOutcome::AnchorNotFound | PatchOutcome::Missing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    pub path: PathBuf,
    pub outcome: PatchOutcome,
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match self.outcome {
            PatchOutcome::Applied => write!(f, "Patched {}", path),
            PatchOutcome::AlreadyPresent => write!(f, "{} already patched", path),
            PatchOutcome::AnchorNotFound => {
                write!(f, "Skipped {}: expected code not found", path)
            }
            PatchOutcome::Missing => write!(f, "Skipped {}: file not generated", path),
        }
    }
}

/// Apply one patch inside `app_dir`
pub fn apply_patch(app_dir: &Path, patch: &FilePatch) -> Result<PatchReport> {
    let path = app_dir.join(patch.path);
    let report = |outcome| PatchReport {
        path: path.clone(),
        outcome,
    };

    if !path.is_file() {
        return Ok(report(PatchOutcome::Missing));
    }

    let outcome = match &patch.transform {
        Transform::Overwrite(contents) => {
            std::fs::write(&path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            PatchOutcome::Applied
        }
        Transform::InsertAfter {
            anchor,
            insertion,
            unless_contains,
        } => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match insert_after(&content, anchor, insertion, unless_contains)? {
                Insert::Done(updated) => {
                    std::fs::write(&path, updated)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    PatchOutcome::Applied
                }
                Insert::Guarded => PatchOutcome::AlreadyPresent,
                Insert::NoAnchor => PatchOutcome::AnchorNotFound,
            }
        }
        Transform::SetScript { name, command } => {
            let mut manifest = PackageManifest::load(&path)?;
            manifest.set_script(name, command);
            manifest.save()?;
            PatchOutcome::Applied
        }
    };

    Ok(report(outcome))
}

/// Apply patches in order, collecting one report each
pub fn apply_patches(app_dir: &Path, patches: &[FilePatch]) -> Result<Vec<PatchReport>> {
    patches.iter().map(|p| apply_patch(app_dir, p)).collect()
}

enum Insert {
    Done(String),
    Guarded,
    NoAnchor,
}

fn insert_after(content: &str, anchor: &str, insertion: &str, guard: &str) -> Result<Insert> {
    if content.contains(guard) {
        return Ok(Insert::Guarded);
    }

    let re = Regex::new(anchor).with_context(|| format!("Invalid anchor pattern: {}", anchor))?;
    let Some(found) = re.find(content) else {
        return Ok(Insert::NoAnchor);
    };

    let mut updated = String::with_capacity(content.len() + insertion.len());
    updated.push_str(&content[..found.end()]);
    updated.push_str(insertion);
    updated.push_str(&content[found.end()..]);
    Ok(Insert::Done(updated))
}
