//! Provenance sidecars for CLI artifacts.
//!
//! Every artifact `<dir>/<name>` gets `<dir>/<name>.provenance.json`. The full
//! file name (extension included) keys the sidecar, so `report.json` and
//! `report.csv` written by the same run keep separate records. A sidecar lists
//! the artifacts it was derived from together with their own sidecars.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a CLI artifact holds.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    Report,
    CellTable,
    LatticeTable,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
struct Upstream {
    path: String,
    provenance: String,
}

/// Metadata of one artifact: its kind, the run params and upstream artifacts.
pub struct Sidecar {
    kind: Artifact,
    params: Value,
    inputs: Vec<Upstream>,
}

impl Sidecar {
    pub fn new(kind: Artifact, params: Value) -> Self {
        Self {
            kind,
            params,
            inputs: Vec::new(),
        }
    }

    /// Record an artifact this one was derived from.
    pub fn derived_from(mut self, upstream: &Path) -> Self {
        self.inputs.push(Upstream {
            path: upstream.to_string_lossy().into_owned(),
            provenance: provenance_path(upstream).to_string_lossy().into_owned(),
        });
        self
    }

    /// Write the sidecar next to `artifact`; returns its path.
    #[track_caller]
    pub fn write(self, artifact: &Path) -> Result<PathBuf> {
        let path = provenance_path(artifact);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating provenance dir {}", parent.display()))?;
            }
        }
        let callsite = Location::caller();
        let mut doc = header();
        doc["kind"] = serde_json::to_value(self.kind)?;
        doc["callsite"] = json!({ "file": callsite.file(), "line": callsite.line() });
        doc["params"] = self.params;
        doc["inputs"] = serde_json::to_value(&self.inputs)?;
        doc["outputs"] = json!([artifact.to_string_lossy()]);
        fs::write(&path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), kind = ?self.kind, "provenance_written");
        Ok(path)
    }
}

/// The fields shared by every provenance document.
pub fn header() -> Value {
    json!({
        "code_rev": current_git_rev(),
        "crate_version": inscribe::VERSION,
    })
}

/// `<name>.provenance.json` next to the artifact, keyed on the full file name.
pub fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_name()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "artifact".into());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
