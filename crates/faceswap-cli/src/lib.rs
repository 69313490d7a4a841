//! Deployment self-check for the face swap service.
//!
//! Verifies the static directories, the `.env` file and the settings the
//! server refuses to work without.

use anyhow::Context;
use faceswap_core::StorageArea;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Where the checks look
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Parent of the generated, templates_gallery and user_uploads directories
    pub static_root: PathBuf,
    pub env_file: PathBuf,
    /// Create missing static directories instead of reporting them
    pub create: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Created,
    Missing,
}

impl CheckStatus {
    pub fn passed(&self) -> bool {
        !matches!(self, CheckStatus::Missing)
    }

    fn marker(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "[ok]",
            CheckStatus::Created => "[created]",
            CheckStatus::Missing => "[missing]",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

impl CheckItem {
    fn new(name: impl Into<String>, status: CheckStatus, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    pub ready: bool,
    pub checks: Vec<CheckItem>,
}

impl DeploymentReport {
    fn from_checks(checks: Vec<CheckItem>) -> Self {
        Self {
            ready: checks.iter().all(|c| c.status.passed()),
            checks,
        }
    }

    pub fn missing(&self) -> impl Iterator<Item = &CheckItem> {
        self.checks.iter().filter(|c| !c.status.passed())
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Face Swap - Deployment Check");
        let _ = writeln!(out, "{}", "=".repeat(40));
        for check in &self.checks {
            let _ = writeln!(
                out,
                "{:<10} {}: {}",
                check.status.marker(),
                check.name,
                check.detail
            );
        }
        let _ = writeln!(out);
        if self.ready {
            let _ = writeln!(out, "Deployment ready.");
        } else {
            let _ = writeln!(
                out,
                "Deployment not ready: {} check(s) failed.",
                self.missing().count()
            );
        }
        out
    }
}

/// Run every check. `lookup` reads the process environment; values in the
/// `.env` file take part as well, the way the server loads them.
pub fn run_checks<F>(options: &CheckOptions, lookup: F) -> anyhow::Result<DeploymentReport>
where
    F: Fn(&str) -> Option<String>,
{
    let mut checks = Vec::new();

    for area in StorageArea::ALL {
        checks.push(check_directory(
            &options.static_root.join(area.dir_name()),
            options.create,
        )?);
    }

    let env_file = read_env_file(&options.env_file)?;
    checks.push(match env_file {
        Some(_) => CheckItem::new(
            ".env",
            CheckStatus::Ok,
            format!("found at {}", options.env_file.display()),
        ),
        None => CheckItem::new(
            ".env",
            CheckStatus::Missing,
            format!("{} not found", options.env_file.display()),
        ),
    });

    let file_values = env_file.unwrap_or_default();
    checks.push(check_setting(
        "GEMINI_API_KEY",
        &file_values,
        &lookup,
        "swap requests fail without it",
    ));
    checks.push(check_setting(
        "ADMIN_PASSWORD",
        &file_values,
        &lookup,
        "the server refuses to start without it",
    ));

    Ok(DeploymentReport::from_checks(checks))
}

fn check_directory(path: &Path, create: bool) -> anyhow::Result<CheckItem> {
    let name = path.display().to_string();

    if path.is_dir() {
        return Ok(CheckItem::new(name, CheckStatus::Ok, "directory exists"));
    }

    if create {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
        tracing::info!(path = %path.display(), "Created static directory");
        return Ok(CheckItem::new(name, CheckStatus::Created, "directory created"));
    }

    Ok(CheckItem::new(
        name,
        CheckStatus::Missing,
        "directory missing (rerun with --create)",
    ))
}

/// Parsed `.env` entries, or `None` when the file does not exist.
fn read_env_file(path: &Path) -> anyhow::Result<Option<HashMap<String, String>>> {
    if !path.is_file() {
        return Ok(None);
    }

    let entries = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .collect::<Result<HashMap<_, _>, _>>()
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    Ok(Some(entries))
}

fn check_setting<F>(
    key: &str,
    file_values: &HashMap<String, String>,
    lookup: &F,
    consequence: &str,
) -> CheckItem
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |v: &String| !v.trim().is_empty();

    if file_values.get(key).is_some_and(non_empty) {
        CheckItem::new(key, CheckStatus::Ok, "configured in .env")
    } else if lookup(key).as_ref().is_some_and(non_empty) {
        CheckItem::new(key, CheckStatus::Ok, "configured in environment")
    } else {
        CheckItem::new(key, CheckStatus::Missing, format!("not set; {}", consequence))
    }
}

/// Initialize tracing for the CLI.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
