//! Discovery of the external git executable.

use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::{GatewayError, Result};

/// The located git executable, immutable for the process lifetime.
///
/// Discovery runs exactly once before the server accepts requests and a
/// failure aborts startup; requests never re-resolve the binary.
#[derive(Debug, Clone)]
pub struct GitBinary {
    path: PathBuf,
    version: String,
}

impl GitBinary {
    /// Locates git under `install_root/bin`, or on `PATH` when no root is
    /// given, and verifies that it runs.
    pub async fn locate(install_root: Option<&Path>) -> Result<Self> {
        let path = match install_root {
            Some(root) => {
                let candidate = root.join("bin").join("git");
                if !candidate.is_file() {
                    return Err(GatewayError::Process(format!(
                        "git executable not found at {}",
                        candidate.display()
                    )));
                }
                candidate
            }
            None => search_path().ok_or_else(|| {
                GatewayError::Process("git executable not found on PATH".to_string())
            })?,
        };

        let output = Command::new(&path).arg("version").output().await.map_err(|e| {
            GatewayError::Process(format!("failed to run {}: {e}", path.display()))
        })?;
        if !output.status.success() {
            return Err(GatewayError::Process(format!(
                "{} version exited with {}",
                path.display(),
                output.status
            )));
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();

        Ok(Self { path, version })
    }

    /// Path to the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The reported `git version` string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Starts building an invocation of the binary.
    pub fn command(&self) -> Command {
        Command::new(&self.path)
    }

    /// Wraps `path` without running it. Lets routing and authorization
    /// tests prove that no subprocess is spawned.
    #[cfg(test)]
    pub(crate) fn unverified(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            version: String::new(),
        }
    }
}

fn search_path() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join("git"))
        .find(|candidate| candidate.is_file())
}
