//! Per-request bridge between HTTP bodies and a git subprocess.

use axum::body::Body;
use futures::TryStreamExt;
use gitgate_git::{GitService, PktLine};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::ChildStderr;
use tokio_util::io::{ReaderStream, StreamReader};

use crate::gitbin::GitBinary;
use crate::{GatewayError, Result};

/// Diagnostic bytes kept per subprocess; the rest is discarded so a
/// verbose or hostile child cannot grow the buffer without bound.
const STDERR_CAP: usize = 1024;

/// One request's view of a repository: the resolved on-disk path and the
/// git binary to run against it. Lives exactly as long as the request.
pub(crate) struct Session {
    repo_path: PathBuf,
    git: GitBinary,
}

impl Session {
    pub(crate) fn new(repo_path: PathBuf, git: GitBinary) -> Self {
        Self { repo_path, git }
    }

    pub(crate) fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Runs the stateless RPC round for `service`.
    ///
    /// The request body is piped into the child's stdin and the child's
    /// stdout becomes the response body, produced incrementally so pack
    /// data never has to fit in memory. The child is reaped by a detached
    /// task that also flushes its captured stderr to the error log; a
    /// failure after streaming began leaves the partial output standing.
    pub(crate) fn rpc(self, service: GitService, body: Body) -> Result<Body> {
        let mut child = self
            .git
            .command()
            .arg(service.subcommand())
            .arg("--stateless-rpc")
            .arg(&self.repo_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                GatewayError::Process(format!("failed to spawn {}: {e}", service.subcommand()))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| GatewayError::Process("child stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| GatewayError::Process("child stdout unavailable".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| GatewayError::Process("child stderr unavailable".to_string()))?;

        // Client body -> child stdin. A disconnect mid-upload surfaces as
        // an I/O error here; the child is left to the reaper below.
        tokio::spawn(async move {
            let stream = body.into_data_stream().map_err(std::io::Error::other);
            let mut reader = StreamReader::new(stream);
            if let Err(error) = tokio::io::copy(&mut reader, &mut stdin).await {
                tracing::warn!(%error, "request body copy interrupted");
            }
            // stdin drops here, closing the pipe so git sees EOF
        });

        let diagnostics = tokio::spawn(capture_stderr(stderr));

        let service_name = service.as_str();
        let repo = self.repo_path;
        tokio::spawn(async move {
            let status = child.wait().await;
            let captured = diagnostics.await.unwrap_or_default();
            let stderr_text = String::from_utf8_lossy(&captured);
            match status {
                Ok(status) if status.success() => {
                    if !captured.is_empty() {
                        tracing::debug!(
                            service = service_name,
                            stderr = %stderr_text,
                            "git diagnostics"
                        );
                    }
                }
                Ok(status) => {
                    tracing::error!(
                        service = service_name,
                        repo = %repo.display(),
                        %status,
                        stderr = %stderr_text,
                        "git exited abnormally"
                    );
                }
                Err(error) => {
                    tracing::error!(
                        service = service_name,
                        repo = %repo.display(),
                        %error,
                        "failed to reap git process"
                    );
                }
            }
        });

        Ok(Body::from_stream(ReaderStream::new(stdout)))
    }

    /// Runs the advertisement round for `service`, buffering the whole
    /// payload so the computed service header can precede it.
    pub(crate) async fn advertise(self, service: GitService) -> Result<Vec<u8>> {
        let output = self
            .git
            .command()
            .arg(service.subcommand())
            .arg("--stateless-rpc")
            .arg("--advertise-refs")
            .arg(&self.repo_path)
            .output()
            .await
            .map_err(|e| {
                GatewayError::Process(format!("failed to spawn {}: {e}", service.subcommand()))
            })?;

        if !output.status.success() {
            return Err(GatewayError::Process(format!(
                "{} --advertise-refs on {} exited with {}: {}",
                service.subcommand(),
                self.repo_path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let header = format!("# service={}\n", service.as_str());
        let mut payload = PktLine::from_string(&header).encode();
        payload.extend_from_slice(&PktLine::Flush.encode());
        payload.extend_from_slice(&output.stdout);
        Ok(payload)
    }
}

/// Drains a child's stderr, keeping at most [`STDERR_CAP`] bytes. The pipe
/// is read to EOF regardless so the child never blocks writing to it.
async fn capture_stderr(mut stderr: ChildStderr) -> Vec<u8> {
    let mut captured = Vec::new();
    let mut chunk = [0u8; 256];
    loop {
        match stderr.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let room = STDERR_CAP.saturating_sub(captured.len());
                captured.extend_from_slice(&chunk[..n.min(room)]);
            }
        }
    }
    captured
}
