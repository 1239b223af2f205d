//! Standalone gitgate server.
//!
//! Wires a gateway to a TCP listener: flag parsing, logging setup, the
//! one-time git discovery step, and graceful shutdown.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use gitgate_auth::{AllowAll, Authorizer, DenyAll, StaticCredentials};
use gitgate_server::{Gateway, GitBinary};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Git smart HTTP gateway
#[derive(Parser, Debug)]
#[command(name = "gitgate")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:8418")]
    listen: SocketAddr,

    /// Directory containing the served repositories
    #[arg(long, default_value = "./repos")]
    repo_root: PathBuf,

    /// Git installation root (uses <root>/bin/git); searches PATH when unset
    #[arg(long)]
    git_root: Option<PathBuf>,

    /// Authorization mode
    #[arg(long, value_enum, default_value = "open")]
    auth: AuthMode,

    /// user:password pair accepted in basic mode (repeatable)
    #[arg(long = "credential")]
    credentials: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    /// Grant every request
    Open,
    /// Deny every request
    Deny,
    /// Check Basic credentials against the --credential pairs
    Basic,
}

fn init_logging(level: &str, json: bool) {
    // The access target always logs so every request leaves a line even
    // when the configured level is quieter.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{level},access=info,tower_http=warn").into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn build_authorizer(args: &Args) -> anyhow::Result<Box<dyn Authorizer>> {
    match args.auth {
        AuthMode::Open => Ok(Box::new(AllowAll)),
        AuthMode::Deny => Ok(Box::new(DenyAll::new("gateway is closed"))),
        AuthMode::Basic => {
            let mut table = StaticCredentials::new();
            for pair in &args.credentials {
                let (user, password) = pair.split_once(':').with_context(|| {
                    format!("invalid --credential {pair:?}, expected user:password")
                })?;
                table = table.with_user(user, password);
            }
            if table.is_empty() {
                anyhow::bail!("basic auth mode needs at least one --credential");
            }
            Ok(Box::new(table))
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.log_json);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting gitgate");

    let git = GitBinary::locate(args.git_root.as_deref())
        .await
        .context("git executable discovery failed")?;
    tracing::info!(
        git = %git.path().display(),
        version = git.version(),
        "located git"
    );

    let authorizer = build_authorizer(&args)?;
    let router = Gateway::new(&args.repo_root, git, authorizer).into_router();

    tracing::info!(
        listen = %args.listen,
        repo_root = %args.repo_root.display(),
        auth = ?args.auth,
        "serving"
    );
    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["gitgate"]).unwrap();
        assert_eq!(args.auth, AuthMode::Open);
        assert_eq!(args.listen, "127.0.0.1:8418".parse().unwrap());
        assert!(args.git_root.is_none());
    }

    #[test]
    fn test_basic_mode_requires_credentials() {
        let args = Args::try_parse_from(["gitgate", "--auth", "basic"]).unwrap();
        assert!(build_authorizer(&args).is_err());
    }

    #[test]
    fn test_basic_mode_with_credentials() {
        let args = Args::try_parse_from([
            "gitgate",
            "--auth",
            "basic",
            "--credential",
            "alice:secret",
            "--credential",
            "bob:hunter2",
        ])
        .unwrap();
        assert!(build_authorizer(&args).is_ok());
    }

    #[test]
    fn test_malformed_credential_is_rejected() {
        let args =
            Args::try_parse_from(["gitgate", "--auth", "basic", "--credential", "no-colon"])
                .unwrap();
        assert!(build_authorizer(&args).is_err());
    }
}
