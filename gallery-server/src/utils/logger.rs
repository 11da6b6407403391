//! Logging Infrastructure
//!
//! Console output always; with a log directory, two daily rolling files:
//! - `app/`: everything except security events
//! - `security/`: events emitted with `target: "security"` ([`security_log!`](crate::security_log))
//!
//! `RUST_LOG` takes precedence over the configured level.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Target used by [`security_log!`](crate::security_log)
pub const SECURITY_TARGET: &str = "security";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer(json: bool) -> BoxedLayer {
    let layer = fmt::layer().with_target(true);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Rolling file layer keeping either only security events or everything else
fn file_layer(dir: &Path, prefix: &str, json: bool, security: bool) -> BoxedLayer {
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, prefix);
    let layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(appender);
    let only = filter::filter_fn(move |meta| (meta.target() == SECURITY_TARGET) == security);
    if json {
        layer.json().with_filter(only).boxed()
    } else {
        layer.with_filter(only).boxed()
    }
}

/// Initialize logging with optional JSON format and file output
///
/// ```no_run
/// // development
/// gallery_server::init_logger_with_file(Some("debug"), false, None)?;
/// // production
/// gallery_server::init_logger_with_file(Some("info"), true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: Option<&str>,
    json: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let level = level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut layers = vec![console_layer(json)];
    if let Some(dir) = log_dir {
        let root = Path::new(dir);
        let app_dir = root.join("app");
        let security_dir = root.join("security");
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("Failed to create log directory {}", app_dir.display()))?;
        fs::create_dir_all(&security_dir).with_context(|| {
            format!("Failed to create log directory {}", security_dir.display())
        })?;

        layers.push(file_layer(&app_dir, "app", json, false));
        layers.push(file_layer(&security_dir, "security", json, true));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directories_created() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("logs");
        // a subscriber may already be installed by another test; the
        // directories are created before that matters
        let _ = init_logger_with_file(Some("info"), false, root.to_str());
        assert!(root.join("app").is_dir());
        assert!(root.join("security").is_dir());
    }
}
