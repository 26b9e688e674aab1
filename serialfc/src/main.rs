// src/main.rs

//! `serialfc` entry-point: apply a settings profile to a SerialFC port.
//!
//! 1. Locate and parse configuration (`serialfc.toml` or the first argument)
//! 2. Set up structured logging
//! 3. Open the port named in `[port]`
//! 4. Apply `[profile]`, then log every readable setting
//! 5. Close the port, surfacing close errors

// ───── std / 3rd-party imports ──────────────────────────────────────────────
use anyhow::Context;
use chrono::Local;
use fern::Dispatch;
use std::{
    path::{Path, PathBuf},
    process,
    thread,
};

// ───── local imports ────────────────────────────────────────────────────────
use serialfc::config::{self, Config, LoggingConfig};

const CONFIG_FILE: &str = "serialfc.toml";

// ───── helpers ──────────────────────────────────────────────────────────────

/// Print an error with context and terminate the process.
macro_rules! fatal {
    ($ctx:expr, $($arg:tt)+) => {{
        eprintln!(
            "[{}][ERROR][{}] {}",
            chrono::Local::now().to_rfc3339(),
            $ctx,
            format!($($arg)+)
        );
        std::process::exit(1);
    }};
}

/// Directory that contains the running executable.
fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| fatal!("startup", "cannot determine executable directory"))
}

/// First argument, or `serialfc.toml` next to the executable.
fn config_path(exe_dir: &Path) -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| exe_dir.join(CONFIG_FILE))
}

/// Configure global logging as requested in `[logging]`.
fn setup_logging(exe_dir: &Path, logging: &LoggingConfig) -> anyhow::Result<()> {
    let level = logging.level_filter()?;

    let log_path = logging
        .enable
        .then(|| exe_dir.join(logging.file.as_deref().unwrap_or("serialfc.log")));

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}][pid={}][tid={:?}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                process::id(),
                thread::current().id(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(&path).with_context(|| format!("opening {}", path.display()))?);
    }

    dispatch.apply()?;
    Ok(())
}

// ───── port logic ───────────────────────────────────────────────────────────

#[cfg(windows)]
fn run(cfg: &Config) -> anyhow::Result<()> {
    use serialfc::Port;

    let path = cfg.port.device_path()?;
    let mut port = Port::open(&path).with_context(|| format!("opening {path}"))?;

    port.apply(&cfg.profile).context("applying profile")?;

    for (name, value) in port.snapshot() {
        match value {
            Ok(value) => log::info!("{name} = {value}"),
            Err(e) => log::warn!("{name}: {e}"),
        }
    }

    port.close().with_context(|| format!("closing {path}"))?;
    Ok(())
}

#[cfg(not(windows))]
fn run(_cfg: &Config) -> anyhow::Result<()> {
    anyhow::bail!("the SerialFC driver interface is only available on Windows")
}

fn main() {
    // 1 ─ Configuration
    let exe_dir = exe_dir();
    let cfg_path = config_path(&exe_dir);
    let cfg = config::load(&cfg_path)
        .unwrap_or_else(|e| fatal!("config", "{}: {}", cfg_path.display(), e));

    // 2 ─ Logging
    if let Err(e) = setup_logging(&exe_dir, &cfg.logging) {
        fatal!("logging", "{:#}", e);
    }
    log::info!("Using configuration {}", cfg_path.display());

    // 3..5 ─ Port
    if let Err(e) = run(&cfg) {
        log::error!("{:#}", e);
        process::exit(1);
    }
    log::info!("Done");
}
