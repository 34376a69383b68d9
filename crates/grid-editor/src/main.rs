//! Grid editor entry point.
//!
//! Loads the configuration, builds an empty board, and replays a drag script
//! against it.
//!
//! ```text
//! grid-editor [CONFIG] [SCRIPT]
//! ```
//!
//! `CONFIG` defaults to `grid-editor.toml` in the working directory (a missing
//! file means defaults).  `SCRIPT` defaults to standard input.  Command output
//! goes to stdout; logs and per-line errors go to stderr.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- TOML file or defaults
//!  └─ ScriptRunner::new()    -- Grid + DragSession
//!  └─ ScriptRunner::run()    -- one command per line
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_editor::infrastructure::script::ScriptRunner;
use grid_editor::infrastructure::storage::{config::DEFAULT_CONFIG_FILE, load_config};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args_os().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let script_path = args.next().map(PathBuf::from);

    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.editor.log_level)),
        )
        .init();

    let mut runner = ScriptRunner::new(config).context("building grid")?;
    let grid_cfg = runner.grid().config();
    info!(rows = grid_cfg.rows, cols = grid_cfg.cols, "grid editor ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    let summary = match script_path {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
            runner.run(BufReader::new(file), &mut out, &mut err)?
        }
        None => runner.run(io::stdin().lock(), &mut out, &mut err)?,
    };

    info!(
        executed = summary.executed,
        failed = summary.failed,
        items = runner.grid().items().len(),
        "script finished"
    );
    Ok(())
}
