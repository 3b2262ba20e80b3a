//! Demo host for `rawline`. Grounded on `example.cpp`'s prompt/echo/history
//! loop and `ox-bin::AppStartup`'s logging/panic-hook startup sequence.

use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "hello-rawline", version, about = "rawline demo host")]
struct Args {
    /// Path to the history file (created if missing).
    #[arg(long, default_value = "history.txt")]
    history: PathBuf,

    /// Start in multi-line display mode.
    #[arg(long)]
    multiline: bool,
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = std::path::Path::new(".");
    let log_path = log_dir.join("hello-rawline.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "hello-rawline.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        Err(_err) => None,
    }
}

fn completions(buf: &str) -> Vec<String> {
    if buf.starts_with('h') {
        vec!["hello".to_string(), "hello there".to_string()]
    } else {
        Vec::new()
    }
}

fn main() -> Result<()> {
    install_panic_hook();
    let _log_guard = configure_logging();

    let args = Args::parse();
    let config = rawline_config::Config::load();
    let mut ctx = rawline::Context::from_config(&config);
    ctx.set_multiline(args.multiline);
    ctx.set_completion_callback(completions);

    match ctx.load_history(&args.history) {
        Ok(_) => {}
        Err(err) => tracing::warn!(target: "history", error = %err, "failed to load history"),
    }

    loop {
        let result = ctx.readline("hello> ")?;
        if result.quit {
            break;
        }
        println!("echo: '{}'", result.line);
        ctx.add_history(result.line.clone());
        if let Err(err) = ctx.save_history(&args.history) {
            tracing::warn!(target: "history", error = %err, "failed to save history");
        }
    }

    Ok(())
}
