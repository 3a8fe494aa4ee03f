mod assets;
mod config;
mod constants;
mod editor;
mod map;
mod paths;

use bevy::input::InputPlugin;
use bevy::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use constants::MAX_IO_WAIT_TICKS;
use map::{
    AsyncMapOperation, LastLoadReport, LoadMapRequest, MapDocument, MapLoadError, MapSaveError,
    SaveMapRequest,
};

const USAGE: &str = "usage: aottg-map-editor <map-script> [--out <path>]";

/// Set up stderr and file logging
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use std::fs::OpenOptions;
    use std::io::Write;
    use tracing_subscriber::prelude::*;

    let logs_dir = paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        return None;
    }

    let log_file_path = logs_dir.join("aottg-map-editor.log");

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(&logs_dir, "aottg-map-editor.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors for file output
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // stdout carries the exported script
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,aottg_map_editor=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Some(guard)
}

struct CliArgs {
    script: PathBuf,
    out: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut script = None;
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let path = args.next().ok_or("--out needs a path")?;
                out = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
            _ if script.is_none() => script = Some(PathBuf::from(&arg)),
            _ => return Err(format!("unexpected argument '{}'", arg)),
        }
    }

    Ok(CliArgs {
        script: script.ok_or("missing map script path")?,
        out,
    })
}

fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, InputPlugin))
        .add_plugins(config::ConfigPlugin)
        .add_plugins(assets::AssetLibraryPlugin)
        .add_plugins(map::MapPlugin)
        .add_plugins(editor::EditorPlugin);
    app.finish();
    app.cleanup();
    app
}

/// Tick the app until the pending map operation has finished
fn run_until_idle(app: &mut App) -> bool {
    for _ in 0..MAX_IO_WAIT_TICKS {
        app.update();
        if !app.world().resource::<AsyncMapOperation>().is_busy() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    false
}

fn main() -> ExitCode {
    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create application directories: {}", e);
    }

    // Keep the guard alive for the duration of the program
    let _log_guard = setup_logging();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    let mut app = build_app();
    app.update();

    app.world_mut().write_message(LoadMapRequest {
        path: args.script.clone(),
    });
    if !run_until_idle(&mut app) {
        error!("Timed out loading {:?}", args.script);
        return ExitCode::FAILURE;
    }
    if let Some(message) = &app.world().resource::<MapLoadError>().message {
        error!("{}", message);
        return ExitCode::FAILURE;
    }

    let world = app.world();
    let document = world.resource::<MapDocument>();
    if let Some(report) = &world.resource::<LastLoadReport>().report {
        info!(
            "{} objects, {} skipped records {:?}, bounds {}",
            document.len(),
            report.skipped.len(),
            report.skipped_indices(),
            if document.bounds_disabled() { "disabled" } else { "enabled" }
        );
    }

    let Some(out) = args.out else {
        print!("{}", document.export());
        return ExitCode::SUCCESS;
    };

    app.world_mut().write_message(SaveMapRequest { path: out.clone() });
    if !run_until_idle(&mut app) {
        error!("Timed out saving {:?}", out);
        return ExitCode::FAILURE;
    }
    if let Some(message) = &app.world().resource::<MapSaveError>().message {
        error!("{}", message);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
