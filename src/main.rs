//! Interactive terminal shell for the gallery engine.
//!
//! ```text
//! studio-gallery [config=<file.toml>] [key=value ...] [--offline]
//! ```
//!
//! Reads line commands from stdin (see `help`), feeds them to the runtime as
//! events and prints a frame whenever the view changes. A stdin task does
//! the reading; the runtime loop owns all state.

use std::io::Write;
use std::sync::{Arc, Mutex};
use studio_gallery::domain::ImageId;
use studio_gallery::shell::{parse_command, Command, HELP};
use studio_gallery::ui::render_to_string;
use studio_gallery::{initialize, observability, Config, RuntimeHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

const COLUMNS: usize = 72;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("studio-gallery: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let provider = observability::init_tracing(&config);
    let code = match run(config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "shell exited with an error");
            eprintln!("studio-gallery: {e}");
            std::process::ExitCode::FAILURE
        }
    };

    if let Some(provider) = provider {
        let _ = provider.shutdown();
    }
    code
}

async fn run(config: Config) -> studio_gallery::Result<()> {
    let theme = config.resolve_theme();
    let mut runtime = initialize(&config)?;
    let visible: Arc<Mutex<Vec<ImageId>>> = Arc::default();

    println!("{HELP}");
    runtime.start()?;
    tokio::spawn(read_commands(runtime.handle(), Arc::clone(&visible)));

    runtime
        .run(|vm| {
            if let Ok(mut ids) = visible.lock() {
                *ids = vm.cards.iter().map(|card| card.id.clone()).collect();
            }
            print!("{}", render_to_string(vm, &theme, COLUMNS));
            let _ = std::io::stdout().flush();
        })
        .await;

    tracing::info!("shell closed");
    Ok(())
}

async fn read_commands(handle: RuntimeHandle, visible: Arc<Mutex<Vec<ImageId>>>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stdin");
                break;
            }
        };

        let cards = visible.lock().map(|ids| ids.clone()).unwrap_or_default();
        match parse_command(&line, &cards, Instant::now()) {
            Ok(Command::Dispatch(events)) => {
                for event in events {
                    if !handle.send(event) {
                        return;
                    }
                }
            }
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Err(message) => println!("{message}"),
        }
    }

    handle.shutdown();
}
