use crate::{
    command_executor::motion::create_console_executor,
    config::{create_default_config, init_config},
    jog_page::{JogForm, JogPage},
    window::MainWindow,
};

use std::{path::PathBuf, sync::Arc};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub mod app;
pub mod command_executor;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod jog_page;
pub mod logging;
pub mod models;
pub mod window;

const UI_EVENT_CAPACITY: usize = 64;

fn should_create_config() -> bool {
    std::env::var("CREATE_CONFIG")
        .map(|val| val == "1" || val.to_lowercase() == "true")
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if should_create_config() {
        create_default_config(None::<PathBuf>)?;
    }

    let (_config_manager, config) = init_config().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Run with CREATE_CONFIG=1 to create a default configuration file.");
        e
    })?;

    let _log_guard = logging::init(&config.logging)?;

    let (executor, motion_sender) = create_console_executor(config.form.parameters);
    let executor_handle = executor.spawn();

    let jog_page = JogPage::new(JogForm::new(&config.form), Arc::new(motion_sender));
    let window = MainWindow::new(jog_page);

    let (events_tx, events_rx) = mpsc::channel(UI_EVENT_CAPACITY);
    // Plain thread: a pending stdin read must not hold up runtime shutdown.
    std::thread::spawn(move || {
        if let Err(e) = app::read_console(std::io::stdin().lock(), events_tx) {
            warn!("Console input failed: {}", e);
        }
    });

    info!("Jog controller ready, type `quit` to exit");
    let window = app::run_event_loop(window, events_rx, &config.timers).await;
    drop(window);

    executor_handle.await??;

    Ok(())
}
