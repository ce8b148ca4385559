use std::io::BufRead;

use tokio::{
    sync::mpsc,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    commands::{parse_command, UiEvent},
    config::TimerConfig,
    window::MainWindow,
};

/// Reads console lines and forwards them as UI events until input ends or
/// the receiver goes away. Blocks, so it runs off the runtime.
pub fn read_console(input: impl BufRead, events: mpsc::Sender<UiEvent>) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(event) => {
                if events.blocking_send(event).is_err() {
                    break;
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    debug!("Console input closed");
    Ok(())
}

/// Drives the window from UI events and the two status timers. Returns the
/// window once `Quit` arrives or every event sender is dropped.
pub async fn run_event_loop(
    mut window: MainWindow,
    mut events: mpsc::Receiver<UiEvent>,
    timers: &TimerConfig,
) -> MainWindow {
    let mut page_tick = interval(timers.page_status_interval());
    page_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut window_tick = interval(timers.window_status_interval());
    window_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Event loop started");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(UiEvent::Jog(event)) => window.jog_page_mut().handle(event).await,
                Some(UiEvent::Window(event)) => window.handle(event),
                Some(UiEvent::Quit) | None => break,
            },
            _ = page_tick.tick() => window.jog_page_mut().update_status().await,
            _ = window_tick.tick() => window.update_status(),
        }

        for notice in window.jog_page_mut().take_notices() {
            warn!("Notice: {}", notice);
            eprintln!("{}", notice);
        }
    }

    info!("Event loop stopped");
    window
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        jog_page::{page::tests::RecordingDispatcher, JogForm, JogPage},
        models::{JogDirection, MotionCommand},
        window::Page,
    };

    fn window(dispatcher: Arc<RecordingDispatcher>) -> MainWindow {
        MainWindow::new(JogPage::new(JogForm::default(), dispatcher))
    }

    #[tokio::test]
    async fn console_lines_drive_the_window() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let (tx, rx) = mpsc::channel(16);

        let input: &'static [u8] = b"nav:jog\n\nset:speed:750\nbogus\njog:left\nstop\nquit\n";
        tokio::task::spawn_blocking(move || read_console(input, tx))
            .await
            .unwrap()
            .unwrap();

        let window = run_event_loop(window(dispatcher.clone()), rx, &TimerConfig::default()).await;

        assert_eq!(window.current_page(), Page::Jog);
        assert!(!window.jog_page().controller().is_jogging());
        assert_eq!(
            dispatcher.commands(),
            vec![
                MotionCommand::Jog {
                    direction: JogDirection::Negative,
                    speed: 750,
                },
                MotionCommand::Stop,
            ]
        );
    }

    #[tokio::test]
    async fn loop_ends_when_senders_are_dropped() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let (tx, rx) = mpsc::channel(4);
        tx.send(UiEvent::Jog(crate::jog_page::JogEvent::JogPressed(
            JogDirection::Positive,
        )))
        .await
        .unwrap();
        drop(tx);

        let window = run_event_loop(window(dispatcher), rx, &TimerConfig::default()).await;

        assert!(window.jog_page().controller().is_jogging());
    }
}
