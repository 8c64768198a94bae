use crate::input::key::Key;
use crate::input::InputEvent;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::time::{interval, Interval};

/// Pumps crossterm key presses into a channel, and ticks for redrawing
/// fetch results which arrive in the background.
pub struct Events {
    rx: Receiver<InputEvent>,
    // keeps the channel open while the reader is paused
    _tx: Sender<InputEvent>,
    stop_capture: Arc<AtomicBool>,
    interval: Interval,
}

impl Events {
    pub fn new(render_rate: Duration) -> Events {
        let (tx, rx) = channel(100);
        let stop_capture = Arc::new(AtomicBool::new(false));

        let event_tx = tx.clone();
        let event_stop_capture = stop_capture.clone();
        tokio::spawn(async move {
            loop {
                match crossterm::event::poll(render_rate) {
                    Ok(true) => match crossterm::event::read() {
                        Ok(crossterm::event::Event::Key(key)) => {
                            let key = Key::from_event(key);
                            if key != Key::Unknown {
                                if let Err(err) = event_tx.send(InputEvent::Input(key)).await {
                                    log::error!("Failed to forward key: {err}");
                                }
                            }
                        }
                        Ok(_) => {}
                        Err(err) => {
                            log::error!("Failed to read terminal event: {err}");
                            let _ = event_tx.send(InputEvent::Quit).await;
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(err) => {
                        log::error!("Failed to poll terminal: {err}");
                        let _ = event_tx.send(InputEvent::Quit).await;
                        break;
                    }
                }
                if event_stop_capture.load(Ordering::Relaxed) {
                    break;
                }
            }
        });

        Events {
            rx,
            _tx: tx,
            stop_capture,
            interval: interval(render_rate),
        }
    }

    pub async fn next(&mut self) -> InputEvent {
        select! {
            msg = self.rx.recv() => msg.unwrap_or(InputEvent::Quit),
            _ = self.interval.tick() => InputEvent::Render,
        }
    }
}

impl Drop for Events {
    fn drop(&mut self) {
        self.stop_capture.store(true, Ordering::Relaxed)
    }
}
