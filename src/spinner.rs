//! Busy indicator for the trigger control.

use std::io::Write;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::consts::LOADING_LABEL;
use crate::state::ViewState;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// Animates on stderr whenever the observed state is loading, and clears
/// its line otherwise. Runs until [`Spinner::stop`] or until the state's
/// sender is dropped.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: watch::Sender<bool>,
}

impl Spinner {
    pub fn follow(mut state: watch::Receiver<ViewState>) -> Self {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut i = 0;
            loop {
                let loading = state.borrow_and_update().is_loading();
                if loading {
                    // \r moves to start of line, \x1b[2K clears the line
                    eprint!("\x1b[2K\r{} {LOADING_LABEL}", FRAMES[i % FRAMES.len()]);
                    i += 1;
                } else {
                    eprint!("\x1b[2K\r");
                }
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL), if loading => {}
                    changed = state.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = cancel_rx.changed() => break,
                }
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}
