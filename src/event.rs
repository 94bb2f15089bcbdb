use std::io;

use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalEvent {
    Cancel,
    /// Ctrl+Z / SIGTSTP. Never stops the process.
    Suspend,
}

pub struct SignalHandler {
    rx: mpsc::UnboundedReceiver<SignalEvent>,
    _task: Option<tokio::task::JoinHandle<()>>,
}

impl SignalHandler {
    /// Once registered, SIGINT and SIGTSTP lose their default effect.
    #[cfg(unix)]
    pub fn new() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let (tx, rx) = mpsc::unbounded_channel::<SignalEvent>();
        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut suspend = signal(SignalKind::from_raw(libc::SIGTSTP))?;

        let task = tokio::spawn(async move {
            loop {
                let event = tokio::select! {
                    Some(()) = interrupt.recv() => SignalEvent::Cancel,
                    Some(()) = suspend.recv() => SignalEvent::Suspend,
                    else => break,
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            rx,
            _task: Some(task),
        })
    }

    #[cfg(not(unix))]
    pub fn new() -> io::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel::<SignalEvent>();
        let task = tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if tx.send(SignalEvent::Cancel).is_err() {
                    break;
                }
            }
        });
        Ok(Self {
            rx,
            _task: Some(task),
        })
    }

    /// A handler fed from an existing channel instead of the OS.
    pub fn from_channel(rx: mpsc::UnboundedReceiver<SignalEvent>) -> Self {
        Self { rx, _task: None }
    }

    pub async fn next(&mut self) -> Option<SignalEvent> {
        self.rx.recv().await
    }
}
