//! Confirm-before-quit handling for Ctrl+C.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::event::{SignalEvent, SignalHandler};

const PROMPT: &str = "\nDo you want to quit? [y/n]: ";
const RESUMING: &str = "\nSignal detected during input, resuming...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterruptState {
    #[default]
    Armed,
    AwaitingConfirmation,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterruptEvent {
    Cancel,
    Suspend,
    Answer(String),
    /// Reading the answer was cut short by another signal.
    ReadInterrupted,
}

impl From<SignalEvent> for InterruptEvent {
    fn from(signal: SignalEvent) -> Self {
        match signal {
            SignalEvent::Cancel => InterruptEvent::Cancel,
            SignalEvent::Suspend => InterruptEvent::Suspend,
        }
    }
}

impl InterruptState {
    pub fn next(self, event: &InterruptEvent) -> InterruptState {
        use InterruptEvent::*;
        use InterruptState::*;

        match (self, event) {
            (Terminated, _) => Terminated,
            (state, Suspend) => state,
            (Armed, Cancel) => AwaitingConfirmation,
            (Armed, Answer(_) | ReadInterrupted) => Armed,
            (AwaitingConfirmation, Answer(answer)) if is_affirmative(answer) => Terminated,
            (AwaitingConfirmation, Answer(_) | ReadInterrupted) => Armed,
            (AwaitingConfirmation, Cancel) => AwaitingConfirmation,
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim_start().chars().next(), Some('y' | 'Y'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    Confirmed,
    /// The answer could not be read at all.
    InputFailed(String),
}

/// Latest word from the controller to the tick loop.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Control {
    #[default]
    Running,
    /// A quit prompt is open and unanswered.
    Confirming,
    Halt(Halt),
}

impl From<InterruptState> for Control {
    fn from(state: InterruptState) -> Self {
        match state {
            InterruptState::Armed => Control::Running,
            InterruptState::AwaitingConfirmation => Control::Confirming,
            InterruptState::Terminated => Control::Halt(Halt::Confirmed),
        }
    }
}

#[derive(Debug, Default)]
pub struct InterruptController {
    state: InterruptState,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, event: &InterruptEvent, control: &watch::Sender<Control>) {
        let next = self.state.next(event);
        if next != self.state {
            debug!(from = ?self.state, to = ?next, ?event, "interrupt state changed");
            control.send_replace(next.into());
        }
        self.state = next;
    }

    /// Runs until the signal source closes or the user confirms.
    pub async fn run<R, W>(
        mut self,
        mut signals: SignalHandler,
        mut input: R,
        mut output: W,
        control: watch::Sender<Control>,
    ) -> InterruptState
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        while let Some(signal) = signals.next().await {
            self.apply(&signal.into(), &control);

            while self.state == InterruptState::AwaitingConfirmation {
                match await_answer(&mut signals, &mut input, &mut output).await {
                    Ok(event) => self.apply(&event, &control),
                    Err(message) => {
                        control.send_replace(Control::Halt(Halt::InputFailed(message)));
                        return self.state;
                    }
                }
            }

            if self.state == InterruptState::Terminated {
                info!("quit confirmed");
                break;
            }
        }
        self.state
    }
}

async fn await_answer<R, W>(
    signals: &mut SignalHandler,
    input: &mut R,
    output: &mut W,
) -> Result<InterruptEvent, String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(output, "{PROMPT}")
        .and_then(|()| output.flush())
        .map_err(|e| e.to_string())?;

    let event = tokio::select! {
        answer = read_answer(input) => answer?,
        Some(signal) = signals.next() => match signal {
            SignalEvent::Suspend => InterruptEvent::ReadInterrupted,
            SignalEvent::Cancel => InterruptEvent::Cancel,
        },
    };

    if event == InterruptEvent::ReadInterrupted {
        writeln!(output, "{RESUMING}")
            .and_then(|()| output.flush())
            .map_err(|e| e.to_string())?;
    }
    Ok(event)
}

async fn read_answer<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<InterruptEvent, String> {
    let mut line = String::new();
    loop {
        line.clear();
        match input.read_line(&mut line).await {
            Ok(0) => return Err("end of input".to_string()),
            Ok(_) if line.trim().is_empty() => continue,
            Ok(_) => return Ok(InterruptEvent::Answer(line.trim().to_string())),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                return Ok(InterruptEvent::ReadInterrupted);
            }
            Err(e) => return Err(e.to_string()),
        }
    }
}
