use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::StatError;
use crate::interrupt::{Control, Halt};
use crate::system::collector::collect_sample;
use crate::system::delta::DeltaEngine;
use crate::system::history::HistoryBuffer;
use crate::system::provider::StatProvider;
use crate::system::snapshot::AggregatedSample;
use crate::ui::rows::{cpu_row, memory_row};
use crate::ui::{DisplayMode, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every requested sample was taken.
    Completed,
    /// The user confirmed a quit before the last sample.
    Interrupted,
}

/// The tick loop: collect, compute deltas, render, sleep.
///
/// Owns the delta state and both history buffers; nothing else writes them.
pub struct App<P: StatProvider, W: Write> {
    provider: Arc<P>,
    settings: Settings,
    engine: DeltaEngine,
    memory_history: HistoryBuffer,
    cpu_history: HistoryBuffer,
    renderer: Renderer<W>,
    control: watch::Receiver<Control>,
}

impl<P: StatProvider, W: Write> App<P, W> {
    pub fn new(
        provider: Arc<P>,
        settings: Settings,
        out: W,
        control: watch::Receiver<Control>,
    ) -> Self {
        App {
            provider,
            settings,
            engine: DeltaEngine::new(),
            memory_history: HistoryBuffer::new(settings.samples),
            cpu_history: HistoryBuffer::new(settings.samples),
            renderer: Renderer::new(
                out,
                settings.mode,
                settings.graphics,
                settings.samples,
                settings.delay_secs,
            ),
            control,
        }
    }

    pub fn engine(&self) -> &DeltaEngine {
        &self.engine
    }

    pub fn memory_history(&self) -> &HistoryBuffer {
        &self.memory_history
    }

    pub fn cpu_history(&self) -> &HistoryBuffer {
        &self.cpu_history
    }

    pub fn renderer(&self) -> &Renderer<W> {
        &self.renderer
    }

    pub fn into_output(self) -> W {
        self.renderer.into_inner()
    }

    pub async fn run(&mut self) -> Result<RunOutcome, StatError> {
        let samples = self.settings.samples;
        let delay = Duration::from_secs(self.settings.delay_secs);

        for index in 0..samples {
            if let Control::Halt(halt) = self.control.borrow_and_update().clone() {
                return halted(halt);
            }

            let sample = tokio::select! {
                halt = wait_for_halt(&mut self.control) => return halted(halt),
                sample = collect_sample(&self.provider, self.settings.stats) => sample?,
            };
            debug!(tick = index + 1, "all collectors reported");

            self.render_tick(index, &sample)?;

            if index + 1 < samples {
                tokio::select! {
                    halt = wait_for_halt(&mut self.control) => return halted(halt),
                    () = tokio::time::sleep(delay) => {}
                }
                self.renderer.return_to_anchor()?;
            }
        }

        if let Some(halt) = settle_confirmation(&mut self.control).await {
            return halted(halt);
        }
        info!(samples, "sampling finished");
        Ok(RunOutcome::Completed)
    }

    /// Render one tick. Rows for tick `index` are complete before this returns.
    fn render_tick(&mut self, index: usize, sample: &AggregatedSample) -> Result<(), StatError> {
        let graphics = self.settings.graphics;
        self.renderer.begin_tick(index)?;

        if let Some(memory) = &sample.memory {
            let delta = self.engine.memory(memory.snapshot.used_physical);
            self.memory_history
                .push(memory_row(&memory.snapshot, &delta, graphics))?;
            self.renderer.memory(memory, &self.memory_history, index)?;
        }

        if let Some(sessions) = &sample.sessions {
            self.renderer.sessions(sessions)?;
        }

        if let Some(cpu) = &sample.cpu {
            let usage = self.engine.cpu(cpu.snapshot);
            self.cpu_history.push(cpu_row(usage, graphics))?;
            self.renderer.cpu(cpu, usage, &self.cpu_history, index)?;
        }

        self.renderer.end_tick()?;
        Ok(())
    }

    pub fn mode(&self) -> DisplayMode {
        self.renderer.mode()
    }
}

fn halted(halt: Halt) -> Result<RunOutcome, StatError> {
    match halt {
        Halt::Confirmed => Ok(RunOutcome::Interrupted),
        Halt::InputFailed(message) => Err(StatError::SignalInput(message)),
    }
}

/// Resolve once a halt is published. Never resolves if the controller is gone
/// without having published one.
async fn wait_for_halt(rx: &mut watch::Receiver<Control>) -> Halt {
    loop {
        if let Control::Halt(halt) = rx.borrow_and_update().clone() {
            return halt;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Hold until an open quit prompt is answered.
async fn settle_confirmation(rx: &mut watch::Receiver<Control>) -> Option<Halt> {
    // Let a signal that landed during the last tick reach the controller.
    tokio::task::yield_now().await;
    loop {
        match rx.borrow_and_update().clone() {
            Control::Running => return None,
            Control::Halt(halt) => return Some(halt),
            Control::Confirming => {}
        }
        if rx.changed().await.is_err() {
            return None;
        }
    }
}
