pub mod banner;
pub mod rows;

use std::io::{self, Write};

use crossterm::cursor::{RestorePosition, SavePosition};
use crossterm::queue;

use crate::system::history::HistoryBuffer;
use crate::system::snapshot::{CpuReading, MemoryReading, UserSession};

pub const SECTION_RULE: &str = "--------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Redraw a fixed block in place every tick.
    #[default]
    Refresh,
    /// Append each tick below the previous one.
    Sequential,
}

pub struct Renderer<W: Write> {
    out: W,
    mode: DisplayMode,
    graphics: bool,
    samples: usize,
    delay_secs: u64,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: DisplayMode, graphics: bool, samples: usize, delay_secs: u64) -> Self {
        Renderer {
            out,
            mode,
            graphics,
            samples,
            delay_secs,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn begin_tick(&mut self, index: usize) -> io::Result<()> {
        match self.mode {
            DisplayMode::Refresh => queue!(self.out, SavePosition)?,
            DisplayMode::Sequential => writeln!(self.out, ">>> iteration {}", index + 1)?,
        }
        writeln!(
            self.out,
            "Number of samples: {} -- every {} secs",
            self.samples, self.delay_secs
        )
    }

    pub fn memory(
        &mut self,
        reading: &MemoryReading,
        history: &HistoryBuffer,
        index: usize,
    ) -> io::Result<()> {
        writeln!(self.out, "MemoryUsage: {} kilobytes", reading.peak_resident_kb)?;
        writeln!(self.out, "{SECTION_RULE}")?;
        writeln!(
            self.out,
            "### Memory ### (Phys.Used/Tot -- Virtual Used/Tot)"
        )?;
        self.history_block(history, index)
    }

    pub fn sessions(&mut self, sessions: &[UserSession]) -> io::Result<()> {
        writeln!(self.out, "{SECTION_RULE}")?;
        writeln!(self.out, "### Sessions/users ###")?;
        for session in sessions {
            writeln!(
                self.out,
                "{}\t{} ({})",
                session.user, session.line, session.host
            )?;
        }
        Ok(())
    }

    pub fn cpu(
        &mut self,
        reading: &CpuReading,
        usage: f64,
        history: &HistoryBuffer,
        index: usize,
    ) -> io::Result<()> {
        writeln!(self.out, "{SECTION_RULE}")?;
        writeln!(self.out, "Number of Cores: {}", reading.cores)?;
        writeln!(self.out, "CPU Usage: {usage:.2}%")?;
        if self.graphics {
            self.history_block(history, index)?;
        }
        Ok(())
    }

    pub fn end_tick(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Move the cursor back to where the current tick started.
    pub fn return_to_anchor(&mut self) -> io::Result<()> {
        if self.mode == DisplayMode::Refresh {
            queue!(self.out, RestorePosition)?;
        }
        self.out.flush()
    }

    fn history_block(&mut self, history: &HistoryBuffer, index: usize) -> io::Result<()> {
        match self.mode {
            DisplayMode::Sequential => {
                if let Some(row) = history.get(index) {
                    writeln!(self.out, "{}", row.as_str())?;
                }
            }
            DisplayMode::Refresh => {
                let rows = history.rows_through(index);
                for row in rows {
                    writeln!(self.out, "{}", row.as_str())?;
                }
                for _ in rows.len()..history.capacity() {
                    writeln!(self.out)?;
                }
            }
        }
        Ok(())
    }
}
