use crate::format::format_gb;
use crate::system::delta::{MemoryDelta, Trend};
use crate::system::history::HistoryRow;
use crate::system::snapshot::MemorySnapshot;

const RISING_GLYPH: char = '#';
const RISING_END: char = '*';
const FLAT_END: char = 'o';
const FALLING_GLYPH: char = ':';
const FALLING_END: char = '@';

const CPU_BAR_LEAD: &str = "|||";

pub fn memory_text(snapshot: &MemorySnapshot) -> String {
    format!(
        "{} / {} -- {}/ {}",
        format_gb(snapshot.used_physical),
        format_gb(snapshot.total_physical),
        format_gb(snapshot.used_virtual),
        format_gb(snapshot.total_virtual),
    )
}

/// Glyph run for a memory change, e.g. `\t|#####* 0.05 (8.05)`.
pub fn memory_graph(delta: &MemoryDelta) -> String {
    let run = delta.glyph_run();
    let (glyph, end) = match delta.trend() {
        Trend::Rising if run == 0 => (RISING_GLYPH, FLAT_END),
        Trend::Rising => (RISING_GLYPH, RISING_END),
        Trend::Falling => (FALLING_GLYPH, FALLING_END),
    };
    let mut graph = String::with_capacity(run + 24);
    graph.push_str("\t|");
    graph.extend(std::iter::repeat_n(glyph, run));
    graph.push(end);
    graph.push_str(&format!(" {:.2} ({:.2})", delta.abs_diff(), delta.current));
    graph
}

pub fn memory_row(snapshot: &MemorySnapshot, delta: &MemoryDelta, graphics: bool) -> HistoryRow {
    let row = HistoryRow::new(memory_text(snapshot));
    if graphics {
        row.with_graph(&memory_graph(delta))
    } else {
        row
    }
}

pub fn cpu_graph(usage: f64) -> String {
    let bars = usage as usize;
    format!("{CPU_BAR_LEAD}{} {usage:.2}%", "|".repeat(bars))
}

pub fn cpu_row(usage: f64, graphics: bool) -> HistoryRow {
    let row = HistoryRow::new(String::new());
    if graphics {
        row.with_graph(&cpu_graph(usage))
    } else {
        row
    }
}
