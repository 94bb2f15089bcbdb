use crate::error::ProviderError;
use crate::system::snapshot::CpuSnapshot;

pub const STAT_PATH: &str = "/proc/stat";
pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

/// Needs user nice system idle iowait irq softirq; total excludes idle.
pub fn parse_cpu_counters(contents: &str) -> Result<CpuSnapshot, ProviderError> {
    let line = contents
        .lines()
        .find(|line| line.split_whitespace().next() == Some("cpu"))
        .ok_or_else(|| malformed("no aggregate cpu line"))?;

    let fields = line
        .split_whitespace()
        .skip(1)
        .take(7)
        .map(|field| {
            field
                .parse::<i64>()
                .map_err(|e| malformed(format!("bad counter {field:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let &[user, nice, system, idle, iowait, irq, softirq] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected 7 cpu counters, found {}",
            fields.len()
        )));
    };

    Ok(CpuSnapshot {
        idle_time: idle,
        total_time: user + nice + system + iowait + irq + softirq,
    })
}

pub fn count_processors(contents: &str) -> usize {
    contents
        .lines()
        .filter(|line| line.starts_with("processor"))
        .count()
}

fn malformed(detail: impl Into<String>) -> ProviderError {
    ProviderError::Malformed {
        path: STAT_PATH.to_string(),
        detail: detail.into(),
    }
}
