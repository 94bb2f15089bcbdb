use super::snapshot::CpuSnapshot;

pub const MEMORY_GLYPH_GB: f64 = 0.01;

const CPU_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeltaState {
    /// `None` until the first memory reading.
    pub previous_used_memory: Option<f64>,
    pub previous_cpu_total: i64,
    pub previous_cpu_idle: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryDelta {
    pub diff: f64,
    pub current: f64,
}

impl MemoryDelta {
    pub fn abs_diff(&self) -> f64 {
        self.diff.abs()
    }

    pub fn trend(&self) -> Trend {
        if self.diff >= 0.0 {
            Trend::Rising
        } else {
            Trend::Falling
        }
    }

    pub fn glyph_run(&self) -> usize {
        (self.abs_diff() / MEMORY_GLYPH_GB) as usize
    }
}

/// With no previous reading the first change is zero.
pub fn memory_delta(current: f64, previous: Option<f64>) -> MemoryDelta {
    let previous = previous.unwrap_or(current);
    MemoryDelta {
        diff: current - previous,
        current,
    }
}

/// Percent in `[0, 100]`. Previous combined total is `previous_total + previous_idle`.
pub fn cpu_utilization(current: CpuSnapshot, previous_total: i64, previous_idle: i64) -> f64 {
    let total_prev = previous_total + previous_idle;
    let total_cur = current.total_time + current.idle_time;
    let totald = total_cur as f64 - total_prev as f64;
    let idled = current.idle_time as f64 - previous_idle as f64;
    let usage = ((1000.0 * (totald - idled) / (totald + CPU_EPSILON) + 1.0) / 10.0).abs();
    if usage.is_nan() {
        return 0.0;
    }
    usage.clamp(0.0, 100.0)
}

#[derive(Debug, Default)]
pub struct DeltaEngine {
    state: DeltaState,
}

impl DeltaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DeltaState {
        self.state
    }

    pub fn memory(&mut self, used_memory: f64) -> MemoryDelta {
        let delta = memory_delta(used_memory, self.state.previous_used_memory);
        self.state.previous_used_memory = Some(used_memory);
        delta
    }

    pub fn cpu(&mut self, snapshot: CpuSnapshot) -> f64 {
        let usage = cpu_utilization(
            snapshot,
            self.state.previous_cpu_total,
            self.state.previous_cpu_idle,
        );
        self.state.previous_cpu_total = snapshot.total_time;
        self.state.previous_cpu_idle = snapshot.idle_time;
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpu(idle: i64, total: i64) -> CpuSnapshot {
        CpuSnapshot {
            idle_time: idle,
            total_time: total,
        }
    }

    #[test]
    fn first_memory_diff_is_zero() {
        let mut engine = DeltaEngine::new();
        let delta = engine.memory(8.0);
        assert_eq!(delta.diff, 0.0);
        assert_eq!(delta.trend(), Trend::Rising);
        assert_eq!(delta.glyph_run(), 0);
    }

    #[test]
    fn memory_increase_of_five_hundredths() {
        let mut engine = DeltaEngine::new();
        engine.memory(8.00);
        let delta = engine.memory(8.05);
        assert_eq!(delta.trend(), Trend::Rising);
        assert_eq!(delta.glyph_run(), 5);
        assert_eq!(delta.current, 8.05);
    }

    #[test]
    fn memory_decrease_is_falling() {
        let mut engine = DeltaEngine::new();
        engine.memory(8.5);
        let delta = engine.memory(8.2);
        assert_eq!(delta.trend(), Trend::Falling);
        assert!((delta.abs_diff() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn first_cpu_tick_uses_zero_previous() {
        let usage = cpu_utilization(cpu(100, 500), 0, 0);
        // 1000 * 500 / 600 + 1, over 10
        assert!((usage - 83.4333).abs() < 1e-3);
    }

    #[test]
    fn constant_counters_settle() {
        let mut engine = DeltaEngine::new();
        engine.cpu(cpu(100, 500));
        let second = engine.cpu(cpu(100, 500));
        let third = engine.cpu(cpu(100, 500));
        assert!((second - 0.1).abs() < 1e-9);
        assert_eq!(second, third);
    }

    #[test]
    fn all_zero_counters_stay_in_range() {
        let usage = cpu_utilization(cpu(0, 0), 0, 0);
        assert!((0.0..=100.0).contains(&usage));
    }

    #[test]
    fn utilization_is_capped_at_one_hundred() {
        // An idle counter going backwards pushes the raw value far above 100.
        let usage = cpu_utilization(cpu(0, 1_000), 0, 1_000);
        assert_eq!(usage, 100.0);
    }

    #[test]
    fn state_holds_last_raw_values() {
        let mut engine = DeltaEngine::new();
        engine.cpu(cpu(100, 500));
        engine.cpu(cpu(180, 900));
        engine.memory(7.5);
        engine.memory(7.25);
        let state = engine.state();
        assert_eq!(state.previous_cpu_idle, 180);
        assert_eq!(state.previous_cpu_total, 900);
        assert_eq!(state.previous_used_memory, Some(7.25));
    }
}
