/// Physical and virtual memory, in decimal gigabytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorySnapshot {
    pub total_physical: f64,
    pub used_physical: f64,
    pub total_virtual: f64,
    pub used_virtual: f64,
}

/// Raw kernel CPU counters. Only differences between two readings mean anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub idle_time: i64,
    /// Sum of the non-idle counters.
    pub total_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub user: String,
    pub line: String,
    pub host: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryReading {
    pub snapshot: MemorySnapshot,
    /// Peak resident size of this process in kilobytes.
    pub peak_resident_kb: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuReading {
    pub snapshot: CpuSnapshot,
    pub cores: usize,
}

/// A field is `None` only when its collector was not requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSample {
    pub memory: Option<MemoryReading>,
    pub cpu: Option<CpuReading>,
    pub sessions: Option<Vec<UserSession>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemBanner {
    pub system_name: Option<String>,
    pub machine_name: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub architecture: Option<String>,
    pub uptime_secs: u64,
}
