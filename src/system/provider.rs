use sysinfo::System;

use super::platform;
use super::snapshot::{CpuSnapshot, MemorySnapshot, SystemBanner, UserSession};
use crate::error::ProviderError;

const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Read-once sources for every stat the sampler shows. Each method is a
/// fresh read, called from collector threads.
pub trait StatProvider: Send + Sync + 'static {
    fn memory_snapshot(&self) -> Result<MemorySnapshot, ProviderError>;
    /// Peak resident set size of this process, in kilobytes.
    fn peak_resident_kb(&self) -> Result<u64, ProviderError>;
    fn cpu_snapshot(&self) -> Result<CpuSnapshot, ProviderError>;
    fn core_count(&self) -> Result<usize, ProviderError>;
    fn user_sessions(&self) -> Result<Vec<UserSession>, ProviderError>;
    fn banner(&self) -> SystemBanner;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LiveProvider;

impl StatProvider for LiveProvider {
    fn memory_snapshot(&self) -> Result<MemorySnapshot, ProviderError> {
        let mut sys = System::new();
        sys.refresh_memory();
        Ok(memory_from_counters(
            sys.total_memory(),
            sys.free_memory(),
            sys.total_swap(),
            sys.free_swap(),
        ))
    }

    fn peak_resident_kb(&self) -> Result<u64, ProviderError> {
        platform::peak_resident_kb()
    }

    fn cpu_snapshot(&self) -> Result<CpuSnapshot, ProviderError> {
        platform::cpu_counters()
    }

    fn core_count(&self) -> Result<usize, ProviderError> {
        platform::core_count()
    }

    fn user_sessions(&self) -> Result<Vec<UserSession>, ProviderError> {
        platform::user_sessions()
    }

    fn banner(&self) -> SystemBanner {
        SystemBanner {
            system_name: System::name(),
            machine_name: System::host_name(),
            version: System::os_version(),
            release: System::kernel_version(),
            architecture: Some(std::env::consts::ARCH.to_string()),
            uptime_secs: System::uptime(),
        }
    }
}

/// Convert raw byte counters into the GB figures shown to the user.
///
/// Virtual memory is RAM plus swap; "used" is total minus free for both.
pub fn memory_from_counters(
    total_ram: u64,
    free_ram: u64,
    total_swap: u64,
    free_swap: u64,
) -> MemorySnapshot {
    let used_ram = total_ram.saturating_sub(free_ram);
    let used_swap = total_swap.saturating_sub(free_swap);
    MemorySnapshot {
        total_physical: total_ram as f64 / BYTES_PER_GB,
        used_physical: used_ram as f64 / BYTES_PER_GB,
        total_virtual: (total_ram + total_swap) as f64 / BYTES_PER_GB,
        used_virtual: (used_ram + used_swap) as f64 / BYTES_PER_GB,
    }
}
