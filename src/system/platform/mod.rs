use crate::error::ProviderError;
use crate::system::snapshot::{CpuSnapshot, UserSession};

/// Kernel-table readers that only exist on some operating systems.
pub trait PlatformExtensions {
    fn cpu_counters() -> Result<CpuSnapshot, ProviderError>;
    fn core_count() -> Result<usize, ProviderError>;
    fn user_sessions() -> Result<Vec<UserSession>, ProviderError>;
    fn peak_resident_kb() -> Result<u64, ProviderError>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod unsupported;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use unsupported as platform_impl;

pub fn cpu_counters() -> Result<CpuSnapshot, ProviderError> {
    platform_impl::Platform::cpu_counters()
}

pub fn core_count() -> Result<usize, ProviderError> {
    platform_impl::Platform::core_count()
}

pub fn user_sessions() -> Result<Vec<UserSession>, ProviderError> {
    platform_impl::Platform::user_sessions()
}

pub fn peak_resident_kb() -> Result<u64, ProviderError> {
    platform_impl::Platform::peak_resident_kb()
}
