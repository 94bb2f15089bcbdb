use super::PlatformExtensions;
use crate::error::ProviderError;
use crate::system::snapshot::{CpuSnapshot, UserSession};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_counters() -> Result<CpuSnapshot, ProviderError> {
        Err(ProviderError::Unsupported {
            what: "kernel cpu counters",
        })
    }

    fn core_count() -> Result<usize, ProviderError> {
        Err(ProviderError::Unsupported {
            what: "processor listing",
        })
    }

    fn user_sessions() -> Result<Vec<UserSession>, ProviderError> {
        Err(ProviderError::Unsupported {
            what: "utmp login table",
        })
    }

    fn peak_resident_kb() -> Result<u64, ProviderError> {
        Err(ProviderError::Unsupported {
            what: "peak resident size",
        })
    }
}
