use std::io::{self, ErrorKind};
use std::mem::MaybeUninit;

use super::PlatformExtensions;
use crate::error::ProviderError;
use crate::system::procfs::{CPUINFO_PATH, STAT_PATH, count_processors, parse_cpu_counters};
use crate::system::snapshot::{CpuSnapshot, UserSession};
use crate::system::utmp::{UTMP_PATH, parse_sessions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn cpu_counters() -> Result<CpuSnapshot, ProviderError> {
        let contents = read(STAT_PATH)?;
        parse_cpu_counters(&contents)
    }

    fn core_count() -> Result<usize, ProviderError> {
        let contents = read(CPUINFO_PATH)?;
        Ok(count_processors(&contents))
    }

    fn user_sessions() -> Result<Vec<UserSession>, ProviderError> {
        match std::fs::read(UTMP_PATH) {
            Ok(table) => Ok(parse_sessions(&table)),
            // Containers and minimal images often have no login table at all.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(ProviderError::Read {
                path: UTMP_PATH.to_string(),
                source,
            }),
        }
    }

    fn peak_resident_kb() -> Result<u64, ProviderError> {
        let mut usage = MaybeUninit::<libc::rusage>::zeroed();
        // SAFETY: getrusage fills the struct it is handed and nothing else.
        let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
        if rc != 0 {
            return Err(ProviderError::Read {
                path: "getrusage(RUSAGE_SELF)".to_string(),
                source: io::Error::last_os_error(),
            });
        }
        // SAFETY: initialised by the successful call above.
        let usage = unsafe { usage.assume_init() };
        // Linux reports ru_maxrss in kilobytes.
        Ok(u64::try_from(usage.ru_maxrss).unwrap_or(0))
    }
}

fn read(path: &str) -> Result<String, ProviderError> {
    std::fs::read_to_string(path).map_err(|source| ProviderError::Read {
        path: path.to_string(),
        source,
    })
}
