use std::sync::atomic::{AtomicUsize, Ordering};

use super::provider::StatProvider;
use super::snapshot::{CpuSnapshot, MemorySnapshot, SystemBanner, UserSession};
use crate::error::ProviderError;

/// Replays scripted readings, one per call, repeating the last entry once
/// the script runs out. An empty script reads as a malformed source.
#[derive(Debug)]
pub struct ScriptedProvider {
    memory: Vec<MemorySnapshot>,
    cpu: Vec<CpuSnapshot>,
    sessions: Vec<UserSession>,
    cores: usize,
    peak_resident_kb: u64,
    fail_cpu_at: Option<usize>,
    memory_reads: AtomicUsize,
    cpu_reads: AtomicUsize,
}

impl ScriptedProvider {
    pub fn constant() -> Self {
        ScriptedProvider {
            memory: vec![MemorySnapshot {
                total_physical: 16.0,
                used_physical: 8.0,
                total_virtual: 20.0,
                used_virtual: 9.0,
            }],
            cpu: vec![CpuSnapshot {
                idle_time: 100,
                total_time: 500,
            }],
            sessions: vec![UserSession {
                user: "alice".to_string(),
                line: "pts/0".to_string(),
                host: "10.0.0.5".to_string(),
            }],
            cores: 8,
            peak_resident_kb: 2048,
            fail_cpu_at: None,
            memory_reads: AtomicUsize::new(0),
            cpu_reads: AtomicUsize::new(0),
        }
    }

    pub fn with_used_memory(mut self, used: &[f64]) -> Self {
        let base = self.memory.first().copied().unwrap_or(MemorySnapshot {
            total_physical: 16.0,
            used_physical: 8.0,
            total_virtual: 20.0,
            used_virtual: 9.0,
        });
        self.memory = used
            .iter()
            .map(|&used_physical| MemorySnapshot {
                used_physical,
                ..base
            })
            .collect();
        self
    }

    pub fn with_cpu(mut self, readings: &[CpuSnapshot]) -> Self {
        self.cpu = readings.to_vec();
        self
    }

    pub fn with_sessions(mut self, sessions: Vec<UserSession>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Make the `call`-th CPU read (zero based) fail.
    pub fn failing_cpu_at(mut self, call: usize) -> Self {
        self.fail_cpu_at = Some(call);
        self
    }

    pub fn memory_reads(&self) -> usize {
        self.memory_reads.load(Ordering::SeqCst)
    }

    pub fn cpu_reads(&self) -> usize {
        self.cpu_reads.load(Ordering::SeqCst)
    }
}

fn scripted<T: Clone>(script: &[T], call: usize, source: &str) -> Result<T, ProviderError> {
    script
        .get(call)
        .or(script.last())
        .cloned()
        .ok_or_else(|| ProviderError::Malformed {
            path: source.to_string(),
            detail: "empty script".to_string(),
        })
}

impl StatProvider for ScriptedProvider {
    fn memory_snapshot(&self) -> Result<MemorySnapshot, ProviderError> {
        let call = self.memory_reads.fetch_add(1, Ordering::SeqCst);
        scripted(&self.memory, call, "memory")
    }

    fn peak_resident_kb(&self) -> Result<u64, ProviderError> {
        Ok(self.peak_resident_kb)
    }

    fn cpu_snapshot(&self) -> Result<CpuSnapshot, ProviderError> {
        let call = self.cpu_reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_cpu_at == Some(call) {
            return Err(ProviderError::Malformed {
                path: "/proc/stat".to_string(),
                detail: "expected 7 cpu counters, found 3".to_string(),
            });
        }
        scripted(&self.cpu, call, "cpu")
    }

    fn core_count(&self) -> Result<usize, ProviderError> {
        Ok(self.cores)
    }

    fn user_sessions(&self) -> Result<Vec<UserSession>, ProviderError> {
        Ok(self.sessions.clone())
    }

    fn banner(&self) -> SystemBanner {
        SystemBanner {
            system_name: Some("Linux".to_string()),
            machine_name: Some("testhost".to_string()),
            version: Some("12".to_string()),
            release: Some("6.1.0".to_string()),
            architecture: Some("x86_64".to_string()),
            uptime_secs: 93_784,
        }
    }
}
