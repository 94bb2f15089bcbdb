use std::sync::Arc;

use futures::future::OptionFuture;
use tokio::sync::oneshot;
use tracing::debug;

use super::provider::StatProvider;
use super::snapshot::{AggregatedSample, CpuReading, MemoryReading, UserSession};
use crate::error::{ProviderError, StatError, StatKind};

/// One read on its own blocking thread, reported once through its own channel.
pub struct Collector<T> {
    kind: StatKind,
    rx: oneshot::Receiver<Result<T, ProviderError>>,
}

impl<T: Send + 'static> Collector<T> {
    pub fn spawn<F>(kind: StatKind, job: F) -> Self
    where
        F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        debug!(%kind, "spawning collector");
        tokio::task::spawn_blocking(move || {
            let result = job();
            if tx.send(result).is_err() {
                debug!(%kind, "collector result dropped, receiver gone");
            }
        });
        Collector { kind, rx }
    }

    /// Wait for the result. A sender dropped without sending (the job
    /// panicked) is a transport failure.
    pub async fn join(self) -> Result<T, StatError> {
        let kind = self.kind;
        match self.rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(StatError::Provider { kind, source }),
            Err(_) => Err(StatError::Transport { kind }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatSelection {
    pub system: bool,
    pub user: bool,
}

pub fn spawn_memory<P: StatProvider>(provider: &Arc<P>) -> Collector<MemoryReading> {
    let provider = Arc::clone(provider);
    Collector::spawn(StatKind::Memory, move || {
        Ok(MemoryReading {
            snapshot: provider.memory_snapshot()?,
            peak_resident_kb: provider.peak_resident_kb()?,
        })
    })
}

pub fn spawn_cpu<P: StatProvider>(provider: &Arc<P>) -> Collector<CpuReading> {
    let provider = Arc::clone(provider);
    Collector::spawn(StatKind::Cpu, move || {
        Ok(CpuReading {
            snapshot: provider.cpu_snapshot()?,
            cores: provider.core_count()?,
        })
    })
}

pub fn spawn_sessions<P: StatProvider>(provider: &Arc<P>) -> Collector<Vec<UserSession>> {
    let provider = Arc::clone(provider);
    Collector::spawn(StatKind::Sessions, move || provider.user_sessions())
}

/// Failures are reported in memory, cpu, sessions order.
pub async fn collect_sample<P: StatProvider>(
    provider: &Arc<P>,
    selection: StatSelection,
) -> Result<AggregatedSample, StatError> {
    let memory = selection.system.then(|| spawn_memory(provider));
    let cpu = selection.system.then(|| spawn_cpu(provider));
    let sessions = selection.user.then(|| spawn_sessions(provider));

    let (memory, cpu, sessions) = tokio::join!(
        OptionFuture::from(memory.map(Collector::join)),
        OptionFuture::from(cpu.map(Collector::join)),
        OptionFuture::from(sessions.map(Collector::join))
    );

    Ok(AggregatedSample {
        memory: memory.transpose()?,
        cpu: cpu.transpose()?,
        sessions: sessions.transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::mock::ScriptedProvider;

    #[tokio::test]
    async fn join_delivers_job_result() {
        let collector = Collector::spawn(StatKind::Cpu, || Ok(42_u32));
        assert_eq!(collector.join().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn provider_error_is_tagged_with_kind() {
        let collector: Collector<u32> = Collector::spawn(StatKind::Memory, || {
            Err(ProviderError::Unsupported { what: "test" })
        });
        let err = collector.join().await.unwrap_err();
        assert!(matches!(
            err,
            StatError::Provider {
                kind: StatKind::Memory,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn panicking_job_is_a_transport_error() {
        let collector: Collector<u32> =
            Collector::spawn(StatKind::Sessions, || panic!("collector blew up"));
        let err = collector.join().await.unwrap_err();
        assert!(matches!(
            err,
            StatError::Transport {
                kind: StatKind::Sessions
            }
        ));
    }

    #[tokio::test]
    async fn only_selected_collectors_run() {
        let provider = Arc::new(ScriptedProvider::constant());
        let sample = collect_sample(
            &provider,
            StatSelection {
                system: false,
                user: true,
            },
        )
        .await
        .unwrap();
        assert!(sample.memory.is_none());
        assert!(sample.cpu.is_none());
        assert_eq!(sample.sessions.unwrap().len(), 1);
        assert_eq!(provider.memory_reads(), 0);
        assert_eq!(provider.cpu_reads(), 0);
    }

    #[tokio::test]
    async fn system_selection_reads_memory_and_cpu() {
        let provider = Arc::new(ScriptedProvider::constant());
        let sample = collect_sample(
            &provider,
            StatSelection {
                system: true,
                user: false,
            },
        )
        .await
        .unwrap();
        let memory = sample.memory.unwrap();
        assert_eq!(memory.snapshot.used_physical, 8.0);
        assert_eq!(sample.cpu.unwrap().snapshot.total_time, 500);
        assert!(sample.sessions.is_none());
    }

    #[tokio::test]
    async fn any_failure_fails_the_whole_sample() {
        let provider = Arc::new(ScriptedProvider::constant().failing_cpu_at(0));
        let err = collect_sample(
            &provider,
            StatSelection {
                system: true,
                user: true,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            StatError::Provider {
                kind: StatKind::Cpu,
                ..
            }
        ));
    }
}
