use std::fmt;

/// Which collector a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Memory,
    Cpu,
    Sessions,
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatKind::Memory => "memory",
            StatKind::Cpu => "cpu",
            StatKind::Sessions => "sessions",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed data in {path}: {detail}")]
    Malformed { path: String, detail: String },

    #[error("{what} is not available on this platform")]
    Unsupported { what: &'static str },
}

/// Fatal errors of a sampling run.
#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error("{kind} collector failed: {source}")]
    Provider {
        kind: StatKind,
        #[source]
        source: ProviderError,
    },

    /// The collector went away without sending its result.
    #[error("{kind} collector exited without delivering a result")]
    Transport { kind: StatKind },

    #[error("history buffer is full ({capacity} rows)")]
    HistoryFull { capacity: usize },

    #[error("error reading input: {0}")]
    SignalInput(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Raised when the command line (or config file) cannot be turned into run settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("incorrect argument: {0}")]
pub struct ConfigError(pub String);
