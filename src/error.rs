use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot open input {}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("timestamp {timestamp:?} is not in YYYY-MM-DD HH:MM:SS form")]
    TimestampParse {
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("cannot write summary to {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize output")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Read(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
