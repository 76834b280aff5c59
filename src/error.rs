use std::path::PathBuf;

use thiserror::Error;

use crate::pointer::PointerId;

#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SampleError {
    #[error("non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate { x: f64, y: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum PointerError {
    /// The sample was dropped before reaching the session history.
    #[error("pointer {identifier}: rejected sample: {source}")]
    MalformedSample {
        identifier: PointerId,
        #[source]
        source: SampleError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid gesture config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid gesture config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
