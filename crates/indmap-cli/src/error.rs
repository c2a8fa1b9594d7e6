use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Mapper(#[from] indmap::MapperError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub(crate) const fn exit_code(&self) -> u8 {
        match self {
            Self::Mapper(e) if e.is_validation_error() => 2,
            Self::Mapper(e) if e.is_load_error() => 3,
            Self::Mapper(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
