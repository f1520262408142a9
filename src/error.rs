// SPDX-License-Identifier: MPL-2.0
use crate::application::port::{CodecError, ExportError, StoreError};
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Store(StoreError),
    Codec(CodecError),
    Export(ExportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Store(e) => write!(f, "Store Error: {}", e),
            Error::Codec(e) => write!(f, "Codec Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<CodecError> for Error {
    fn from(err: CodecError) -> Self {
        Error::Codec(err)
    }
}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        Error::Export(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn store_error_converts_and_keeps_message() {
        let err: Error = StoreError::WriteFailed("read-only volume".into()).into();
        assert!(matches!(err, Error::Store(StoreError::WriteFailed(_))));
        assert!(format!("{}", err).contains("read-only volume"));
    }

    #[test]
    fn codec_error_converts() {
        let err: Error = CodecError::EncodeFailed("no pixels".into()).into();
        assert!(format!("{}", err).starts_with("Codec Error"));
    }
}
