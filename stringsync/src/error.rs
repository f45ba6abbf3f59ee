//! All error types for the stringsync crate.
//!
//! These are returned from all fallible operations (parsing, serialization, file I/O).
//! The comparison and merge engines themselves are infallible over in-memory data;
//! asymmetric key sets between catalogs are expected steady-state data, not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid resource: {0}")]
    InvalidResource(String),
}

impl Error {
    /// Creates a new invalid-resource error.
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Error::InvalidResource(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_data_mismatch_error() {
        let error = Error::DataMismatch("Invalid data format".to_string());
        assert_eq!(error.to_string(), "invalid data: Invalid data format");
    }

    #[test]
    fn test_invalid_resource_error() {
        let error = Error::invalid_resource("Missing required field");
        assert_eq!(
            error.to_string(),
            "invalid resource: Missing required field"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::DataMismatch("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("DataMismatch"));
        assert!(debug.contains("test"));
    }
}
