//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from
//! third-party error types to the unified Error type.

use super::types::Error;

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Error::Io(e),
            _ => Error::Csv(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_io_error_maps_to_io() {
        let err: Error = csv::Error::from(std::io::Error::other("disk full")).into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_csv_record_error_maps_to_csv() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["a", "b"]).unwrap();
        let csv_err = writer.write_record(["c"]).unwrap_err();
        let err: Error = csv_err.into();
        assert!(matches!(err, Error::Csv(_)));
        assert!(err.to_string().starts_with("CSV error: "));
    }
}
