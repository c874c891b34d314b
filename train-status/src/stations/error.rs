//! Station directory error types.

/// Errors that can occur while loading the station directory.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The file could not be read
    #[error("failed to read station file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is missing from the header row
    #[error("station file has no {column} column (header: {header})")]
    MissingColumn {
        column: &'static str,
        header: String,
    },
}
