//! Error types for the knnapi crate.

/// Error type for all fallible operations in the knnapi crate.
///
/// Distance faults abort a classification call. Every other variant is a
/// dataset load fault and aborts the request before any classification runs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A computed Euclidean distance came out negative.
    #[error("negative euclidean distance {distance}, invalid data")]
    NegativeDistance {
        /// The offending distance.
        distance: f64,
    },

    /// The dataset file could not be opened or read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking pool reading the dataset file went away.
    #[error("dataset reader thread pool is gone")]
    Blocking(#[from] actix_web::error::BlockingError),

    /// The dataset is not well-formed CSV.
    #[error("malformed dataset csv: {0}")]
    Csv(#[from] csv::Error),

    /// The remote dataset could not be fetched.
    #[error("failed to fetch dataset: {0}")]
    Fetch(#[from] reqwest::Error),

    /// A coordinate field is not a number.
    #[error("line {line}: cannot parse {column} from {value:?}")]
    InvalidCoordinate {
        /// Line of the offending row in the source.
        line: u64,
        /// Column name, `x` or `y`.
        column: &'static str,
        /// Raw field contents.
        value: String,
    },

    /// A coordinate field parsed to NaN or infinity.
    #[error("line {line}: {column} must be finite, got {value}")]
    NonFiniteCoordinate {
        /// Line of the offending row in the source.
        line: u64,
        /// Column name, `x` or `y`.
        column: &'static str,
        /// Parsed value.
        value: f64,
    },

    /// A row has fewer than the six expected columns.
    #[error("line {line}: missing column {column}")]
    MissingColumn {
        /// Line of the offending row in the source.
        line: u64,
        /// Name of the first absent column.
        column: &'static str,
    },
}

impl Error {
    /// Returns true for faults raised while acquiring or parsing the dataset.
    pub fn is_dataset_fault(&self) -> bool {
        !matches!(self, Error::NegativeDistance { .. })
    }
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;
