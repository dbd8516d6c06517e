use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A row's length differs from the first row's.
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// `rows * cols` does not fit in `usize`.
    TooLarge { rows: usize, cols: usize },
    /// The worker pool could not be started.
    PoolBuild(rayon::ThreadPoolBuildError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} columns, expected {}",
                row, found, expected
            ),
            Error::TooLarge { rows, cols } => {
                write!(f, "matrix of {}x{} elements is too large", rows, cols)
            }
            Error::PoolBuild(e) => write!(f, "failed to build worker pool: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PoolBuild(e) => Some(e),
            Error::RaggedRows { .. } | Error::TooLarge { .. } => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        Error::PoolBuild(e)
    }
}
