// error.rs - Errors raised by grid construction, portal linking and bitmap I/O

use std::path::PathBuf;

use crate::grid::Coord;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read image {}", .path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image {}", .path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("case {case} is missing required files: {missing:?}")]
    MissingCaseFiles { case: String, missing: Vec<PathBuf> },

    #[error("coordinate {0:?} is already linked to another portal")]
    AlreadyLinked(Coord),

    #[error("coordinate {0:?} cannot be linked to itself")]
    SelfLink(Coord),
}
