//! Error type shared by the library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The word list held no usable five-letter words.
    #[error("dictionary contains no valid five-letter words")]
    EmptyDictionary,

    /// Every candidate has been eliminated. The feedback entered so far is
    /// contradictory, or the answer is not in the dictionary.
    #[error("no candidates remain; reset the session to start over")]
    NoCandidatesRemain,

    /// A guess or feedback string was rejected before reaching the constraints.
    #[error("malformed round input: {0}")]
    MalformedRoundInput(String),

    #[error("failed to read word list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
