use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    InvalidArgs(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot {action} '{}': {source}", .path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cryptographic failure")]
    Crypto,

    #[error("refusing to overwrite existing path: {}", .0.display())]
    WouldOverwrite(PathBuf),
}

impl Error {
    /// Attach the failing operation and path to an I/O error.
    pub fn file(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Error::File {
            action,
            path,
            source,
        }
    }
}
