/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error when the magic token does not announce a binary PGM file.
    #[error("Unsupported magic token: {0:?}")]
    UnsupportedMagic(String),

    /// Error when the header fields do not parse as decimal integers.
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// Error when the pixel payload is shorter than the header promises.
    #[error("Truncated pixel data: expected {expected} bytes, found {found}")]
    TruncatedData {
        /// Number of pixel bytes the header promises.
        expected: usize,
        /// Number of pixel bytes actually present.
        found: usize,
    },

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] morpho_image::ImageError),
}
