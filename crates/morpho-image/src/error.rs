/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the requested dimensions overflow the addressable size.
    #[error("Image size {0}x{1} overflows the addressable size")]
    ImageSizeTooLarge(usize, usize),

    /// Error when a pixel coordinate lies outside the image bounds.
    #[error("Pixel index ({0}, {1}) out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),
}
