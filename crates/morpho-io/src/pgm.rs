use std::path::Path;

use morpho_image::{GrayImage, ImageError, ImageSize};

use crate::error::IoError;

/// The magic token that opens a binary PGM file.
const PGM_MAGIC: &[u8; 2] = b"P5";

/// Parsed PGM header fields.
///
/// `max_val` is carried through from the file; pixel values are used as-is
/// and never rescaled against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PgmHeader {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Declared maximum gray value, parsed but not applied.
    pub max_val: usize,
}

struct HeaderCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl HeaderCursor<'_> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.buf.len() && self.buf[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn parse_decimal(&mut self, field: &str) -> Result<usize, IoError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut value: usize = 0;
        while let Some(&b) = self.buf.get(self.pos) {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as usize))
                .ok_or_else(|| IoError::MalformedHeader(format!("{field} overflows")))?;
            self.pos += 1;
        }
        if self.pos == start {
            return Err(IoError::MalformedHeader(format!(
                "expected a decimal {field}"
            )));
        }
        Ok(value)
    }
}

// Parses the header and returns it together with the pixel data offset.
fn parse_header(bytes: &[u8]) -> Result<(PgmHeader, usize), IoError> {
    if bytes.len() < PGM_MAGIC.len() || &bytes[..PGM_MAGIC.len()] != PGM_MAGIC {
        let found = &bytes[..bytes.len().min(PGM_MAGIC.len())];
        return Err(IoError::UnsupportedMagic(
            String::from_utf8_lossy(found).into_owned(),
        ));
    }

    let mut cursor = HeaderCursor {
        buf: bytes,
        pos: PGM_MAGIC.len(),
    };
    let width = cursor.parse_decimal("width")?;
    let height = cursor.parse_decimal("height")?;
    let max_val = cursor.parse_decimal("max value")?;

    // the format reserves exactly one separator byte between the header and
    // the pixel payload; it is consumed whatever its value
    let data_start = (cursor.pos + 1).min(bytes.len());

    Ok((
        PgmHeader {
            width,
            height,
            max_val,
        },
        data_start,
    ))
}

/// Parse the header of a binary PGM buffer.
///
/// # Errors
///
/// Fails with [`IoError::UnsupportedMagic`] if the buffer does not open with
/// the `P5` token, or [`IoError::MalformedHeader`] if width, height, or max
/// value do not parse as whitespace-separated decimal integers.
pub fn decode_pgm_header(bytes: &[u8]) -> Result<PgmHeader, IoError> {
    let (header, _) = parse_header(bytes)?;
    Ok(header)
}

/// Decode a binary PGM image from a byte slice.
///
/// The magic token is validated before any pixel buffer is allocated. The
/// pixel payload must hold at least `width * height` bytes; a shorter
/// payload fails with [`IoError::TruncatedData`]. Bytes beyond the payload
/// are ignored.
pub fn decode_pgm(bytes: &[u8]) -> Result<GrayImage, IoError> {
    let (header, data_start) = parse_header(bytes)?;

    let expected = header
        .width
        .checked_mul(header.height)
        .ok_or(ImageError::ImageSizeTooLarge(header.width, header.height))?;

    let data = &bytes[data_start..];
    if data.len() < expected {
        return Err(IoError::TruncatedData {
            expected,
            found: data.len(),
        });
    }

    let image = GrayImage::new(
        ImageSize {
            width: header.width,
            height: header.height,
        },
        data[..expected].to_vec(),
    )?;

    Ok(image)
}

/// Reads a PGM image from the given file path.
///
/// # Arguments
///
/// * `file_path` - The path to the PGM image.
///
/// # Returns
///
/// A grayscale image with a single channel.
pub fn read_image_pgm(file_path: impl AsRef<Path>) -> Result<GrayImage, IoError> {
    let file_path = file_path.as_ref();
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    decode_pgm(&mmap)
}

/// Encode a grayscale image as a binary PGM buffer.
///
/// The header always declares a maximum gray value of 255, regardless of the
/// actual pixel range.
///
/// # Example
///
/// ```
/// use morpho_image::{GrayImage, ImageSize};
/// use morpho_io::pgm::encode_pgm;
///
/// let image = GrayImage::new(ImageSize { width: 2, height: 1 }, vec![7, 9]).unwrap();
/// assert_eq!(encode_pgm(&image), b"P5\n2 1\n255\n\x07\x09");
/// ```
pub fn encode_pgm(image: &GrayImage) -> Vec<u8> {
    let header = format!("P5\n{} {}\n255\n", image.width(), image.height());
    let mut buf = Vec::with_capacity(header.len() + image.as_slice().len());
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(image.as_slice());
    buf
}

/// Writes the given image to the given file path as binary PGM.
///
/// # Arguments
///
/// * `file_path` - The path to the PGM image.
/// * `image` - The grayscale image to write.
pub fn write_image_pgm(file_path: impl AsRef<Path>, image: &GrayImage) -> Result<(), IoError> {
    std::fs::write(file_path, encode_pgm(image))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_gray(data: &[u8], width: usize, height: usize) -> GrayImage {
        GrayImage::new(ImageSize { width, height }, data.to_vec()).unwrap()
    }

    #[test]
    fn encode_exact_bytes() {
        let image = raw_gray(&[10, 20, 30, 40], 2, 2);
        let bytes = encode_pgm(&image);
        assert_eq!(&bytes[..11], b"P5\n2 2\n255\n");
        assert_eq!(&bytes[11..], &[10, 20, 30, 40]);
    }

    #[test]
    fn decode_round_trip() -> Result<(), IoError> {
        let image = raw_gray(&[10, 20, 30, 40, 50, 60], 3, 2);
        let decoded = decode_pgm(&encode_pgm(&image))?;
        assert_eq!(decoded, image);
        Ok(())
    }

    #[test]
    fn encode_header_always_255() -> Result<(), IoError> {
        let image = raw_gray(&[1, 2, 3, 4], 2, 2);
        let header = decode_pgm_header(&encode_pgm(&image))?;
        assert_eq!(
            header,
            PgmHeader {
                width: 2,
                height: 2,
                max_val: 255
            }
        );
        Ok(())
    }

    #[test]
    fn read_write_round_trip() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("image.pgm");

        let image = raw_gray(&[0, 128, 255, 64], 2, 2);
        write_image_pgm(&file_path, &image)?;
        let image_back = read_image_pgm(&file_path)?;
        assert_eq!(image_back, image);

        Ok(())
    }

    #[test]
    fn read_nonexistent() {
        let result = read_image_pgm("no/such/file.pgm");
        assert!(matches!(result, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn decode_bad_magic() {
        let result = decode_pgm(b"P6\n1 1\n255\n\x00");
        assert!(matches!(result, Err(IoError::UnsupportedMagic(m)) if m == "P6"));
    }

    #[test]
    fn decode_bad_magic_before_dimensions() {
        // the magic check fires before the (absurd) dimensions are parsed
        let result = decode_pgm(b"XX\n99999999999 99999999999\n255\n");
        assert!(matches!(result, Err(IoError::UnsupportedMagic(_))));
    }

    #[test]
    fn decode_malformed_header() {
        let result = decode_pgm(b"P5\nabc\n");
        assert!(matches!(result, Err(IoError::MalformedHeader(_))));
    }

    #[test]
    fn decode_truncated_data() {
        let result = decode_pgm(b"P5\n2 2\n255\n\x01\x02");
        assert!(matches!(
            result,
            Err(IoError::TruncatedData {
                expected: 4,
                found: 2
            })
        ));
    }

    #[test]
    fn decode_single_separator_byte() -> Result<(), IoError> {
        // a pixel payload made of spaces must survive: only one byte after
        // the max value is consumed, not the whole whitespace run
        let decoded = decode_pgm(b"P5\n2 2\n255\n    ")?;
        assert_eq!(decoded.as_slice(), &[32, 32, 32, 32]);
        Ok(())
    }

    #[test]
    fn decode_header_whitespace_runs() -> Result<(), IoError> {
        let decoded = decode_pgm(b"P5\n  2\t2\r\n255\n\x01\x02\x03\x04")?;
        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.as_slice(), &[1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn decode_max_val_not_applied() -> Result<(), IoError> {
        let bytes = b"P5\n1 1\n17\n\xc8";
        let decoded = decode_pgm(bytes)?;
        assert_eq!(decoded.as_slice(), &[200]);

        let header = decode_pgm_header(bytes)?;
        assert_eq!(header.max_val, 17);
        Ok(())
    }

    #[test]
    fn decode_zero_area() -> Result<(), IoError> {
        let decoded = decode_pgm(b"P5\n0 0\n255\n")?;
        assert_eq!(decoded.width(), 0);
        assert_eq!(decoded.height(), 0);
        assert!(decoded.as_slice().is_empty());
        Ok(())
    }

    #[test]
    fn decode_ignores_trailing_bytes() -> Result<(), IoError> {
        let decoded = decode_pgm(b"P5\n1 1\n255\n\x05extra")?;
        assert_eq!(decoded.as_slice(), &[5]);
        Ok(())
    }
}
