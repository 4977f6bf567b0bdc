//! Image encoding for transport.

use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use image::ImageFormat;
use tracing::{debug, warn};

use crate::error::Result;

/// An image file encoded as standard base64.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    /// Padded standard base64 of the file contents.
    pub data: String,
    /// Size of the original file in bytes.
    pub byte_len: usize,
    /// Format sniffed from the magic bytes, if recognized.
    pub format: Option<ImageFormat>,
}

impl EncodedImage {
    /// Encode raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: general_purpose::STANDARD.encode(bytes),
            byte_len: bytes.len(),
            format: image::guess_format(bytes).ok(),
        }
    }
}

/// Read an image file fully and encode it.
///
/// The whole file is loaded into memory; no size limit is applied.
pub fn encode_image(path: &Path) -> Result<EncodedImage> {
    let bytes = fs::read(path)?;
    let encoded = EncodedImage::from_bytes(&bytes);

    match encoded.format {
        Some(format) => debug!(
            "Encoded {} ({:?}, {} bytes)",
            path.display(),
            format,
            encoded.byte_len
        ),
        None => warn!(
            "Unrecognized image format for {}, sending it anyway",
            path.display()
        ),
    }

    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvexError;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_from_bytes_base64() {
        let encoded = EncodedImage::from_bytes(b"hello");
        assert_eq!(encoded.data, "aGVsbG8=");
        assert_eq!(encoded.byte_len, 5);
        assert_eq!(encoded.format, None);
    }

    #[test]
    fn test_encode_image_sniffs_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice.png");
        fs::write(&path, PNG_MAGIC).unwrap();

        let encoded = encode_image(&path).unwrap();
        assert_eq!(encoded.format, Some(ImageFormat::Png));
        assert_eq!(
            general_purpose::STANDARD.decode(&encoded.data).unwrap(),
            PNG_MAGIC
        );
    }

    #[test]
    fn test_encode_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, InvexError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
