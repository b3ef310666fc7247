use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

const ACCEPTED_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("File is too large: {0} bytes")]
    TooLarge(usize),
    #[error("File is in an incorrect format: {0}")]
    UnsupportedType(String),
}

/// Encode an image payload as a `data:` URI.
///
/// The source is rejected before any encoding work happens when its
/// MIME type is not PNG/JPEG or it exceeds [`MAX_AVATAR_BYTES`].
pub fn encode_data_uri(
    mime: &str,
    bytes: &[u8],
) -> std::result::Result<String, AvatarError> {
    if !ACCEPTED_TYPES.contains(&mime) {
        return Err(AvatarError::UnsupportedType(mime.to_owned()));
    }
    if bytes.len() > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge(bytes.len()));
    }
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_is_encoded() {
        let uri = encode_data_uri("image/png", &[0x89, 0x50, 0x4e, 0x47])
            .unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn unsupported_type_is_rejected() {
        assert_eq!(
            encode_data_uri("image/gif", &[0, 1]),
            Err(AvatarError::UnsupportedType("image/gif".to_owned()))
        );
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let bytes = vec![0u8; MAX_AVATAR_BYTES + 1];
        assert_eq!(
            encode_data_uri("image/jpeg", &bytes),
            Err(AvatarError::TooLarge(MAX_AVATAR_BYTES + 1))
        );
    }
}
