use crate::error::KhqrError;

/// Largest value a 2-digit TLV length prefix can describe.
pub const MAX_VALUE_BYTES: usize = 99;

/// Encode a single tag-length-value field.
///
/// The length is the UTF-8 byte length of `value`, not its character count,
/// left-padded to exactly 2 digits. Values longer than 99 bytes cannot be
/// represented and fail instead of being truncated.
pub fn encode_field(tag: &'static str, value: &str) -> Result<String, KhqrError> {
    debug_assert!(
        tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_digit()),
        "TLV tags are exactly 2 ASCII digits"
    );
    let length = value.len();
    if length > MAX_VALUE_BYTES {
        return Err(KhqrError::FieldTooLong {
            tag,
            length,
            max: MAX_VALUE_BYTES,
        });
    }
    Ok(format!("{tag}{length:02}{value}"))
}

/// A single field recovered from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub tag: String,
    pub value: String,
}

/// Split a payload (or a composite field value) into its fields, one
/// tag/length/value at a time.
///
/// Every length prefix must describe exactly the bytes that follow it; a
/// field that overruns the input or a non-digit tag/length is reported as
/// `InvalidPayload`.
pub fn parse_fields(payload: &str) -> Result<Vec<Field>, KhqrError> {
    let bytes = payload.as_bytes();
    let mut fields = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if pos + 4 > bytes.len() {
            return Err(KhqrError::InvalidPayload(format!(
                "truncated tag/length prefix at offset {pos}"
            )));
        }
        let header = &bytes[pos..pos + 4];
        if !header.iter().all(|b| b.is_ascii_digit()) {
            return Err(KhqrError::InvalidPayload(format!(
                "non-numeric tag/length prefix at offset {pos}"
            )));
        }
        let tag = &payload[pos..pos + 2];
        let length = (header[2] - b'0') as usize * 10 + (header[3] - b'0') as usize;
        let start = pos + 4;
        let end = start + length;
        if end > bytes.len() {
            return Err(KhqrError::InvalidPayload(format!(
                "field {tag} declares {length} bytes but the payload ends early"
            )));
        }
        if !payload.is_char_boundary(end) {
            return Err(KhqrError::InvalidPayload(format!(
                "field {tag} length splits a multi-byte character"
            )));
        }
        fields.push(Field {
            tag: tag.to_owned(),
            value: payload[start..end].to_owned(),
        });
        pos = end;
    }
    Ok(fields)
}
