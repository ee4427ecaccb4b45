//! Document text decoding
//!
//! Picks the character encoding of a fetched document and decodes it with
//! encoding_rs, the same decoder reqwest uses for `Response::text`.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};

use crate::error::LoadFailure;

/// How far into the document a `<meta charset>` is looked for
const META_SNIFF_LEN: usize = 1024;

/// Decode `bytes` as text.
///
/// Encoding precedence: byte-order mark, `declared` (a transport charset
/// such as the one from `Content-Type`), `<meta charset>` /
/// `<meta http-equiv content="...; charset=...">` in the first 1024 bytes.
/// Without any of those the bytes are read as UTF-8, falling back to
/// windows-1252 when they are not valid UTF-8.
///
/// Unknown charset labels are ignored.
///
/// # Errors
/// `LoadFailure::Decode` when the bytes are malformed in an encoding the
/// document declares.
pub(crate) fn decode_document(
    bytes: &[u8],
    declared: Option<&str>,
) -> std::result::Result<String, LoadFailure> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_strict(encoding, &bytes[bom_len..]);
    }

    let encoding = declared
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .or_else(|| sniff_meta_charset(bytes));

    match encoding {
        Some(encoding) => decode_strict(encoding, bytes),
        None => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => Ok(WINDOWS_1252
                .decode_without_bom_handling(bytes)
                .0
                .into_owned()),
        },
    }
}

fn decode_strict(
    encoding: &'static Encoding,
    bytes: &[u8],
) -> std::result::Result<String, LoadFailure> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(LoadFailure::Decode {
            encoding: encoding.name(),
        })
}

/// Value of the `charset` parameter in a `Content-Type` style string
pub(crate) fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
        (!value.is_empty()).then_some(value)
    })
}

/// Charset named by a `<meta>` tag near the start of the document.
///
/// A meta tag cannot truthfully declare UTF-16 (the tag itself would not be
/// readable), so such declarations mean UTF-8.
fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let mut rest = head.as_str();
    while let Some(start) = rest.find("<meta") {
        let tag = &rest[start..];
        let end = tag.find('>').unwrap_or(tag.len());
        if let Some(encoding) = meta_tag_charset(&tag[..end]) {
            if encoding == UTF_16LE || encoding == UTF_16BE {
                return Some(UTF_8);
            }
            return Some(encoding);
        }
        rest = &tag[end..];
    }
    None
}

fn meta_tag_charset(tag: &str) -> Option<&'static Encoding> {
    let at = tag.find("charset")?;
    let value = tag[at + "charset".len()..].trim_start().strip_prefix('=')?;
    let value = value.trim_start().trim_start_matches(|c: char| c == '"' || c == '\'');
    let label: String = value
        .chars()
        .take_while(|c: &char| !matches!(*c, '"' | '\'' | ';' | '/' | '>') && !c.is_whitespace())
        .collect();
    Encoding::for_label(label.as_bytes())
}
