//! Textual encodings of a [`Predicate`]
//!
//! Two forms are supported:
//!
//! - plain JSON, with objects tagged by `type`:
//!   `{"type":"AND","lhs":{"type":"HAS","val":"read"},"rhs":...}`
//! - the embeddable form, which is the same JSON with every `"` swapped for
//!   `'`. A `'` inside a permission name is written as the JSON escape
//!   `\u0027`, so the swap can be undone unambiguously. The result fits inside a
//!   double-quoted markup attribute and reads as a JavaScript object literal.

use super::Predicate;
use thiserror::Error;

/// Predicate encoding error
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("invalid serialized predicate: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encode a predicate as plain JSON
pub fn to_json(predicate: &Predicate) -> CodecResult<String> {
    Ok(serde_json::to_string(predicate)?)
}

/// Decode a predicate from plain JSON
pub fn from_json(json: &str) -> CodecResult<Predicate> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a predicate in the single-quoted, embeddable form
pub fn serialize(predicate: &Predicate) -> CodecResult<String> {
    let json = to_json(predicate)?;
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '"' => out.push('\''),
            '\'' => out.push_str("\\u0027"),
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Decode a predicate from the embeddable form
///
/// Plain JSON is accepted as well, since it contains no single quotes.
pub fn deserialize(text: &str) -> CodecResult<Predicate> {
    let json: String = text.chars().map(|ch| if ch == '\'' { '"' } else { ch }).collect();
    from_json(&json)
}
