// src/decoder/sentence.rs
use crate::errors::DecodeError;

/// Index of the armored payload among the comma-separated sentence fields
const PAYLOAD_FIELD: usize = 5;
const MIN_FIELDS: usize = PAYLOAD_FIELD + 1;

/// Six-bit armored payload borrowed from a raw sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload<'a>(&'a str);

impl<'a> Payload<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extract the armored payload from an AIVDM/AIVDO sentence.
///
/// Only the structure is checked: leading `!`, at least six fields before
/// any `*checksum` suffix and a non-empty payload field. The checksum itself
/// is not verified.
pub fn parse_sentence(line: &str) -> Result<Payload<'_>, DecodeError> {
    let line = line.trim();
    if !line.starts_with('!') {
        return Err(DecodeError::MalformedSentence(
            "sentence does not start with '!'".to_string(),
        ));
    }

    let body = match line.split_once('*') {
        Some((body, _checksum)) => body,
        None => line,
    };

    let fields: Vec<&str> = body.split(',').collect();
    if fields.len() < MIN_FIELDS {
        return Err(DecodeError::MalformedSentence(format!(
            "expected at least {} fields, found {}",
            MIN_FIELDS,
            fields.len()
        )));
    }

    match fields[PAYLOAD_FIELD] {
        "" => Err(DecodeError::MalformedSentence(
            "payload field is empty".to_string(),
        )),
        payload => Ok(Payload(payload)),
    }
}
