use log::trace;
use serde_json::value::RawValue;

use super::{
    flat::{into_biblio, shape_message, FlatDocument},
    Format, Parse,
};
use crate::{ast::Biblio, Error, ErrorKind};

/// A type wrapper around [`String`] to represent a JSON format string.
///
/// The document must be an array of objects, each object one record.
#[derive(Debug)]
pub struct Json(String);

impl Format for Json {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "JSON"
    }

    fn ext() -> &'static str {
        "json"
    }
}

impl Parse for Json {
    fn parse(self) -> Result<Biblio, Error> {
        let document: FlatDocument<Box<RawValue>> = serde_json::from_str(&self.0).map_err(|e| {
            Error::with_source(ErrorKind::MalformedInput, shape_message(Self::name()), e)
        })?;
        trace!("Decoded {} JSON objects", document.len());
        into_biblio(Self::name(), document, |raw| raw_text(&raw))
    }
}

/// Strings are unescaped, numbers and booleans keep their source text, anything else is refused.
fn raw_text(raw: &RawValue) -> Option<String> {
    let raw = raw.get().trim();
    match raw.chars().next()? {
        '"' => serde_json::from_str(raw).ok(),
        '{' | '[' | 'n' => None,
        _ => Some(raw.to_owned()),
    }
}
