use log::trace;

use super::{Format, Parse};
use crate::{
    ast::{Biblio, Record},
    Error,
};

/// A type wrapper around [`String`] to represent a `BibTex` format string.
///
/// Parsing is line oriented: every `@` starts an entry and every `name = value` line (or comma
/// separated field on the same line) inside it becomes a field. Values spanning several lines are
/// not supported and only the outermost braces of a value are removed.
#[derive(Debug)]
pub struct BibTex(String);

impl Format for BibTex {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "BibTex"
    }

    fn ext() -> &'static str {
        "bib"
    }
}

impl Parse for BibTex {
    fn parse(self) -> Result<Biblio, Error> {
        let mut chunks = self.0.split('@');
        if let Some(preamble) = chunks.next().filter(|p| !p.trim().is_empty()) {
            trace!("Skipping {} bytes before the first entry", preamble.len());
        }

        Ok(chunks.map(parse_entry).collect())
    }
}

fn parse_entry(chunk: &str) -> Record {
    split_fields(entry_body(chunk))
        .into_iter()
        .filter_map(|field| field.split_once('='))
        .map(|(name, value)| (name.trim(), clean_value(value)))
        .collect()
}

// The `type{key` head never holds a field unless it already contains a `=`.
fn entry_body(chunk: &str) -> &str {
    match chunk.find('{') {
        Some(i) if !chunk[..i].contains('=') => &chunk[i + 1..],
        _ => chunk,
    }
}

/// Split an entry body into field candidates on line breaks and on commas that are neither inside
/// braces nor inside double quotes. Every line starts at brace depth zero.
fn split_fields(body: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut depth = 0_usize;
    let mut quoted = false;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match c {
            '\n' | '\r' => {
                fields.push(&body[start..i]);
                start = i + 1;
                depth = 0;
                quoted = false;
            }
            ',' if depth == 0 && !quoted => {
                fields.push(&body[start..i]);
                start = i + 1;
            }
            '"' if depth == 0 => quoted = !quoted,
            '{' if !quoted => depth += 1,
            '}' if !quoted => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    fields.push(&body[start..]);
    fields
}

fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_end_matches(',')
        .trim_matches(|c| c == '{' || c == '}')
        .trim_matches(',')
        .to_owned()
}
