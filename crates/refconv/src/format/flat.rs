//! Shape shared by the structured formats: a sequence of flat mappings with scalar values.
use indexmap::IndexMap;

use crate::{
    ast::{Biblio, Record},
    Error, ErrorKind,
};

/// A document decoded with the expected shape but not yet normalized into [`Record`]s.
///
/// `V` keeps each value as written in the source so numbers are never reformatted.
pub(super) type FlatDocument<V> = Vec<IndexMap<String, V>>;

/// Normalize a decoded document into a [`Biblio`], turning each value into text with `text`.
///
/// A value `text` rejects is reported with the field name and record index.
pub(super) fn into_biblio<V, F>(
    format: &str,
    document: FlatDocument<V>,
    text: F,
) -> Result<Biblio, Error>
where
    F: Fn(V) -> Option<String>,
{
    document
        .into_iter()
        .enumerate()
        .map(|(index, fields)| {
            fields
                .into_iter()
                .map(|(name, value)| match text(value) {
                    Some(value) => Ok((name, value)),
                    None => Err(Error::new(
                        ErrorKind::MalformedInput,
                        format!("{format} field '{name}' in record {index} is not a text value"),
                    )),
                })
                .collect::<Result<Record, Error>>()
        })
        .collect()
}

/// The message used when a structured document does not have the expected shape.
pub(super) fn shape_message(format: &str) -> String {
    format!("{format} document must be a sequence of mappings with text values")
}
