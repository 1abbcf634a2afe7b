use log::trace;

use super::{
    flat::{into_biblio, shape_message, FlatDocument},
    Format, Parse,
};
use crate::{ast::Biblio, Error, ErrorKind};

/// A type wrapper around [`String`] to represent a YAML format string.
///
/// The document must be a sequence of mappings, each mapping one record.
#[derive(Debug)]
pub struct Yaml(String);

impl Format for Yaml {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "YAML"
    }

    fn ext() -> &'static str {
        "yaml"
    }
}

impl Parse for Yaml {
    fn parse(self) -> Result<Biblio, Error> {
        if self.0.trim().is_empty() {
            trace!("Empty YAML document");
            return Ok(Biblio::default());
        }

        // scalars are read as strings so numbers keep the text they were written with
        let document: FlatDocument<String> = serde_yaml::from_str(&self.0).map_err(|e| {
            Error::with_source(ErrorKind::MalformedInput, shape_message(Self::name()), e)
        })?;
        trace!("Decoded {} YAML mappings", document.len());
        into_biblio(Self::name(), document, Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Biblio, Error> {
        Yaml::new(s.to_owned()).parse()
    }

    #[test]
    fn sample_file_has_every_entry() {
        let biblio = parse(include_str!("../../../../tests/data/sample.yaml")).unwrap();

        assert_eq!(2, biblio.len());
        let first = biblio.records().next().unwrap();
        assert_eq!(Some("Smith, J."), first.get("author"));
        assert_eq!(Some("2020"), first.get("year"));
    }

    #[test]
    fn sequence_of_mappings_keeps_field_order() {
        let biblio = parse("- Title: X\n  author: A\n- title: Y\n").unwrap();
        let records = biblio.into_records();

        assert_eq!(
            vec![("title", "X"), ("author", "A")],
            records[0].fields().collect::<Vec<_>>()
        );
        assert_eq!(Some("Y"), records[1].get("title"));
    }

    #[test]
    fn scalars_keep_their_source_text() {
        let biblio =
            parse("- edition: 2.0\n  volume: 1.10\n  id: 18446744073709551615\n  peer: true\n")
                .unwrap();
        let record = biblio.records().next().unwrap();

        assert_eq!(
            vec![
                ("edition", "2.0"),
                ("volume", "1.10"),
                ("id", "18446744073709551615"),
                ("peer", "true"),
            ],
            record.fields().collect::<Vec<_>>()
        );
    }

    #[test]
    fn mapping_root_is_malformed() {
        let err = parse("title: X\n").unwrap_err();

        assert_eq!(ErrorKind::MalformedInput, err.kind());
        assert!(err.to_string().contains("YAML"));
    }

    #[test]
    fn empty_document_is_empty_biblio() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n").unwrap().is_empty());
    }

    #[test]
    fn nested_values_are_malformed() {
        for input in [
            "- author:\n    - A\n    - B\n",
            "- author:\n    family: A\n",
            "- just text\n",
        ] {
            assert_eq!(ErrorKind::MalformedInput, parse(input).unwrap_err().kind());
        }
    }
}
