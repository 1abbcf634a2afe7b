use log::trace;

use super::{Format, Parse};
use crate::{
    ast::{Biblio, Record},
    Error,
};

/// The tag that starts a new reference.
const TYPE_TAG: &str = "TY";
/// Separates the tag from the value on each line.
const SEPARATOR: &str = " - ";

/// A type wrapper around [`String`] to represent a RIS format string.
#[derive(Debug)]
pub struct Ris(String);

impl Format for Ris {
    fn new(val: String) -> Self {
        Self(val)
    }

    fn raw(self) -> String {
        self.0
    }

    fn name() -> &'static str {
        "RIS"
    }

    fn ext() -> &'static str {
        "ris"
    }
}

impl Parse for Ris {
    fn parse(self) -> Result<Biblio, Error> {
        let mut biblio = Biblio::default();
        let mut record = Record::new();

        for line in self.0.lines() {
            if line.starts_with(TYPE_TAG) && !record.is_empty() {
                biblio.push(std::mem::take(&mut record));
            }

            if let Some((tag, value)) = line.split_once(SEPARATOR) {
                record.insert(tag.trim(), value.trim());
            }
        }

        if !record.is_empty() {
            biblio.push(record);
        }

        trace!("Parsed {} RIS references", biblio.len());
        Ok(biblio)
    }
}
