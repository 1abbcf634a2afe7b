#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # refconv
//!
//! refconv reads reference collections from plain text interchange formats
//! ([`format::BibTex`], [`format::Ris`], [`format::Yaml`] and [`format::Json`]) into an in memory
//! [`Biblio`] and composes that [`Biblio`] into an [`format::EndNote`] XML document.
//!
//! Every call is independent: nothing is cached or shared between conversions and the only
//! output is the returned value.

pub mod ast;
mod error;
pub mod format;

use ast::Biblio;
pub use error::{Error, ErrorKind};
use format::{FormatKind, FormatString, Writer};

use log::trace;

/// Read a [`Biblio`] from `content` using the parser selected by `format_tag`.
///
/// The tag is matched case insensitively against `bibtex`, `json`, `ris` and `yaml`.
///
/// # Errors
///
/// An [`Err`] with [`ErrorKind::UnsupportedFormat`] is returned when the tag is not recognised.
/// An [`Err`] with [`ErrorKind::MalformedInput`] is returned when the content does not have the
/// shape the format expects.
pub fn read_references(content: &str, format_tag: &str) -> Result<Biblio, Error> {
    let kind: FormatKind = format_tag.parse()?;
    trace!("Reading references as {}", kind.name());
    kind.parse(content)
}

/// Compose a [`Biblio`] into an `EndNote` XML document.
///
/// # Errors
///
/// An [`Err`] with [`ErrorKind::MalformedField`] is returned when a field name cannot be used as
/// an XML element name or a value holds characters XML cannot represent.
pub fn convert_to_endnote_format(biblio: &Biblio) -> Result<String, Error> {
    trace!("Composing {} records to EndNote XML", biblio.len());
    let mut xml = FormatString::default();
    xml.write_biblio(biblio)?;
    Ok(xml.into())
}

/// Read `content` with the parser selected by `format_tag` and compose the result into an
/// `EndNote` XML document.
///
/// # Errors
///
/// See [`read_references`] and [`convert_to_endnote_format`].
pub fn convert(content: &str, format_tag: &str) -> Result<String, Error> {
    let biblio = read_references(content, format_tag)?;
    convert_to_endnote_format(&biblio)
}
