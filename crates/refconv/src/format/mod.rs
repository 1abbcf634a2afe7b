//! Contains traits and implementions of the [`Format`], [`Parse`], [`Compose`], and [`Writer`]
//! traits along with [`FormatKind`], the closed set of formats that can be read.
use std::{fmt, str::FromStr};

mod bibtex;
mod endnote;
mod flat;
mod json;
mod ris;
mod yaml;

use crate::{ast::Biblio, Error, ErrorKind};
pub use bibtex::BibTex;
pub use endnote::EndNote;
pub use json::Json;
pub use ris::Ris;
pub use yaml::Yaml;

/// A textual representation of a reference collection.
///
/// Formats are promises at the type level about what a [`String`] (or similar) represents.
pub trait Format {
    /// Construct a new type using a [`String`] input.
    ///
    /// This function should not panic or fail as creating a [`Format`] is a type promise about
    /// what the [`String`] represents.
    fn new(val: String) -> Self;

    /// The current [`Format`] in a raw [`String`].
    fn raw(self) -> String;

    /// The display name of the format.
    fn name() -> &'static str;

    /// The file extension associated with this format.
    fn ext() -> &'static str;
}

/// A [`Format`] that can be parsed into a [`Biblio`].
pub trait Parse: Format {
    /// Parses this [`Format`] into a [`Biblio`].
    ///
    /// # Errors
    ///
    /// Will return [`Err`] if the text does not have the shape this [`Format`] expects.
    fn parse(self) -> Result<Biblio, Error>;
}

/// A [`Format`] that a [`Biblio`] can be composed to.
pub trait Compose: Format + Sized {
    /// Composes a [`Biblio`] to this [`Format`].
    ///
    /// # Errors
    ///
    /// Will return [`Err`] if a record cannot be represented in this [`Format`].
    fn compose(biblio: &Biblio) -> Result<Self, Error>;
}

/// A trait for objects which are [`Format`]-oriented sinks.
///
/// Writers are defined by implementing the [`Writer::write`] method which writes a format to this
/// given writer.
///
/// Writers have a default implemention of [`Writer::write_biblio`] for [`Biblio`] using the
/// [`Writer::write`] method.
pub trait Writer {
    /// The format associated with the writer.
    type Format: Compose;

    /// Write a format into this writer.
    ///
    /// # Errors
    ///
    /// The call to write should only return an [`Err`] when writing to the writer cannot be
    /// completed.
    fn write(&mut self, format: Self::Format) -> Result<(), Error>;

    /// Write a [`Biblio`] into this writer using [`Compose::compose`] from the
    /// [`Writer::Format`] associated type.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] when composing fails or when writing to the writer cannot be completed.
    fn write_biblio(&mut self, biblio: &Biblio) -> Result<(), Error> {
        let format = Self::Format::compose(biblio)?;
        self.write(format)
    }
}

/// The formats that can be read into a [`Biblio`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// `BibTeX`, see [`BibTex`].
    BibTex,
    /// JSON, see [`Json`].
    Json,
    /// RIS, see [`Ris`].
    Ris,
    /// YAML, see [`Yaml`].
    Yaml,
}

impl FormatKind {
    /// Every readable format, in the order of their tags.
    pub const ALL: [Self; 4] = [Self::BibTex, Self::Json, Self::Ris, Self::Yaml];

    /// The tag used to select this format.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::BibTex => "bibtex",
            Self::Json => "json",
            Self::Ris => "ris",
            Self::Yaml => "yaml",
        }
    }

    /// The display name of the format.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BibTex => BibTex::name(),
            Self::Json => Json::name(),
            Self::Ris => Ris::name(),
            Self::Yaml => Yaml::name(),
        }
    }

    /// The file extension associated with the format.
    #[must_use]
    pub fn ext(self) -> &'static str {
        match self {
            Self::BibTex => BibTex::ext(),
            Self::Json => Json::ext(),
            Self::Ris => Ris::ext(),
            Self::Yaml => Yaml::ext(),
        }
    }

    /// Find the format associated with a file extension, ignoring case.
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "yml" => Some(Self::Yaml),
            ext => Self::ALL.into_iter().find(|kind| kind.ext() == ext),
        }
    }

    /// Parse `content` with the parser of this format.
    ///
    /// # Errors
    ///
    /// Will return [`Err`] if the parser rejects the content.
    pub fn parse(self, content: &str) -> Result<Biblio, Error> {
        let content = content.to_owned();
        match self {
            Self::BibTex => BibTex::new(content).parse(),
            Self::Json => Json::new(content).parse(),
            Self::Ris => Ris::new(content).parse(),
            Self::Yaml => Yaml::new(content).parse(),
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FormatKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| Error::new(ErrorKind::UnsupportedFormat, format!("'{s}'")))
    }
}

/// A [`String`] wrapper around a format which acts as an in memory [`Writer`].
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FormatString {
    inner: String,
}

impl From<FormatString> for String {
    fn from(val: FormatString) -> Self {
        val.inner
    }
}

impl Writer for FormatString {
    type Format = EndNote;

    fn write(&mut self, format: EndNote) -> Result<(), Error> {
        self.inner.push_str(&format.raw());
        Ok(())
    }
}
