pub(crate) type DynError = Box<dyn std::error::Error + Send + Sync>;

/// The Errors that may occur when calling the refconv functions.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    source: Option<DynError>,
}

/// Types of errors that make up an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The format tag is not one of the recognised formats.
    UnsupportedFormat,
    /// The input text does not have the shape the selected format expects.
    MalformedInput,
    /// A field name cannot be used as an XML element name or its value holds characters XML
    /// cannot represent.
    MalformedField,
    /// The error is associated with an underlying IO error.
    IO,
}

impl Error {
    /// Creates a new [`Error`] based on the [`ErrorKind`] and message to describe the error.
    pub fn new<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Self {
            kind,
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an existing error as the source of [`Error`].
    pub fn wrap<E>(kind: ErrorKind, source: E) -> Self
    where
        E: Into<DynError>,
    {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Wraps an existing error as the source of [`Error`] with a message describing what failed.
    pub fn with_source<S, E>(kind: ErrorKind, message: S, source: E) -> Self
    where
        S: Into<String>,
        E: Into<DynError>,
    {
        Self {
            kind,
            message: Some(message.into()),
            source: Some(source.into()),
        }
    }

    /// Returns the kind of error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ErrorKind::UnsupportedFormat => f.write_str("Unsupported format error")?,
            ErrorKind::MalformedInput => f.write_str("Malformed input error")?,
            ErrorKind::MalformedField => f.write_str("Malformed field error")?,
            ErrorKind::IO => f.write_str("IO error")?,
        };

        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }

        if let Some(cause) = &self.source {
            write!(f, ": caused by {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| &**e as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message_and_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = Error::with_source(ErrorKind::IO, "Cannot write output", cause);

        assert_eq!(
            "IO error: Cannot write output: caused by disk full",
            err.to_string()
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn display_without_source() {
        let err = Error::new(ErrorKind::UnsupportedFormat, "'docx'");

        assert_eq!("Unsupported format error: 'docx'", err.to_string());
        assert_eq!(ErrorKind::UnsupportedFormat, err.kind());
    }
}
