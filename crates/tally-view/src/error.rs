//! Errors

/// Marker for operations a view deliberately refuses to perform.
#[derive(Debug)]
struct Unsupported(String);

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is not supported", self.0)
    }
}

impl std::error::Error for Unsupported {}

/// An error type.
#[derive(Debug)]
pub struct Error(anyhow::Error);

impl<T: std::error::Error + Send + Sync + 'static> From<T> for Error {
    fn from(e: T) -> Self {
        Error(anyhow::Error::new(e))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Error> for anyhow::Error {
    fn from(e: Error) -> Self {
        e.0
    }
}

impl Error {
    /// An error for an operation that must never be called.
    pub fn unsupported(what: impl Into<String>) -> Self {
        Error::from(Unsupported(what.into()))
    }

    /// Whether this error came from [`Error::unsupported`].
    pub fn is_unsupported(&self) -> bool {
        self.0.is::<Unsupported>()
    }

    /// Add context to the error.
    pub fn context(self, context: impl std::fmt::Display + Send + Sync + 'static) -> Self {
        Error(self.0.context(context))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unsupported_is_detectable() {
        let err = Error::unsupported("hydration");
        assert!(err.is_unsupported());
        assert_eq!(err.to_string(), "hydration is not supported");

        let err = err.context("building the counter");
        assert!(err.is_unsupported());
        assert_eq!(err.to_string(), "building the counter");
    }

    #[test]
    fn other_errors_are_not_unsupported() {
        let parse = "nope".parse::<i64>().unwrap_err();
        let err = Error::from(parse);
        assert!(!err.is_unsupported());
    }
}
