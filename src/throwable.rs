//! Textual representation of an error attached to a log record.
//!
//! Appenders that include throwables append these lines verbatim after the
//! rendered message, one per line and in the order stored here.

use std::error::Error;

/// Ordered trace lines describing an error and its causes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThrowableRepr {
    lines: Vec<String>,
}

impl ThrowableRepr {
    /// Build a representation from pre-rendered trace lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Render `error` and its `source()` chain.
    ///
    /// The first line is the error's display output. Each cause contributes
    /// a `Caused by: ...` line, outermost first. Multi-line display output is
    /// split so every stored entry is a single line.
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let mut lines: Vec<String> = error.to_string().lines().map(str::to_owned).collect();
        let mut source = error.source();
        while let Some(cause) = source {
            let rendered = cause.to_string();
            let mut cause_lines = rendered.lines();
            let first = cause_lines.next().unwrap_or_default();
            lines.push(format!("Caused by: {first}"));
            lines.extend(cause_lines.map(|l| format!("    {l}")));
            source = cause.source();
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<E> From<&E> for ThrowableRepr
where
    E: Error + 'static,
{
    fn from(error: &E) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Leaf;

    impl fmt::Display for Leaf {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("disk unplugged")
        }
    }

    impl Error for Leaf {}

    #[derive(Debug)]
    struct Wrapper(Leaf);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("write failed\nwhile flushing journal")
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn from_lines_preserves_order() {
        let repr = ThrowableRepr::from_lines(["a", "b", "c"]);
        assert_eq!(repr.lines(), ["a", "b", "c"]);
    }

    #[test]
    fn from_error_walks_source_chain() {
        let repr = ThrowableRepr::from(&Wrapper(Leaf));
        assert_eq!(
            repr.lines(),
            [
                "write failed",
                "while flushing journal",
                "Caused by: disk unplugged"
            ]
        );
    }

    #[test]
    fn io_error_renders_single_line() {
        let err = std::io::Error::other("boom");
        let repr = ThrowableRepr::from(&err);
        assert_eq!(repr.lines(), ["boom"]);
    }
}
