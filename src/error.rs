use crate::api::*;
use codespan_reporting::diagnostic::{Diagnostic, Label, LabelStyle};
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Malformed type: bad struct syntax, or a token that can't begin a type
    Type,

    /// Malformed declaration or function header/body
    Stmt,

    /// Syntax we recognize but don't handle yet, like initializers
    NotImplemented,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorLabel {
    pub range: Range,
    pub label: String,
}

/// A parse failure. The first label points at the token that caused it; each
/// label after that was added by an enclosing construct as the error moved
/// outward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub labels: Vec<ErrorLabel>,
}

macro_rules! error {
    ($kind:ident, $msg:expr $( , $range:expr, $label:expr )* $(,)? ) => {{
        let err = $crate::error::ParseError::new($crate::error::ErrorKind::$kind, $msg);
        $( let err = err.with_label($range, $label); )*
        err
    }};
}

macro_rules! throw {
    ( $( $arg:tt )* ) => {
        return Err(error!( $( $arg )* ))
    };
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        return ParseError {
            kind,
            message: message.into(),
            labels: Vec::new(),
        };
    }

    pub fn with_label(mut self, range: Range, label: impl Into<String>) -> Self {
        self.add_label(range, label);
        return self;
    }

    pub fn add_label(&mut self, range: Range, label: impl Into<String>) {
        self.labels.push(ErrorLabel {
            range,
            label: label.into(),
        });
    }

    /// Range of the token that caused the error, if there is one.
    pub fn primary_range(&self) -> Option<Range> {
        self.labels.first().map(|l| l.range)
    }

    pub fn diagnostic<FileId: Copy>(&self, file: FileId) -> Diagnostic<FileId> {
        let mut labels = Vec::with_capacity(self.labels.len());
        for (idx, label) in self.labels.iter().enumerate() {
            let style = if idx == 0 {
                LabelStyle::Primary
            } else {
                LabelStyle::Secondary
            };

            labels.push(Label::new(style, file, label.range).with_message(&label.label));
        }

        Diagnostic::error()
            .with_message(&self.message)
            .with_labels(labels)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.message)?;
        for label in &self.labels {
            write!(fmt, "\n  {}: {}", label.range, label.label)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_keep_insertion_order() {
        let err = error!(
            Type,
            "expected ';' character",
            r(10, 11),
            "this token is invalid for the current context"
        )
        .with_label(r(0, 6), "in this struct");

        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.primary_range(), Some(r(10, 11)));
        assert_eq!(err.labels[1].label, "in this struct");

        let diagnostic = err.diagnostic(());
        assert_eq!(diagnostic.message, "expected ';' character");
        assert_eq!(diagnostic.labels.len(), 2);
        assert_eq!(diagnostic.labels[0].range, 10..11);
    }

    #[test]
    fn display_lists_labels() {
        let err = error!(Stmt, "unexpected token", r(4, 5), "here");
        assert_eq!(err.to_string(), "unexpected token\n  4..5: here");
    }
}
