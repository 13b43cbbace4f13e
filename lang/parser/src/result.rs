use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("unexpected character {found:?}")]
    #[diagnostic(code("P-001"))]
    UnexpectedChar {
        found: char,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("unexpected token {found}, expected {expected}")]
    #[diagnostic(code("P-002"))]
    UnexpectedToken {
        found: String,
        expected: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("unexpected end of input, expected {expected}")]
    #[diagnostic(code("P-003"))]
    UnexpectedEof { expected: String },
    #[error("invalid number literal {text:?}")]
    #[diagnostic(code("P-004"))]
    InvalidNumber {
        text: String,
        #[label]
        span: Option<SourceSpan>,
    },
}

impl ParseError {
    /// 1-based line and column of the primary span, if it carries one.
    pub fn line_column(&self, source: &str) -> Option<(usize, usize)> {
        let offset = match self {
            ParseError::UnexpectedChar { span, .. } => span.as_ref(),
            ParseError::UnexpectedToken { span, .. } => span.as_ref(),
            ParseError::InvalidNumber { span, .. } => span.as_ref(),
            ParseError::UnexpectedEof { .. } => None,
        }?
        .offset();
        Some(offset_to_line_column(source, offset))
    }
}

fn offset_to_line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for ch in source[..offset.min(source.len())].chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
