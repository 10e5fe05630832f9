//! Diagnostics infrastructure - the pipeline's error sink.
//!
//! Every stage records its failures here as [`Diagnostic`] values; the
//! driver checks [`Handler::has_errors`] between stages and calls
//! [`Handler::report`] to produce the error report, one line per
//! diagnostic:
//!
//! ```text
//! [Syntax Error] Line 3, Position 8: Expected token SEMICOLON ...
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};

use crate::span::Span;

/// Classification of a diagnostic.
///
/// `Semantic` is reserved: the language currently has no compile-time
/// symbol checks, so undeclared reads surface as `Runtime` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Lexical,
    Syntax,
    Semantic,
    Runtime,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Lexical => write!(f, "Lexical"),
            Category::Syntax => write!(f, "Syntax"),
            Category::Semantic => write!(f, "Semantic"),
            Category::Runtime => write!(f, "Runtime"),
        }
    }
}

/// A single recorded failure with its source location.
///
/// Runtime diagnostics carry the IR instruction index in the span's line
/// field; there is no source line to point at once the AST has been
/// lowered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: Category,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit category and span.
    pub fn new(category: Category, message: impl Into<String>, span: Span) -> Self {
        Self {
            category,
            message: message.into(),
            span,
        }
    }

    /// A lexical error at the given source coordinates.
    pub fn lexical(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(Category::Lexical, message, Span::point(line, column))
    }

    /// A syntax error at the given source coordinates.
    pub fn syntax(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(Category::Syntax, message, Span::point(line, column))
    }

    /// A runtime error at the given IR instruction index.
    pub fn runtime(message: impl Into<String>, index: usize) -> Self {
        Self::new(Category::Runtime, message, Span::point(index as u32, 0))
    }

    /// Source line (1-based), or the instruction index for `Runtime`.
    pub fn line(&self) -> u32 {
        self.span.line
    }

    /// Byte column within the line (0-based).
    pub fn column(&self) -> u32 {
        self.span.column
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} Error] Line {}, Position {}: {}",
            self.category, self.span.line, self.span.column, self.message
        )
    }
}

/// Append-only collector shared by all pipeline stages.
///
/// Interior mutability lets the lexer, parser and interpreter all hold a
/// shared reference to the same sink.
///
/// # Examples
///
/// ```
/// use minic_util::diagnostic::{Diagnostic, Handler};
///
/// let handler = Handler::new();
/// handler.emit(Diagnostic::lexical("Unknown symbol: '@'", 1, 4));
/// assert!(handler.has_errors());
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Creates an empty handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Records a diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Returns true if any diagnostic has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    /// Number of recorded diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Category of the first recorded diagnostic, if any.
    ///
    /// Stages are gated on an empty sink, so this is the category of the
    /// first failing stage.
    pub fn first_category(&self) -> Option<Category> {
        self.diagnostics.borrow().first().map(|d| d.category)
    }

    /// Snapshot of all recorded diagnostics, in insertion order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Removes all recorded diagnostics.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }

    /// Writes the report, one formatted line per diagnostic, in insertion
    /// order.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for diagnostic in self.diagnostics.borrow().iter() {
            writeln!(out, "{}", diagnostic)?;
        }
        Ok(())
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}
