//! Error handling for templ.
//! Defines the error kinds surfaced by locating, loading variables, rendering
//! and repository management, and the result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for templ operations.
///
/// Every variant carries the offending path, token, section or upstream so the
/// message printed on stderr is enough to find the problem.
#[derive(Error, Debug)]
pub enum Error {
    /// A template, variables file, template root or repository path is absent.
    #[error("Not found: {what} '{path}'.")]
    NotFound { what: &'static str, path: String },

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A malformed `KEY=VALUE` token or an undecodable variables file.
    #[error("Variable error: {0}.")]
    VariableError(String),

    /// A placeholder name containing a character that is not allowed.
    #[error(
        "Template syntax error: bad character {character:?} in placeholder '{placeholder}' of section '{section}'."
    )]
    TemplateSyntaxError { character: char, placeholder: String, section: String },

    /// Any other failure while evaluating a section.
    #[error("Render error: {reason} in section '{section}'.")]
    RenderError { section: String, reason: String },

    /// The upstream is neither a recognised git URL nor an existing directory.
    #[error("Invalid upstream '{upstream}': {reason}.")]
    RepositoryClassificationError { upstream: String, reason: String },

    /// A pull that cannot proceed without manual intervention.
    #[error("Repository conflict in '{repository}': {reason}.")]
    RepositoryConflict { repository: String, reason: String },

    /// The template root cannot be determined.
    #[error("Template root error: {0}.")]
    TemplateRootError(String),

    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    #[error("Minijinja error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),
}

/// Convenience type alias for Results with templ's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether a batch operation may log this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::RepositoryConflict { .. })
    }
}

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
