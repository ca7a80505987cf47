//! templ hydrates known template files with variables.
//! Templates live under a single template root, can be fetched from git
//! repositories, and are rendered without disturbing double-brace syntax that
//! belongs to other tools.

/// Command-line interface module for the templ application
pub mod cli;

/// Template root resolution
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the templ application
pub mod error;

/// Template lookup by name fragment
pub mod locator;

/// Logger initialisation
pub mod logger;

/// Core template processing orchestration
pub mod processor;

/// Section-isolated rendering of `{{ .NAME }}` placeholders
pub mod renderer;

/// Template repositories: classification, clone and update
pub mod repository;

/// Variable maps from YAML files and `KEY=VALUE` arguments
pub mod variables;

/// Directory walking that skips hidden entries
pub mod walker;
