//! Section-isolated template rendering.
//!
//! Templates are split after every `}}` and each piece is judged on its own,
//! so double-brace syntax owned by other tools (`${{ env.FOO }}` in a CI
//! pipeline, say) passes through untouched while `{{ .NAME }}` placeholders are
//! substituted.
//!
//! Rendering runs in two phases:
//! 1. [`scan`] tags every section as [`SectionKind::Text`],
//!    [`SectionKind::Substitutable`], [`SectionKind::Foreign`] or
//!    [`SectionKind::Malformed`]. Any malformed section aborts the render.
//! 2. Only substitutable sections are evaluated, through a MiniJinja
//!    expression that looks the name up in the variable map.
use crate::error::{Error, Result};
use crate::variables::VariableMap;
use log::{debug, trace};
use minijinja::{context, Environment, UndefinedBehavior, Value};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Expression evaluated for every substitutable section. Indexing keeps names
/// such as `true` or `none` from being read as literals.
const LOOKUP_EXPRESSION: &str = "variables[name]";

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template text against a variable map.
    ///
    /// # Arguments
    /// * `template` - Template text to render
    /// * `variables` - Values for `{{ .NAME }}` placeholders
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template text
    fn render(&self, template: &str, variables: &VariableMap) -> Result<String>;
}

/// What a section holds, as decided by the pre-scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind<'a> {
    /// No complete `{{ ... }}` action.
    Text,
    /// Ends in `{{ .NAME }}` and NAME is defined.
    Substitutable {
        /// Text before the opening `{{`.
        prefix: &'a str,
        name: &'a str,
    },
    /// An action this engine does not own, or an undefined name.
    Foreign,
    /// A placeholder whose name holds a character that is not allowed.
    Malformed { character: char, placeholder: &'a str },
}

/// A run of template text ending at (and including) a `}}`, or the tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub text: &'a str,
    pub kind: SectionKind<'a>,
}

/// Splits template text after every `}}`. Concatenating the pieces gives the
/// original text back.
pub fn split_sections(template: &str) -> impl Iterator<Item = &str> {
    template.split_inclusive(CLOSE)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_operator_char(c: char) -> bool {
    matches!(c, '|' | '(' | ')')
}

/// Classifies a single section against the names in `variables`.
pub fn classify<'a>(text: &'a str, variables: &VariableMap) -> SectionKind<'a> {
    let Some(until_close) = text.strip_suffix(CLOSE) else {
        return SectionKind::Text;
    };
    let Some(open) = until_close.find(OPEN) else {
        return SectionKind::Text;
    };

    let prefix = &text[..open];
    let body = until_close[open + OPEN.len()..].trim();
    let Some(name) = body.strip_prefix('.') else {
        return SectionKind::Foreign;
    };

    // `{{ . }}`, pipelines such as `{{ .Name|printf }}` and calls are not placeholders.
    if name.is_empty() || name.contains(|c: char| c.is_whitespace() || is_operator_char(c)) {
        return SectionKind::Foreign;
    }
    if let Some(character) = name.chars().find(|&c| !is_name_char(c) && c != '.') {
        return SectionKind::Malformed { character, placeholder: body };
    }
    if name.contains('.') || !variables.contains_key(name) {
        return SectionKind::Foreign;
    }

    SectionKind::Substitutable { prefix, name }
}

/// Phase one: splits and classifies every section of `template`.
pub fn scan<'a>(template: &'a str, variables: &VariableMap) -> Vec<Section<'a>> {
    split_sections(template)
        .map(|text| Section { text, kind: classify(text, variables) })
        .collect()
}

/// Renderer applying the section-isolated algorithm.
pub struct SectionRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl SectionRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }
}

impl Default for SectionRenderer {
    fn default() -> Self {
        SectionRenderer::new()
    }
}

impl TemplateRenderer for SectionRenderer {
    /// Renders `template` section by section.
    ///
    /// An empty variable map returns the template unchanged without scanning.
    ///
    /// # Errors
    /// * `Error::TemplateSyntaxError` for the first malformed section
    /// * `Error::RenderError` if a substitutable section fails to evaluate
    fn render(&self, template: &str, variables: &VariableMap) -> Result<String> {
        if variables.is_empty() {
            debug!("No variables defined, passing template through");
            return Ok(template.to_string());
        }

        let sections = scan(template, variables);
        for section in &sections {
            if let SectionKind::Malformed { character, placeholder } = section.kind {
                return Err(Error::TemplateSyntaxError {
                    character,
                    placeholder: placeholder.to_string(),
                    section: section.text.to_string(),
                });
            }
        }

        let lookup = self.env.compile_expression(LOOKUP_EXPRESSION)?;
        let values = Value::from_serialize(variables);
        let mut output = String::with_capacity(template.len());

        for section in &sections {
            match section.kind {
                SectionKind::Substitutable { prefix, name } => {
                    let value = lookup
                        .eval(context! { variables => values.clone(), name => name })
                        .map_err(|e| Error::RenderError {
                            section: section.text.to_string(),
                            reason: e.to_string(),
                        })?;
                    trace!("Substituted '{}'", name);
                    output.push_str(prefix);
                    output.push_str(&value.to_string());
                }
                SectionKind::Foreign => {
                    trace!("Passing through '{}'", section.text);
                    output.push_str(section.text);
                }
                SectionKind::Text | SectionKind::Malformed { .. } => {
                    output.push_str(section.text);
                }
            }
        }

        Ok(output)
    }
}
