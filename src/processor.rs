//! Core template processing orchestration.
//! Turns command-line arguments into located templates and variable maps, then
//! renders them. Every template is rendered before anything is written, so a
//! failure leaves stdout empty.

use crate::error::{Error, Result};
use crate::locator::{find_by_name, MatchPolicy};
use crate::renderer::TemplateRenderer;
use crate::variables;
use indexmap::IndexSet;
use log::debug;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A template named on the command line, optionally with its variables file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    pub fragment: String,
    pub variables_file: Option<PathBuf>,
}

/// Everything a render invocation was asked for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub requests: Vec<TemplateRequest>,
    /// `KEY=VALUE` overrides, applied to every template.
    pub assignments: Vec<String>,
}

/// A template file found under the template root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatedTemplate {
    pub path: PathBuf,
    pub variables_file: Option<PathBuf>,
}

/// Whether `s` is usable as a variable name on the command line.
pub fn is_variable_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sorts arguments into template requests and `KEY=VALUE` overrides.
///
/// An argument whose text before the first `=` is a bare variable name is an
/// override. Any other argument with an `=` pairs a template fragment with a
/// variables file. Arguments without `=` are plain fragments.
pub fn parse_arguments<S: AsRef<str>>(args: &[S]) -> RenderPlan {
    let mut plan = RenderPlan::default();

    for arg in args {
        let arg = arg.as_ref();
        match arg.split_once('=') {
            Some((name, _)) if is_variable_name(name) => plan.assignments.push(arg.to_string()),
            Some((fragment, variables_file)) => plan.requests.push(TemplateRequest {
                fragment: fragment.to_string(),
                variables_file: Some(PathBuf::from(variables_file)),
            }),
            None => plan
                .requests
                .push(TemplateRequest { fragment: arg.to_string(), variables_file: None }),
        }
    }

    plan
}

/// Opens and immediately closes every located template.
///
/// # Errors
/// * `Error::NotFound` for the first template that cannot be opened
pub fn ensure_readable(templates: &[LocatedTemplate]) -> Result<()> {
    for template in templates {
        File::open(&template.path).map_err(|_| Error::NotFound {
            what: "template",
            path: template.path.display().to_string(),
        })?;
    }
    Ok(())
}

/// Builds everything written to stdout: the listing, one path per line, then
/// each rendered text. A rendered text without a trailing newline gets one so
/// consecutive templates never share a line.
pub fn compose_output<S: AsRef<str>>(listing: &[PathBuf], rendered: &[S]) -> String {
    let mut output = String::new();
    for path in listing {
        output.push_str(&path.display().to_string());
        output.push('\n');
    }
    for text in rendered {
        let text = text.as_ref();
        output.push_str(text);
        if !text.ends_with('\n') {
            output.push('\n');
        }
    }
    output
}

/// Renders templates from the template root.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    policy: MatchPolicy,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        policy: MatchPolicy,
    ) -> Self {
        Self { renderer, template_root, policy }
    }

    /// Resolves every request to the template files it names.
    ///
    /// A file named by several requests with the same variables file is
    /// returned once, at its first position.
    ///
    /// # Errors
    /// * `Error::NotFound` if a fragment matches nothing
    pub fn locate(&self, requests: &[TemplateRequest]) -> Result<Vec<LocatedTemplate>> {
        let mut located = IndexSet::new();

        for request in requests {
            let paths = find_by_name(self.template_root, &[&request.fragment], self.policy)?;
            if paths.is_empty() {
                return Err(Error::NotFound { what: "template", path: request.fragment.clone() });
            }
            debug!("'{}' resolved to {:?}", request.fragment, paths);
            located.extend(paths.into_iter().map(|path| LocatedTemplate {
                path,
                variables_file: request.variables_file.clone(),
            }));
        }

        Ok(located.into_iter().collect())
    }

    /// Renders one located template with its variables file and the overrides.
    pub fn render_template<S: AsRef<str>>(
        &self,
        template: &LocatedTemplate,
        assignments: &[S],
    ) -> Result<String> {
        let variables = variables::resolve(template.variables_file.as_deref(), assignments)?;
        debug!("Rendering '{}'", template.path.display());
        let content = fs::read_to_string(&template.path)?;
        self.renderer.render(&content, &variables)
    }

    /// Renders text that did not come from the template root, such as stdin.
    pub fn render_text<S: AsRef<str>>(&self, text: &str, assignments: &[S]) -> Result<String> {
        let variables = variables::resolve(None, assignments)?;
        self.renderer.render(text, &variables)
    }

    /// Locates, checks and renders everything in `plan`.
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - One rendered text per located template, in
    ///   request order
    pub fn render_plan(&self, plan: &RenderPlan) -> Result<Vec<String>> {
        let located = self.locate(&plan.requests)?;
        ensure_readable(&located)?;
        located.iter().map(|template| self.render_template(template, &plan.assignments)).collect()
    }
}
