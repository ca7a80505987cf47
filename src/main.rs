//! templ's main application entry point and orchestration logic.
//! Handles command-line argument parsing and runs the requested actions in
//! order: fetch, update, list, render.

use std::io::{self, Read, Write};

use log::{debug, info};
use templ::{
    cli::{get_args, Args},
    config::TemplateRoot,
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::{compose_output, parse_arguments, Processor},
    renderer::SectionRenderer,
    repository::{update_all, Repository, RepositorySource},
    walker::walk,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the template root
/// 2. Fetches each `--fetch` upstream
/// 3. Pulls every repository on `--update`
/// 4. Collects the template listing on `--list`
/// 5. Renders stdin or the named templates
/// 6. Writes the listing and rendered text to stdout once everything succeeded
fn run(args: Args) -> Result<()> {
    let template_root = TemplateRoot::from_env()?;
    debug!("Using template root '{}'.", template_root);

    for upstream in &args.fetch {
        let source = RepositorySource::new(upstream, &template_root)?;
        info!("Fetching from the {}.", source);
        source.fetch()?;
    }

    if args.update {
        let report = update_all(&template_root)?;
        info!(
            "Update finished: {} updated, {} up to date, {} skipped.",
            report.updated.len(),
            report.up_to_date.len(),
            report.skipped.len()
        );
    }

    let listing = if args.list { walk(&template_root)? } else { Vec::new() };

    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, template_root.path(), args.match_policy);

    let rendered = if args.stdin {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        vec![processor.render_text(&text, &args.args)?]
    } else if !args.args.is_empty() {
        processor.render_plan(&parse_arguments(&args.args))?
    } else {
        Vec::new()
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(compose_output(&listing, &rendered).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
