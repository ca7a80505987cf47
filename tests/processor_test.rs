mod common;

use tempfile::TempDir;
use templ::error::Error;
use templ::locator::MatchPolicy;
use templ::processor::{ensure_readable, parse_arguments, LocatedTemplate, Processor};
use templ::renderer::SectionRenderer;

struct Fixture {
    root: TempDir,
    vars: TempDir,
}

fn fixture() -> Fixture {
    let root = TempDir::new().unwrap();
    common::write_file(&root.path().join("examples/hello.txt"), "Hello {{ .name }}\n");
    common::write_file(
        &root.path().join("ci/release.yaml"),
        "ref: ${{ env.GITHUB_REF }}\nimage: {{ .image }}\n",
    );
    common::write_file(&root.path().join("a_directory/test1"), "one {{ .SPECIES }}\n");
    common::write_file(&root.path().join("b_directory/test1"), "two {{ .SPECIES }}\n");

    let vars = TempDir::new().unwrap();
    common::write_file(&vars.path().join("hello.yaml"), "---\nname: \"World\"\n");
    Fixture { root, vars }
}

#[test]
fn test_render_with_variables_file() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let arg = format!("examples/hello.txt={}", fixture.vars.path().join("hello.yaml").display());
    let outputs = processor.render_plan(&parse_arguments(&[arg])).unwrap();
    assert_eq!(outputs, vec!["Hello World\n"]);
}

#[test]
fn test_render_with_overrides() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let arg = format!("examples/hello.txt={}", fixture.vars.path().join("hello.yaml").display());
    let plan = parse_arguments(&[arg.as_str(), "name=Moon", "release", "image=alpine"]);
    let outputs = processor.render_plan(&plan).unwrap();
    assert_eq!(
        outputs,
        vec!["Hello Moon\n", "ref: ${{ env.GITHUB_REF }}\nimage: alpine\n"]
    );
}

#[test]
fn test_bare_fragment_without_variables_is_verbatim() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let outputs = processor.render_plan(&parse_arguments(&["hello"])).unwrap();
    assert_eq!(outputs, vec!["Hello {{ .name }}\n"]);
}

#[test]
fn test_fragment_matching_several_templates() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let outputs = processor.render_plan(&parse_arguments(&["test1", "SPECIES=HUMAN"])).unwrap();
    assert_eq!(outputs, vec!["one HUMAN\n", "two HUMAN\n"]);
}

#[test]
fn test_repeated_fragments_render_once() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let plan = parse_arguments(&["a_directory/test1", "a_directory/test1", "a_dir", "SPECIES=x"]);
    let located = processor.locate(&plan.requests).unwrap();
    assert_eq!(located.len(), 1);

    let outputs = processor.render_plan(&plan).unwrap();
    assert_eq!(outputs, vec!["one x\n"]);
}

#[test]
fn test_unknown_template() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let result = processor.render_plan(&parse_arguments(&["nothing-like-this"]));
    assert!(matches!(result, Err(Error::NotFound { what: "template", .. })));
}

#[test]
fn test_missing_variables_file() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let result = processor.render_plan(&parse_arguments(&["examples/hello.txt=/no/such/vars.yaml"]));
    assert!(matches!(result, Err(Error::NotFound { what: "variables file", .. })));
}

#[test]
fn test_malformed_token_from_stdin() {
    let fixture = fixture();
    let renderer = SectionRenderer::new();
    let processor = Processor::new(&renderer, fixture.root.path(), MatchPolicy::Substring);

    let result = processor.render_text("I love {{ .SPECIES }}", &["SPECIES HUMAN"]);
    assert!(matches!(result, Err(Error::VariableError(_))));

    let output = processor.render_text("I love {{ .SPECIES }}", &["SPECIES=HUMAN"]).unwrap();
    assert_eq!(output, "I love HUMAN");
}

#[test]
fn test_ensure_readable() {
    let fixture = fixture();
    let present = LocatedTemplate {
        path: fixture.root.path().join("examples/hello.txt"),
        variables_file: None,
    };
    let vanished =
        LocatedTemplate { path: fixture.root.path().join("gone.txt"), variables_file: None };

    assert!(ensure_readable(&[present.clone()]).is_ok());
    assert!(matches!(ensure_readable(&[present, vanished]), Err(Error::NotFound { .. })));
}
