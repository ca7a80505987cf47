use clap::Parser;
use std::ffi::OsString;
use templ::cli::Args;
use templ::locator::MatchPolicy;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("templ")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["examples/hello.txt=vars.yaml", "NAME=World"]))
        .unwrap();

    assert_eq!(parsed.args, vec!["examples/hello.txt=vars.yaml", "NAME=World"]);
    assert!(!parsed.list);
    assert!(!parsed.update);
    assert!(!parsed.stdin);
    assert!(!parsed.verbose);
    assert!(parsed.fetch.is_empty());
    assert_eq!(parsed.match_policy, MatchPolicy::Substring);
    assert!(parsed.has_action());
}

#[test]
fn test_all_flags() {
    let parsed = Args::try_parse_from(make_args(&[
        "--list",
        "--update",
        "--stdin",
        "--verbose",
        "--match",
        "file-name",
        "--fetch",
        "https://github.com/user/templates.git",
        "--fetch",
        "./local",
    ]))
    .unwrap();

    assert!(parsed.list);
    assert!(parsed.update);
    assert!(parsed.stdin);
    assert!(parsed.verbose);
    assert_eq!(parsed.match_policy, MatchPolicy::FileName);
    assert_eq!(parsed.fetch, vec!["https://github.com/user/templates.git", "./local"]);
}

#[test]
fn test_short_flags() {
    let parsed = Args::try_parse_from(make_args(&["-l", "-u", "-s", "-v"])).unwrap();

    assert!(parsed.list);
    assert!(parsed.update);
    assert!(parsed.stdin);
    assert!(parsed.verbose);
}

#[test]
fn test_no_action() {
    let parsed = Args::try_parse_from(make_args(&["-v"])).unwrap();
    assert!(!parsed.has_action());
}

#[test]
fn test_fetch_requires_value() {
    assert!(Args::try_parse_from(make_args(&["--fetch"])).is_err());
}

#[test]
fn test_unknown_match_policy() {
    assert!(Args::try_parse_from(make_args(&["--match", "regex", "a"])).is_err());
}
