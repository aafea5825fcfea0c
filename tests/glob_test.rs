use resloc::{compile, Glob, PatternErrorKind};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn glob(pattern: &str) -> Glob {
    compile(pattern).unwrap()
}

fn error_at(pattern: &str) -> (PatternErrorKind, usize) {
    let err = compile(pattern).unwrap_err();
    assert_eq!(err.pattern(), pattern);
    (err.kind().clone(), err.index())
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[test]
fn literal_patterns_match_only_themselves() {
    let g = glob("books/a_game_of_thrones.properties");
    assert!(g.is_match("books/a_game_of_thrones.properties"));
    assert!(!g.is_match("books/a_game_of_thrones.propertiesx"));
    assert!(!g.is_match("xbooks/a_game_of_thrones.properties"));
    assert!(!g.is_match("books/a_game_of_thronesXproperties"));
}

#[test]
fn regex_metacharacters_are_literal() {
    let g = glob("a+b(c)|[d]^$.e");
    assert!(g.is_match("a+b(c)|[d]^$.e"));
    assert!(!g.is_match("aab(c)|[d]^$.e"));
}

#[test]
fn matching_is_anchored() {
    let g = glob("*.txt");
    assert!(g.is_match("notes.txt"));
    assert!(!g.is_match("notes.txt.bak"));
    assert!(!g.is_match("dir/notes.txt"));
}

#[test]
fn single_star_stays_within_a_segment() {
    let g = glob("a/*.txt");
    assert!(g.is_match("a/b.txt"));
    assert!(g.is_match("a/.txt"));
    assert!(!g.is_match("a/b/c.txt"));
}

#[test]
fn double_star_crosses_segments() {
    let g = glob("a/**.txt");
    assert!(g.is_match("a/b.txt"));
    assert!(g.is_match("a/b/c.txt"));
    assert!(g.is_match("a/b/c/d.txt"));
    assert!(!g.is_match("b/c.txt"));

    let trailing = glob("a/**");
    assert!(trailing.is_match("a/b/c"));
    assert!(trailing.is_match("a/"));
}

#[test]
fn question_mark_is_one_non_separator_char() {
    let g = glob("file?.txt");
    assert!(g.is_match("file1.txt"));
    assert!(g.is_match("fileé.txt"));
    assert!(!g.is_match("file.txt"));
    assert!(!g.is_match("file12.txt"));
    assert!(!g.is_match("file/.txt"));
}

#[test]
fn groups_are_exact_alternation() {
    let g = glob("r.{txt,md}");
    assert!(g.is_match("r.txt"));
    assert!(g.is_match("r.md"));
    assert!(!g.is_match("r.rs"));
    assert!(!g.is_match("r.txtmd"));
    assert!(!g.is_match("r.tx"));
}

#[test]
fn group_alternatives_are_literal() {
    let g = glob("{a.b,c+d}");
    assert!(g.is_match("a.b"));
    assert!(g.is_match("c+d"));
    assert!(!g.is_match("axb"));
}

#[test]
fn empty_alternative_matches_nothing_extra() {
    let g = glob("name{,.bak}");
    assert!(g.is_match("name"));
    assert!(g.is_match("name.bak"));
    assert!(!g.is_match("name.old"));
}

#[test]
fn wildcards_inside_groups() {
    let g = glob("{docs/*,**.md}");
    assert!(g.is_match("docs/intro"));
    assert!(g.is_match("a/b/readme.md"));
    assert!(!g.is_match("docs/a/intro"));
}

#[test]
fn comma_and_stray_brace_outside_groups_are_literal() {
    let g = glob("a,b}");
    assert!(g.is_match("a,b}"));
    assert!(!g.is_match("a"));
}

#[test]
fn escapes_make_glob_metacharacters_literal() {
    let g = glob(r"\*\?\{a\,b\}\\");
    assert!(g.is_match(r"*?{a,b}\"));
    assert!(!g.is_match(r"x?{a,b}\"));

    let plain = glob(r"\a\/b");
    assert!(plain.is_match("a/b"));
}

#[test]
fn empty_pattern_matches_empty_name_only() {
    let g = glob("");
    assert!(g.is_match(""));
    assert!(!g.is_match("a"));
}

#[test]
fn names_with_newlines_still_match_double_star() {
    assert!(glob("**").is_match("line\nbreak"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn trailing_backslash_reports_its_index() {
    assert_eq!(error_at(r"\"), (PatternErrorKind::NoCharacterToEscape, 0));
    assert_eq!(error_at(r"books/\"), (PatternErrorKind::NoCharacterToEscape, 6));
    assert_eq!(error_at(r"a\\\"), (PatternErrorKind::NoCharacterToEscape, 3));
}

#[test]
fn nested_group_reports_nested_brace() {
    assert_eq!(error_at("{a,{b,c}}"), (PatternErrorKind::NestedGroup, 3));
    assert_eq!(error_at("x/{{"), (PatternErrorKind::NestedGroup, 3));
}

#[test]
fn unterminated_group_reports_end_of_pattern() {
    assert_eq!(error_at("*.{txt,md"), (PatternErrorKind::MissingClosingBrace, 8));
    assert_eq!(error_at("{"), (PatternErrorKind::MissingClosingBrace, 0));
}

#[test]
fn escaped_braces_do_not_open_groups() {
    assert!(compile(r"\{a").is_ok());
    assert!(compile(r"{a\}").is_err());
}

#[test]
fn error_message_names_pattern_and_index() {
    let err = compile("{a,{b}}").unwrap_err();
    assert_eq!(err.to_string(), "cannot nest groups near index 3\n{a,{b}}");
}

// ---------------------------------------------------------------------------
// Glob value
// ---------------------------------------------------------------------------

#[test]
fn glob_keeps_original_text() {
    let g: Glob = "books/*.properties".parse().unwrap();
    assert_eq!(g.as_str(), "books/*.properties");
    assert_eq!(g.to_string(), "books/*.properties");
    assert_eq!(g.regex().as_str(), r"^books/[^/]*\.properties$");
}

#[test]
fn glob_is_shareable_across_threads() {
    let g = glob("**.txt");
    std::thread::scope(|s| {
        for i in 0..4 {
            let g = &g;
            s.spawn(move || assert!(g.is_match(&format!("dir{i}/file.txt"))));
        }
    });
}
