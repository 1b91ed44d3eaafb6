use super::*;

// Every char is 10 units wide, spaces included.
fn fixed(text: &str) -> f64 {
    text.chars().count() as f64 * 10.0
}

#[test]
fn short_text_is_single_line() {
    let mut m = fixed;
    assert_eq!(wrap_lines("Test Video", 350.0, &mut m), vec!["Test Video"]);
}

#[test]
fn greedy_break_keeps_lines_within_width() {
    let mut m = fixed;
    let lines = wrap_lines("aaa bbb ccc ddd", 70.0, &mut m);
    assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    for line in &lines {
        assert!(fixed(line) <= 70.0, "{line:?}");
    }
}

#[test]
fn whitespace_runs_collapse() {
    let mut m = fixed;
    assert_eq!(wrap_lines("  a \t  b  ", 100.0, &mut m), vec!["a b"]);
}

#[test]
fn explicit_newlines_always_break() {
    let mut m = fixed;
    assert_eq!(
        wrap_lines("one\n\ntwo", 500.0, &mut m),
        vec!["one", "", "two"]
    );
}

#[test]
fn overlong_word_is_split_between_chars() {
    let mut m = fixed;
    let lines = wrap_lines("x abcdefghij y", 40.0, &mut m);
    assert_eq!(lines, vec!["x", "abcd", "efgh", "ij y"]);
    for line in &lines {
        assert!(fixed(line) <= 40.0, "{line:?}");
    }
}

// Marks and joiners take no width of their own.
fn visible(text: &str) -> f64 {
    text.chars().filter(|c| !extends_cluster(*c)).count() as f64 * 10.0
}

#[test]
fn overlong_word_keeps_combining_marks_with_their_base() {
    let mut m = visible;
    let lines = wrap_lines("ae\u{301}ie\u{301}o", 20.0, &mut m);
    assert_eq!(lines, vec!["ae\u{301}", "ie\u{301}", "o"]);
}

#[test]
fn overlong_word_never_splits_a_zwj_sequence() {
    let mut m = visible;
    let coder = "\u{1F469}\u{1F3FD}\u{200D}\u{1F4BB}";
    let lines = wrap_lines(&coder.repeat(2), 10.0, &mut m);
    assert_eq!(lines, vec![coder, coder]);
}

#[test]
fn clusters_group_marks_selectors_and_joins() {
    assert_eq!(
        clusters("e\u{301}x\u{2764}\u{FE0F}a\u{200D}b"),
        vec!["e\u{301}", "x", "\u{2764}\u{FE0F}", "a\u{200D}b"]
    );
    assert!(clusters("").is_empty());
}

#[test]
fn empty_text_yields_one_empty_line() {
    let mut m = fixed;
    assert_eq!(wrap_lines("", 100.0, &mut m), vec![String::new()]);
}

#[test]
fn wrapping_is_idempotent() {
    let mut m = fixed;
    let text = "the quick brown fox jumps over the lazy dog ".repeat(5);
    let first = wrap_lines(&text, 120.0, &mut m);
    let second = wrap_lines(&first.join("\n"), 120.0, &mut m);
    assert_eq!(first, second);
}

#[test]
fn no_characters_are_lost() {
    let mut m = fixed;
    let text = "supercalifragilistic is a word";
    let lines = wrap_lines(text, 60.0, &mut m);
    let rejoined: String = lines.concat().chars().filter(|c| !c.is_whitespace()).collect();
    let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(rejoined, expected);
}
