/// Width of a run of text in the active font.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> f64;
}

impl<F: FnMut(&str) -> f64> TextMeasure for F {
    fn measure(&mut self, text: &str) -> f64 {
        self(text)
    }
}

/// Greedily wrap `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Runs of whitespace collapse to one space. A word that
/// is wider than `max_width` on its own is split between character clusters, so every
/// returned line measures `<= max_width` (a single cluster wider than the box is the only
/// exception).
pub fn wrap_lines<M: TextMeasure + ?Sized>(text: &str, max_width: f64, m: &mut M) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line = fit_word(word, max_width, m, &mut out);
                continue;
            }
            let candidate = format!("{line} {word}");
            if m.measure(&candidate) <= max_width {
                line = candidate;
            } else {
                out.push(std::mem::take(&mut line));
                line = fit_word(word, max_width, m, &mut out);
            }
        }
        out.push(line);
    }
    out
}

// Returns the tail of `word` that starts the next line; full-width head chunks go to `out`.
fn fit_word<M: TextMeasure + ?Sized>(
    word: &str,
    max_width: f64,
    m: &mut M,
    out: &mut Vec<String>,
) -> String {
    if m.measure(word) <= max_width {
        return word.to_string();
    }
    let mut chunk = String::new();
    for cluster in clusters(word) {
        let candidate = format!("{chunk}{cluster}");
        if !chunk.is_empty() && m.measure(&candidate) > max_width {
            out.push(std::mem::take(&mut chunk));
            chunk.push_str(cluster);
        } else {
            chunk = candidate;
        }
    }
    chunk
}

/// Split `word` into break candidates that never separate a base char from the combining
/// marks, variation selectors, emoji modifiers or zero-width joins that follow it.
///
/// This covers the common sequences only; it is not full UAX #29 segmentation (Hangul
/// jamo and regional-indicator pairs can still be split).
fn clusters(word: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_joiner = false;
    for (i, ch) in word.char_indices() {
        if i > start && !prev_joiner && !extends_cluster(ch) {
            out.push(&word[start..i]);
            start = i;
        }
        prev_joiner = ch == ZWJ;
    }
    if start < word.len() {
        out.push(&word[start..]);
    }
    out
}

const ZWJ: char = '\u{200D}';

fn extends_cluster(ch: char) -> bool {
    matches!(ch,
        '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE00}'..='\u{FE0F}'
        | '\u{FE20}'..='\u{FE2F}'
        | '\u{1F3FB}'..='\u{1F3FF}'
        | '\u{E0100}'..='\u{E01EF}'
        | ZWJ
    )
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
