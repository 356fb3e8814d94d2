//! Approximate substring matching.
//!
//! The distance between a pattern and a text is the smallest edit distance
//! between the pattern and any substring of the text (Sellers' algorithm),
//! where an edit is an insertion, a deletion, a substitution or a swap of
//! two adjacent characters. An exact substring has distance 0.

/// Edit distance from `pattern` to its best-matching substring of `text`.
///
/// Never exceeds `pattern.len()`.
pub(crate) fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // Columns of the DP table indexed by pattern position; row 0 is always 0
    // because a match may start anywhere in the text.
    let mut before_prev: Vec<usize> = (0..=m).collect();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0; m + 1];
    let mut best = m;

    for j in 1..=text.len() {
        cur[0] = 0;
        for i in 1..=m {
            let cost = usize::from(pattern[i - 1] != text[j - 1]);
            let mut d = (prev[i - 1] + cost).min(prev[i] + 1).min(cur[i - 1] + 1);
            if i > 1 && j > 1 && pattern[i - 1] == text[j - 2] && pattern[i - 2] == text[j - 1] {
                d = d.min(before_prev[i - 2] + 1);
            }
            cur[i] = d;
        }
        best = best.min(cur[m]);
        if best == 0 {
            break;
        }
        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}

/// `substring_distance` scaled into `[0, 1]` by the pattern length.
pub(crate) fn match_score(pattern: &[char], text: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    substring_distance(pattern, text) as f64 / pattern.len() as f64
}

pub(crate) fn normalize(text: &str) -> Vec<char> {
    let lowered = text.to_lowercase();
    let mut chars = Vec::with_capacity(lowered.len());
    for word in lowered.split_whitespace() {
        if !chars.is_empty() {
            chars.push(' ');
        }
        chars.extend(word.chars());
    }
    chars
}
