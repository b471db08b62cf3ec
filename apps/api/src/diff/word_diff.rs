//! Word-level diff — classic LCS alignment over whitespace tokens.
//!
//! The DP table is O(m·n) in time and space, so inputs above
//! `MAX_DIFF_TOKENS` on either side skip it and fall back to a whole-text
//! remove/add pair.

use serde::{Deserialize, Serialize};

/// Token count above which `word_diff` stops aligning and reports the
/// whole old text as removed and the whole new text as added.
pub const MAX_DIFF_TOKENS: usize = 400;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Equal,
    Add,
    Remove,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffToken {
    pub kind: DiffKind,
    pub text: String,
}

impl DiffToken {
    fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Splits text into its non-empty whitespace-delimited words, in order.
/// No case folding and no punctuation handling: "Rust," and "rust" differ.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Computes the word-level edit script turning `old_text` into `new_text`.
///
/// Output is in edit-script order with runs of the same kind merged into a
/// single token (words joined by one space), so no two adjacent tokens share
/// a kind.
pub fn word_diff(old_text: &str, new_text: &str) -> Vec<DiffToken> {
    let old_tokens = tokenize(old_text);
    let new_tokens = tokenize(new_text);

    if old_tokens.len() > MAX_DIFF_TOKENS || new_tokens.len() > MAX_DIFF_TOKENS {
        let mut result = Vec::with_capacity(2);
        if !old_tokens.is_empty() {
            result.push(DiffToken::new(DiffKind::Remove, old_text));
        }
        if !new_tokens.is_empty() {
            result.push(DiffToken::new(DiffKind::Add, new_text));
        }
        return result;
    }

    let ops = lcs_edit_script(&old_tokens, &new_tokens);
    merge_runs(ops)
}

/// Builds the LCS table and walks it back from (m, n), returning one
/// operation per word in forward order.
fn lcs_edit_script<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<(DiffKind, &'a str)> {
    let m = old.len();
    let n = new.len();

    let mut dp = vec![vec![0u16; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if old[i - 1] == new[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            ops.push((DiffKind::Equal, new[j - 1]));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            // Ties go to `add`.
            ops.push((DiffKind::Add, new[j - 1]));
            j -= 1;
        } else {
            ops.push((DiffKind::Remove, old[i - 1]));
            i -= 1;
        }
    }

    ops.reverse();
    ops
}

fn merge_runs(ops: Vec<(DiffKind, &str)>) -> Vec<DiffToken> {
    let mut merged: Vec<DiffToken> = Vec::new();
    for (kind, word) in ops {
        match merged.last_mut() {
            Some(last) if last.kind == kind => {
                last.text.push(' ');
                last.text.push_str(word);
            }
            _ => merged.push(DiffToken::new(kind, word)),
        }
    }
    merged
}
