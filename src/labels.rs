//! Hint-label generation.
//!
//! Labels form a prefix-free code over the configured alphabet: no label is
//! a strict prefix of another, so a session resolves unambiguously as
//! characters are typed one at a time. Construction starts from the K
//! single-character labels and repeatedly splits the rightmost shortest
//! label into its K children until at least N leaves exist; the first N
//! leaves are assigned in order. Targets earlier in the configured ordering
//! therefore receive the shorter labels.

use serde::{Deserialize, Serialize};

use crate::error::{KeyhintError, KeyhintResult};
use crate::geom::Point;

/// An ordered, deduplicated, case-insensitive hint alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from user configuration.
    ///
    /// Characters are lowercased and deduplicated preserving first
    /// occurrence; fewer than two distinct characters is an error since a
    /// one-symbol prefix-free code cannot label more than one target.
    pub fn new(source: &str) -> KeyhintResult<Self> {
        let mut chars: Vec<char> = Vec::new();
        for c in source.chars() {
            let c = c.to_ascii_lowercase();
            if !c.is_whitespace() && !chars.contains(&c) {
                chars.push(c);
            }
        }
        if chars.len() < 2 {
            return Err(KeyhintError::InvalidAlphabet {
                alphabet: source.to_string(),
                distinct: chars.len(),
            });
        }
        Ok(Self { chars })
    }

    /// Number of symbols (K).
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Map a typed character to its canonical alphabet form, or `None` when
    /// the character is not part of the alphabet.
    pub fn normalize(&self, c: char) -> Option<char> {
        let c = c.to_ascii_lowercase();
        self.chars.contains(&c).then_some(c)
    }
}

/// Which targets receive the shorter labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelOrder {
    /// Top-left of the viewport first, row-major, matching how users scan
    /// a page.
    #[default]
    ReadingOrder,
    /// The scanner's document order.
    DocumentOrder,
}

/// Generate `n` prefix-free labels over `alphabet`, shortest first.
///
/// Leaves of a balanced K-ary tree: starting from the K single-character
/// labels, the rightmost shortest label is repeatedly split into its K
/// children until at least `n` leaves exist. Expanding from the right keeps
/// the early labels short; expanding the shortest first keeps the depth at
/// ceil(log_K n) + 1, so label length grows logarithmically in `n`.
pub fn generate(n: usize, alphabet: &Alphabet) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let mut slots: Vec<String> = alphabet.chars().iter().map(|c| c.to_string()).collect();
    while slots.len() < n {
        let min_len = slots.iter().map(String::len).min().unwrap_or(0);
        let idx = slots
            .iter()
            .rposition(|s| s.len() == min_len)
            .unwrap_or(0);
        let parent = slots.remove(idx);
        for (k, c) in alphabet.chars().iter().enumerate() {
            let mut child = parent.clone();
            child.push(*c);
            slots.insert(idx + k, child);
        }
    }
    slots.truncate(n);
    slots
}

/// Assign labels to targets identified by their anchor points.
///
/// `anchors[i]` is the top-left of target `i`'s first visible rect in
/// viewport coordinates. The result is positionally aligned with the input:
/// `result[i]` is target `i`'s label. Under `ReadingOrder` the shortest
/// labels go to the anchors nearest the top-left, row-major; under
/// `DocumentOrder` labels follow the input order.
pub fn assign(anchors: &[Point], alphabet: &Alphabet, order: LabelOrder) -> Vec<String> {
    let labels = generate(anchors.len(), alphabet);

    let mut ranking: Vec<usize> = (0..anchors.len()).collect();
    if order == LabelOrder::ReadingOrder {
        ranking.sort_by(|&a, &b| {
            let (pa, pb) = (anchors[a], anchors[b]);
            pa.y.total_cmp(&pb.y).then(pa.x.total_cmp(&pb.x))
        });
    }

    let mut out = vec![String::new(); anchors.len()];
    for (label, target_idx) in labels.into_iter().zip(ranking) {
        out[target_idx] = label;
    }
    out
}
