//! Geometric model of a diagram
//!
//! Containers own their elements' positions; oracles supply the initial
//! container anchors; the palette hands out container colors.

pub mod config;
pub mod container;
pub mod element;
pub mod error;
pub mod oracle;
pub mod palette;
pub mod types;

pub use config::LayoutConfig;
pub use container::{Container, ContainerSnapshot};
pub use element::Element;
pub use error::DiagramError;
pub use oracle::{FixedOracle, LayoutOracle, OracleError, OracleNode, RowOracle};
pub use palette::{Color, ColorParseError, PaletteAllocator, DEFAULT_PALETTE};
pub use types::*;

/// Compute Levenshtein edit distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Names within a small edit distance of `target`, closest first, at most three
pub(crate) fn find_similar<'a>(
    names: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&str, usize)> = names
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((name, dist))
        })
        .collect();

    candidates.sort_by_key(|(_, d)| *d);
    candidates
        .into_iter()
        .map(|(name, _)| name.to_string())
        .take(3)
        .collect()
}
