//! Edit Similarity
//!
//! Normalized similarity ratio between two comparison keys, based on the
//! longest common subsequence: `2 * LCS / (|a| + |b|)`. Same shape as the
//! classic diff ratio, so 1.0 means identical and 0.0 means nothing shared.

/// Compute the similarity ratio between two strings in `0.0..=1.0`.
///
/// Works on characters, not bytes, so multi-byte filenames compare sanely.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Rolling two-row LCS table; key lengths are short so O(n*m) is fine.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
        curr[0] = 0;
    }
    let lcs = prev[b.len()];

    (2.0 * lcs as f64) / ((a.len() + b.len()) as f64)
}
