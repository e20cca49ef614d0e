use attnviz_core_kernel::ShuffleHistogram;
use attnviz_core_kernel::stats::all_permutations;
use std::fmt::Write as _;

const BAR_WIDTH: usize = 40;

/// Text histogram of shuffle outcomes, one line per permutation, with a
/// bar scaled to the most frequent one.
pub fn render_histogram(h: &ShuffleHistogram) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Shuffle distribution: {} trials over {} permutations (expected {:.1} each)",
        h.trials, h.permutations, h.expected
    );

    let perms = all_permutations(h.positions);
    let peak = h.counts.values().copied().max().unwrap_or(0).max(1);

    for p in &perms {
        let count = h.counts.get(p).copied().unwrap_or(0);
        let bar = "#".repeat(count * BAR_WIDTH / peak);
        let _ = writeln!(out, "  {:<10} {:>9}  {}", p.to_string(), count, bar);
    }

    let _ = write!(
        out,
        "chi-square = {:.3} (df = {}), max deviation = {:.2}%",
        h.chi_square,
        perms.len().saturating_sub(1),
        h.max_relative_deviation() * 100.0
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use attnviz_core_kernel::{Order, shuffle_histogram};

    #[test]
    fn test_render_histogram() {
        let h = shuffle_histogram(&Order::default(), 6_000, 5);
        let text = render_histogram(&h);
        println!("{}", text);

        assert!(text.starts_with("Shuffle distribution: 6000 trials over 6 permutations"));
        assert!(text.contains("[0,1,2]"));
        assert!(text.contains("[2,1,0]"));
        assert!(text.contains("df = 5"));
        assert_eq!(text.lines().count(), 8);
    }
}
