//! Competition ranking of keyword totals.

use std::collections::HashMap;

/// One row of the ranked output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based rank; tied totals share a rank.
    pub rank: usize,
    pub keyword: String,
    pub total: u64,
}

/// Rank keyword totals, highest first.
///
/// Ties share a rank and the next distinct total resumes at its position,
/// so `[50, 50, 30]` ranks as `[1, 1, 3]`. Tied keywords are listed in
/// ascending keyword order. Map iteration order never leaks into the output.
pub fn rank(results: &HashMap<String, u64>) -> Vec<RankedEntry> {
    let mut pairs: Vec<(&str, u64)> = results.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut ranked = Vec::with_capacity(pairs.len());
    let mut previous: Option<(u64, usize)> = None;
    for (position, (keyword, total)) in pairs.into_iter().enumerate() {
        let rank = match previous {
            Some((prev_total, prev_rank)) if prev_total == total => prev_rank,
            _ => position + 1,
        };
        previous = Some((total, rank));
        ranked.push(RankedEntry {
            rank,
            keyword: keyword.to_string(),
            total,
        });
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn entry(rank: usize, keyword: &str, total: u64) -> RankedEntry {
        RankedEntry {
            rank,
            keyword: keyword.to_string(),
            total,
        }
    }

    #[test]
    fn ties_share_rank_and_sort_alphabetically() {
        let ranked = rank(&totals(&[("foo", 50), ("bar", 50), ("baz", 30)]));
        assert_eq!(
            ranked,
            vec![entry(1, "bar", 50), entry(1, "foo", 50), entry(3, "baz", 30)]
        );
    }

    #[test]
    fn next_rank_skips_tie_group() {
        let ranked = rank(&totals(&[
            ("a", 10),
            ("b", 5),
            ("c", 5),
            ("d", 5),
            ("e", 1),
        ]));
        let ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2, 2, 5]);
    }

    #[test]
    fn distinct_totals_rank_sequentially() {
        let ranked = rank(&totals(&[("low", 1), ("high", 300), ("mid", 20)]));
        assert_eq!(
            ranked,
            vec![entry(1, "high", 300), entry(2, "mid", 20), entry(3, "low", 1)]
        );
    }

    #[test]
    fn zero_totals_rank_last() {
        let ranked = rank(&totals(&[("failed", 0), ("ok", 7), ("also_failed", 0)]));
        assert_eq!(
            ranked,
            vec![
                entry(1, "ok", 7),
                entry(2, "also_failed", 0),
                entry(2, "failed", 0)
            ]
        );
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rank(&HashMap::new()).is_empty());
    }

    #[test]
    fn input_is_untouched() {
        let input = totals(&[("x", 3), ("y", 4)]);
        let before = input.clone();
        let _ = rank(&input);
        assert_eq!(input, before);
    }

    #[test]
    fn rank_order_respects_totals() {
        let input = totals(&[("a", 9), ("b", 9), ("c", 4), ("d", 4), ("e", 4), ("f", 0)]);
        let ranked = rank(&input);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.total > b.total {
                assert!(a.rank < b.rank);
            } else {
                assert_eq!(a.rank, b.rank);
                assert!(a.keyword < b.keyword);
            }
        }
        assert_eq!(ranked.last().map(|e| e.rank), Some(6));
    }
}
