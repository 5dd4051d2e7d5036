//! Combination Generator
//!
//! Enumerates every k-sized subset of an n-element sequence exactly once, in
//! lexicographic order of ascending index vectors. For `[a, b, c, d]` and
//! k = 2 the order is ab, ac, ad, bc, bd, cd: the first included element is
//! fixed left to right and the suffix after it is enumerated recursively.
//!
//! The generator is an iterative odometer, so large n never deepens the stack.

/// Iterator over index vectors `[i_0 < i_1 < ... < i_{k-1}]` drawn from `0..n`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    /// All k-subsets of `0..n`. Yields nothing when `k == 0` or `k > n`.
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            done: k == 0 || k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let current = self.indices.clone();

        // Advance the odometer: find the rightmost position that can still move
        let k = self.indices.len();
        let mut pos = k;
        while pos > 0 {
            pos -= 1;
            if self.indices[pos] < self.n - k + pos {
                self.indices[pos] += 1;
                for later in pos + 1..k {
                    self.indices[later] = self.indices[later - 1] + 1;
                }
                return Some(current);
            }
        }

        self.done = true;
        Some(current)
    }
}

/// All k-sized subsequences of `items`, preserving source order.
pub fn combinations_of<T>(items: &[T], k: usize) -> impl Iterator<Item = Vec<&T>> + '_ {
    Combinations::new(items.len(), k)
        .map(move |indices| indices.iter().map(|&i| &items[i]).collect())
}

/// Binomial coefficient C(n, k), or `None` on overflow.
///
/// Uses the multiplicative form; each partial product C(n-k+i, i) is an
/// integer, so the division is exact.
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 1..=k as u64 {
        let factor = (n as u64) - (k as u64) + i;
        result = result.checked_mul(factor)? / i;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lexicographic_order() {
        let all: Vec<Vec<usize>> = Combinations::new(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_five_choose_three() {
        let all: Vec<Vec<usize>> = Combinations::new(5, 3).collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all.first(), Some(&vec![0, 1, 2]));
        assert_eq!(all.last(), Some(&vec![2, 3, 4]));
    }

    #[test]
    fn test_edge_sizes() {
        // k = 1: each element as its own singleton
        let singles: Vec<Vec<usize>> = Combinations::new(3, 1).collect();
        assert_eq!(singles, vec![vec![0], vec![1], vec![2]]);

        // k = n: the whole sequence once
        let whole: Vec<Vec<usize>> = Combinations::new(3, 3).collect();
        assert_eq!(whole, vec![vec![0, 1, 2]]);

        assert_eq!(Combinations::new(3, 0).count(), 0);
        assert_eq!(Combinations::new(3, 4).count(), 0);
        assert_eq!(Combinations::new(0, 0).count(), 0);
    }

    #[test]
    fn test_combinations_of_preserves_source_order() {
        let items = ["d", "a", "c"];
        let all: Vec<Vec<&&str>> = combinations_of(&items, 2).collect();
        assert_eq!(
            all,
            vec![vec![&"d", &"a"], vec![&"d", &"c"], vec![&"a", &"c"]]
        );
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(5, 3), Some(10));
        assert_eq!(binomial(10, 0), Some(1));
        assert_eq!(binomial(10, 10), Some(1));
        assert_eq!(binomial(3, 4), Some(0));
        assert_eq!(binomial(60, 30), Some(118_264_581_564_861_424));
        assert_eq!(binomial(200, 100), None);
    }

    proptest! {
        #[test]
        fn prop_count_matches_binomial(n in 0usize..13, k in 1usize..13) {
            let all: Vec<Vec<usize>> = Combinations::new(n, k).collect();
            prop_assert_eq!(all.len() as u64, binomial(n, k).unwrap());

            for combo in &all {
                prop_assert_eq!(combo.len(), k);
                prop_assert!(combo.windows(2).all(|w| w[0] < w[1]));
            }
            // strictly increasing sequence means no repeats
            prop_assert!(all.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
