//! Generic sequence alignment (longest common subsequence).
//!
//! One routine serves both word alignment (token equality) and block
//! alignment (similarity above a threshold), so the tie-break and the
//! reconstruction order are identical at both call sites.
//!
//! The DP table is `O(m * n)` in time and space. Callers are expected to
//! bound their sequence lengths; there is no incremental variant.

/// An order-preserving partial matching between two index ranges.
///
/// Pairs are strictly increasing in both coordinates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alignment {
    pairs: Vec<(usize, usize)>,
    old_len: usize,
    new_len: usize,
}

impl Alignment {
    /// The matched `(old, new)` index pairs in increasing order.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Length of the old sequence this alignment was computed over.
    pub fn old_len(&self) -> usize {
        self.old_len
    }

    /// Length of the new sequence this alignment was computed over.
    pub fn new_len(&self) -> usize {
        self.new_len
    }

    /// Walk both sequences in reconstruction order.
    ///
    /// Before each matched pair, every unmatched old index since the
    /// previous match is yielded as [`Step::Removed`], then every unmatched
    /// new index as [`Step::Added`], then the pair itself. Trailing
    /// unmatched indices follow the last match in the same order. Every
    /// index of both sequences appears exactly once.
    pub fn steps(&self) -> Steps<'_> {
        Steps {
            alignment: self,
            next_pair: 0,
            old: 0,
            new: 0,
        }
    }
}

/// One step of an alignment walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// An old index with no counterpart.
    Removed(usize),
    /// A new index with no counterpart.
    Added(usize),
    /// A matched `(old, new)` pair.
    Matched(usize, usize),
}

/// Iterator returned by [`Alignment::steps`].
pub struct Steps<'a> {
    alignment: &'a Alignment,
    next_pair: usize,
    old: usize,
    new: usize,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let (old_stop, new_stop) = self
            .alignment
            .pairs
            .get(self.next_pair)
            .copied()
            .unwrap_or((self.alignment.old_len, self.alignment.new_len));

        if self.old < old_stop {
            self.old += 1;
            return Some(Step::Removed(self.old - 1));
        }
        if self.new < new_stop {
            self.new += 1;
            return Some(Step::Added(self.new - 1));
        }
        if self.next_pair < self.alignment.pairs.len() {
            self.next_pair += 1;
            self.old = old_stop + 1;
            self.new = new_stop + 1;
            return Some(Step::Matched(old_stop, new_stop));
        }
        None
    }
}

/// Align `old_len` items against `new_len` items under an equivalence
/// predicate `eq(old_index, new_index)`.
///
/// Returns the longest set of matched pairs that is strictly increasing in
/// both sequences. The predicate is evaluated exactly once per cell.
/// Backtracking from the end steps back in the old sequence only when that
/// keeps a strictly longer subsequence, so ties always consume the new
/// sequence first; the result is deterministic for a given predicate.
pub fn align<F>(old_len: usize, new_len: usize, mut eq: F) -> Alignment
where
    F: FnMut(usize, usize) -> bool,
{
    let width = new_len + 1;
    let mut table = vec![0usize; (old_len + 1) * width];
    let mut hits = vec![false; old_len * new_len];

    for i in 1..=old_len {
        for j in 1..=new_len {
            let hit = eq(i - 1, j - 1);
            hits[(i - 1) * new_len + (j - 1)] = hit;
            table[i * width + j] = if hit {
                table[(i - 1) * width + (j - 1)] + 1
            } else {
                table[(i - 1) * width + j].max(table[i * width + (j - 1)])
            };
        }
    }

    let mut pairs = Vec::with_capacity(table[old_len * width + new_len]);
    let (mut i, mut j) = (old_len, new_len);
    while i > 0 && j > 0 {
        if hits[(i - 1) * new_len + (j - 1)] {
            pairs.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if table[(i - 1) * width + j] > table[i * width + (j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();

    Alignment {
        pairs,
        old_len,
        new_len,
    }
}

/// Align two slices by element equality.
pub fn align_slices<T: PartialEq>(old: &[T], new: &[T]) -> Alignment {
    align(old.len(), new.len(), |i, j| old[i] == new[j])
}
