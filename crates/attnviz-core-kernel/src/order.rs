use crate::token::{TOKEN_COUNT, Token};
use anyhow::{Result, bail};
use log::trace;
use rand::Rng;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Display order: a permutation of `0..n`.
///
/// Inline storage covers the three-token case without touching the heap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
#[serde(transparent)]
pub struct Order(SmallVec<[usize; TOKEN_COUNT]>);

impl Default for Order {
    fn default() -> Self {
        Self::identity(TOKEN_COUNT)
    }
}

impl Order {
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Validates that `indices` is a permutation of `0..indices.len()`.
    pub fn new(indices: &[usize]) -> Result<Self> {
        let n = indices.len();
        let mut seen: SmallVec<[bool; TOKEN_COUNT]> = SmallVec::from_elem(false, n);

        for &idx in indices {
            if idx >= n {
                bail!("order: index {} out of range for {} positions", idx, n);
            }
            if seen[idx] {
                bail!("order: index {} appears more than once", idx);
            }
            seen[idx] = true;
        }

        Ok(Self(SmallVec::from_slice(indices)))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(pos, &idx)| pos == idx)
    }

    /// Token at display position `pos`, if the index names one.
    pub fn token_at(&self, pos: usize) -> Option<Token> {
        self.0.get(pos).copied().and_then(Token::from_index)
    }

    pub fn tokens(&self) -> impl Iterator<Item = Option<Token>> + '_ {
        self.0.iter().map(|&idx| Token::from_index(idx))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}

/// Fisher-Yates shuffle. Returns a fresh permutation and leaves `order`
/// untouched; the caller decides whether to keep the result.
pub fn shuffle<R: Rng>(order: &Order, rng: &mut R) -> Order {
    let mut next = order.0.clone();

    for i in (1..next.len()).rev() {
        let j = rng.random_range(0..=i);
        next.swap(i, j);
    }

    trace!("shuffle: {} -> {:?}", order, next.as_slice());
    Order(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_order_validation() {
        assert!(Order::new(&[2, 0, 1]).is_ok());
        assert!(Order::new(&[]).is_ok());
        assert!(Order::new(&[0, 0, 1]).is_err());
        assert!(Order::new(&[0, 1, 3]).is_err());
    }

    #[test]
    fn test_identity() {
        let o = Order::default();
        assert_eq!(o.as_slice(), &[0, 1, 2]);
        assert!(o.is_identity());
        assert!(!Order::new(&[1, 0, 2]).unwrap().is_identity());
    }

    #[test]
    fn test_token_at() {
        let o = Order::new(&[2, 0, 1]).unwrap();
        assert_eq!(o.token_at(0), Some(Token::C));
        assert_eq!(o.token_at(1), Some(Token::A));
        assert_eq!(o.token_at(3), None);
        assert_eq!(Order::identity(4).token_at(3), None);
    }

    #[test]
    fn test_shuffle_keeps_index_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = Order::default();

        for _ in 0..200 {
            let shuffled = shuffle(&original, &mut rng);
            let mut sorted = shuffled.as_slice().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2]);
            assert!(Order::new(shuffled.as_slice()).is_ok());
        }

        // input never mutated
        assert!(original.is_identity());
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(shuffle(&Order::default(), &mut rng));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_shuffle_trivial_orders() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffle(&Order::identity(0), &mut rng).is_empty());
        assert_eq!(shuffle(&Order::identity(1), &mut rng).as_slice(), &[0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Order::new(&[1, 2, 0]).unwrap().to_string(), "[1,2,0]");
    }
}
