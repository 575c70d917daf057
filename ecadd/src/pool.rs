//! A sequential pool of Beaver triples.
//!
//! Both participants consume triples in the same order. The pool is an explicit cursor passed to
//! every operation which consumes triples, so the order is fixed by the order of operations.

use crate::{triple::Triple, ArithError};

/// A pool of provisioned triples with a consumption cursor.
#[derive(Debug, Default)]
pub struct TriplePool<F> {
    triples: Vec<Triple<F>>,
    cursor: usize,
}

impl<F: Copy> TriplePool<F> {
    /// Creates a new pool from provisioned triples.
    pub fn new(triples: Vec<Triple<F>>) -> Self {
        Self { triples, cursor: 0 }
    }

    /// Adds provisioned triples to the end of the pool.
    pub fn extend(&mut self, triples: impl IntoIterator<Item = Triple<F>>) {
        self.triples.extend(triples);
    }

    /// Returns the number of provisioned triples.
    pub fn provisioned(&self) -> usize {
        self.triples.len()
    }

    /// Returns the number of consumed triples.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Returns the number of triples left.
    pub fn remaining(&self) -> usize {
        self.triples.len() - self.cursor
    }

    /// Consumes the next triple.
    pub fn take(&mut self) -> Result<Triple<F>, ArithError> {
        let triple = self
            .triples
            .get(self.cursor)
            .copied()
            .ok_or(self.exhausted())?;
        self.cursor += 1;

        Ok(triple)
    }

    /// Consumes the next `count` triples.
    ///
    /// Consumes nothing if fewer than `count` triples are left.
    pub fn take_many(&mut self, count: usize) -> Result<Vec<Triple<F>>, ArithError> {
        if count > self.remaining() {
            return Err(self.exhausted());
        }

        let triples = self.triples[self.cursor..self.cursor + count].to_vec();
        self.cursor += count;

        Ok(triples)
    }

    fn exhausted(&self) -> ArithError {
        ArithError::PoolExhausted {
            provisioned: self.provisioned(),
            consumed: self.consumed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Share;
    use ecadd_fields::p256::P256;

    fn triple(i: u64) -> Triple<P256> {
        Triple {
            a: Share::new(P256::from(i)),
            b: Share::new(P256::from(i)),
            c: Share::new(P256::from(i * i)),
        }
    }

    #[test]
    fn test_pool_order() {
        let mut pool = TriplePool::new((0..4).map(triple).collect());

        assert_eq!(pool.take().unwrap(), triple(0));
        assert_eq!(pool.take_many(2).unwrap(), vec![triple(1), triple(2)]);
        assert_eq!(pool.consumed(), 3);
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn test_pool_exhausted() {
        let mut pool = TriplePool::new((0..2).map(triple).collect());

        assert!(matches!(
            pool.take_many(3),
            Err(ArithError::PoolExhausted {
                provisioned: 2,
                consumed: 0
            })
        ));

        pool.take_many(2).unwrap();
        assert!(matches!(
            pool.take(),
            Err(ArithError::PoolExhausted {
                provisioned: 2,
                consumed: 2
            })
        ));

        pool.extend([triple(5)]);
        assert_eq!(pool.take().unwrap(), triple(5));
    }
}
