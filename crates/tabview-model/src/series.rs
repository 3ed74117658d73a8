//! A single column of values aligned to a sorted key axis.

use serde::{Deserialize, Serialize};

use crate::arith::ArithOp;
use crate::error::{ModelError, Result};
use crate::key::{Key, union_keys};

/// Values indexed by a sorted set of unique keys. `None` is the null sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesRepr", into = "SeriesRepr")]
pub struct Series {
    keys: Vec<Key>,
    values: Vec<Option<f64>>,
}

#[derive(Serialize, Deserialize)]
struct SeriesRepr {
    index: Vec<Key>,
    values: Vec<Option<f64>>,
}

impl TryFrom<SeriesRepr> for Series {
    type Error = ModelError;

    fn try_from(repr: SeriesRepr) -> Result<Self> {
        Self::new(repr.index, repr.values)
    }
}

impl From<Series> for SeriesRepr {
    fn from(series: Series) -> Self {
        Self {
            index: series.keys,
            values: series.values,
        }
    }
}

impl Series {
    /// Builds a series from parallel key and value vectors.
    ///
    /// Keys need not be sorted; pairs are reordered by key. Duplicate keys are
    /// rejected.
    pub fn new(keys: Vec<Key>, values: Vec<Option<f64>>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(ModelError::LengthMismatch {
                context: "series values".to_string(),
                expected: keys.len(),
                found: values.len(),
            });
        }
        Self::from_pairs(keys.into_iter().zip(values))
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        K: Into<Key>,
        V: Into<Option<f64>>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut pairs: Vec<(Key, Option<f64>)> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(window) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ModelError::DuplicateKey {
                key: window[0].0.clone(),
            });
        }
        let (keys, values) = pairs.into_iter().unzip();
        Ok(Self { keys, values })
    }

    /// An all-null series over `keys`, which must already be sorted and unique.
    pub fn nulls(keys: &[Key]) -> Self {
        Self {
            keys: keys.to_vec(),
            values: vec![None; keys.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, Option<f64>)> {
        self.keys.iter().zip(self.values.iter().copied())
    }

    /// Value at `key`; `None` both for a missing key and for a null cell.
    pub fn get(&self, key: &Key) -> Option<f64> {
        self.position(key).and_then(|idx| self.values[idx])
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.position(key).is_some()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_none()).count()
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.keys.binary_search(key).ok()
    }

    /// Projects this series onto `keys` (sorted, unique), null-filling keys it
    /// does not cover.
    pub fn reindex(&self, keys: &[Key]) -> Self {
        if keys == self.keys.as_slice() {
            return self.clone();
        }
        let values = keys
            .iter()
            .map(|key| self.position(key).and_then(|idx| self.values[idx]))
            .collect();
        Self {
            keys: keys.to_vec(),
            values,
        }
    }

    /// Element-wise arithmetic over the union of both axes.
    ///
    /// A result cell is defined only where both operands hold a value.
    pub fn combine(&self, other: &Self, op: ArithOp) -> Self {
        let keys = union_keys(&self.keys, &other.keys);
        let left = self.reindex(&keys);
        let right = other.reindex(&keys);
        let values = left
            .values
            .iter()
            .zip(&right.values)
            .map(|(l, r)| match (l, r) {
                (Some(l), Some(r)) => Some(op.apply(*l, *r)),
                _ => None,
            })
            .collect();
        Self { keys, values }
    }

    pub fn plus(&self, other: &Self) -> Self {
        self.combine(other, ArithOp::Add)
    }

    pub fn minus(&self, other: &Self) -> Self {
        self.combine(other, ArithOp::Subtract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(pairs: &[(i64, f64)]) -> Series {
        Series::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn from_pairs_sorts_by_key() {
        let series = ints(&[(3, 30.0), (1, 10.0), (2, 20.0)]);
        assert_eq!(series.keys(), &[Key::Int(1), Key::Int(2), Key::Int(3)]);
        assert_eq!(series.values(), &[Some(10.0), Some(20.0), Some(30.0)]);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = Series::from_pairs([(1, 1.0), (1, 2.0)]).unwrap_err();
        assert_eq!(err, ModelError::DuplicateKey { key: Key::Int(1) });
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Series::new(vec![Key::Int(1)], vec![]).unwrap_err();
        assert!(matches!(err, ModelError::LengthMismatch { expected: 1, found: 0, .. }));
    }

    #[test]
    fn reindex_fills_nulls() {
        let series = ints(&[(1, 1.0), (3, 3.0)]);
        let keys = vec![Key::Int(1), Key::Int(2), Key::Int(3)];
        let reindexed = series.reindex(&keys);
        assert_eq!(reindexed.values(), &[Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn plus_aligns_on_union() {
        let a = ints(&[(1, 1.0), (2, 2.0)]);
        let b = ints(&[(2, 10.0), (3, 30.0)]);
        let sum = a.plus(&b);
        assert_eq!(sum.keys(), &[Key::Int(1), Key::Int(2), Key::Int(3)]);
        assert_eq!(sum.values(), &[None, Some(12.0), None]);
        assert_eq!(a.minus(&b).get(&Key::Int(2)), Some(-8.0));
    }

    #[test]
    fn null_operand_yields_null() {
        let a = Series::from_pairs([(1, None), (2, Some(2.0))]).unwrap();
        let b = ints(&[(1, 1.0), (2, 1.0)]);
        assert_eq!(a.plus(&b).values(), &[None, Some(3.0)]);
        assert_eq!(a.null_count(), 1);
    }
}
