//! Per-iteration records and the campaign result mapping.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Direction, Point};

/// What one iteration queried and observed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IterationRecord {
    /// The points sent to the oracle, in selection order.
    pub query_points: Vec<Point>,
    /// The oracle's answer for each query point.
    pub oracle_result: Vec<f64>,
}

/// The durable output of a campaign: iteration records keyed by the
/// stringified, 0-based iteration index, in iteration order.
///
/// With the `serde` feature this serializes as an object
/// `{"0": {"query_points": [...], "oracle_result": [...]}, "1": ...}`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignResult {
    records: Vec<IterationRecord>,
}

impl CampaignResult {
    /// An empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: IterationRecord) {
        self.records.push(record);
    }

    /// Number of recorded iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no iteration was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks a record up by its key (`"0"`, `"1"`, ...).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&IterationRecord> {
        // "01" or "+1" are not keys this mapping produces.
        let index: usize = key.parse().ok()?;
        (index.to_string() == key)
            .then(|| self.records.get(index))
            .flatten()
    }

    /// Looks a record up by iteration index.
    #[must_use]
    pub fn record(&self, iteration: usize) -> Option<&IterationRecord> {
        self.records.get(iteration)
    }

    /// Records in iteration order.
    #[must_use]
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.records.len()).map(|i| i.to_string())
    }

    /// `(key, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &IterationRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (i.to_string(), r))
    }

    /// The best oracle observation across all iterations under `direction`.
    ///
    /// Ties keep the earliest observation.
    #[must_use]
    pub fn best(&self, direction: Direction) -> Option<(&Point, f64)> {
        let mut best: Option<(&Point, f64)> = None;
        let observed = self
            .records
            .iter()
            .flat_map(|r| r.query_points.iter().zip(r.oracle_result.iter().copied()));
        for (x, y) in observed {
            match best {
                Some((_, incumbent)) if !direction.is_better(y, incumbent) => {}
                _ => best = Some((x, y)),
            }
        }
        best
    }

    /// Consumes the result, returning the records in iteration order.
    #[must_use]
    pub fn into_records(self) -> Vec<IterationRecord> {
        self.records
    }
}

#[cfg(feature = "serde")]
impl Serialize for CampaignResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (key, record) in self.iter() {
            map.serialize_entry(&key, record)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CampaignResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = std::collections::HashMap::<String, IterationRecord>::deserialize(deserializer)?;
        let mut keyed = Vec::with_capacity(raw.len());
        for (key, record) in raw {
            let index: usize = key
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid iteration key {key:?}")))?;
            keyed.push((index, record));
        }
        keyed.sort_by_key(|(index, _)| *index);
        if keyed.iter().enumerate().any(|(pos, (index, _))| pos != *index) {
            return Err(D::Error::custom("iteration keys must be contiguous from 0"));
        }
        Ok(Self {
            records: keyed.into_iter().map(|(_, r)| r).collect(),
        })
    }
}
