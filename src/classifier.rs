//! The classifier module
//! Runs k-nearest-neighbors votes over one dataset snapshot

use crate::error::Result;
use crate::point::{Point, Record};
use crate::rank::rank;
use crate::tally::{LabelCount, Tally};
use serde::Serialize;
use tracing::debug;

/// Outcome of classifying a query point for one k.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// The k nearest records voted. `label` is `None` only when k is 0.
    Classified {
        k: usize,
        label: Option<String>,
        tally: Vec<LabelCount>,
    },
    /// k exceeded the dataset size; the query point was left untouched.
    Skipped { k: usize, dataset_size: usize },
}

impl Verdict {
    pub fn k(&self) -> usize {
        match self {
            Verdict::Classified { k, .. } | Verdict::Skipped { k, .. } => *k,
        }
    }

    /// The majority label, if a vote took place and produced one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Verdict::Classified { label, .. } => label.as_deref(),
            Verdict::Skipped { .. } => None,
        }
    }

    /// The vote tally; empty for a skipped k.
    pub fn tally(&self) -> &[LabelCount] {
        match self {
            Verdict::Classified { tally, .. } => tally.as_slice(),
            Verdict::Skipped { .. } => &[],
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Verdict::Skipped { .. })
    }
}

/// Result of running a whole k-sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// The query point carrying the label of the last classified k.
    pub point: Point,
    /// The dataset as it stood after the first k of the sequence.
    pub ranked: Vec<Record>,
    /// One verdict per requested k, in request order.
    pub verdicts: Vec<Verdict>,
}

impl Classification {
    /// Majority labels of the classified ks, in order. A k of 0 contributes
    /// an empty string.
    pub fn labels(&self) -> Vec<String> {
        self.verdicts
            .iter()
            .filter(|v| !v.is_skipped())
            .map(|v| v.label().unwrap_or_default().to_string())
            .collect()
    }
}

/// A brute-force KNN classifier over a dataset snapshot.
///
/// The classifier owns its records because ranking reorders them and
/// rewrites their `distance` fields. Build one per request from a freshly
/// loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    records: Vec<Record>,
}

impl Classifier {
    /// Creates a classifier over `records`, kept in the given order until
    /// the first ranking.
    pub fn new(records: Vec<Record>) -> Classifier {
        Classifier { records }
    }

    /// Classifies `query` by majority vote among its `k` nearest records.
    ///
    /// Distances are recomputed from the query coordinates on every call. On
    /// success `query.label` is overwritten with the majority label (empty for
    /// `k == 0`).
    ///
    /// # Arguments
    ///
    /// * `k` - Number of neighbors that vote
    /// * `query` - Point to classify; only its label is written
    ///
    /// # Returns
    ///
    /// * `Ok(Verdict::Classified)` - The vote ran
    /// * `Ok(Verdict::Skipped)` - `k` exceeds the dataset size; nothing was touched
    /// * `Err(Error::NegativeDistance)` - Ranking hit a distance fault
    ///
    /// # Examples
    ///
    /// ```
    /// use knnapi::{Classifier, Point, Record};
    ///
    /// let mut classifier = Classifier::new(vec![
    ///     Record::new(Point::new(0.0, 0.0, "A"), "", "", ""),
    ///     Record::new(Point::new(5.0, 5.0, "B"), "", "", ""),
    /// ]);
    ///
    /// let mut query = Point::unlabeled(0.5, 0.5);
    /// let verdict = classifier.classify(1, &mut query).unwrap();
    /// assert_eq!(verdict.label(), Some("A"));
    /// assert_eq!(query.label, "A");
    ///
    /// // More neighbors than records leaves the point alone
    /// let verdict = classifier.classify(3, &mut query).unwrap();
    /// assert!(verdict.is_skipped());
    /// assert_eq!(query.label, "A");
    /// ```
    pub fn classify(&mut self, k: usize, query: &mut Point) -> Result<Verdict> {
        let dataset_size = self.records.len();
        if k > dataset_size {
            debug!(k, dataset_size, "k exceeds dataset size, skipping");
            return Ok(Verdict::Skipped { k, dataset_size });
        }

        rank(&mut self.records, query)?;

        let tally = Tally::from_neighbors(&self.records[..k]);
        let label = tally.majority().map(str::to_string);
        debug!(k, tally = ?tally.counts(), "tallied nearest neighbors");

        query.label = label.clone().unwrap_or_default();

        Ok(Verdict::Classified {
            k,
            label,
            tally: tally.into_counts(),
        })
    }

    /// Classifies `query` once per k, in the given order.
    ///
    /// The label written by each k carries over to the next; coordinates
    /// never change. The returned `ranked` snapshot is the dataset right after
    /// the first k, empty when `ks` is empty. Any fault aborts the whole
    /// sequence.
    pub fn classify_sequence(&mut self, ks: &[usize], query: Point) -> Result<Classification> {
        let mut point = query;
        let mut ranked = Vec::new();
        let mut verdicts = Vec::with_capacity(ks.len());

        for (i, &k) in ks.iter().enumerate() {
            let verdict = self.classify(k, &mut point)?;
            if i == 0 {
                for record in &self.records {
                    debug!(%record, "ranked record");
                }
                ranked = self.records.clone();
            }
            debug!(k, point = %point, "dominant label so far");
            verdicts.push(verdict);
        }

        Ok(Classification {
            point,
            ranked,
            verdicts,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}
