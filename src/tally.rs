//! Label vote counting over the nearest neighbors

use crate::point::Record;
use serde::{Deserialize, Serialize};

/// Number of votes one label received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Vote tally for one classification.
///
/// Entries appear in the order their label was first met while scanning the
/// neighbors closest-first, which is also the tie-break order for
/// [`Tally::majority`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<LabelCount>,
}

impl Tally {
    /// Creates an empty tally.
    pub fn new() -> Tally {
        Tally { counts: Vec::new() }
    }

    /// Counts the labels of `neighbors`, which must already be in ranked order.
    ///
    /// # Examples
    ///
    /// ```
    /// use knnapi::{Point, Record, Tally};
    ///
    /// let neighbors = vec![
    ///     Record::new(Point::new(0.0, 0.0, "A"), "", "", ""),
    ///     Record::new(Point::new(1.0, 0.0, "B"), "", "", ""),
    ///     Record::new(Point::new(2.0, 0.0, "B"), "", "", ""),
    /// ];
    ///
    /// let tally = Tally::from_neighbors(&neighbors);
    /// assert_eq!(tally.majority(), Some("B"));
    /// assert_eq!(tally.counts()[0].label, "A");
    /// ```
    pub fn from_neighbors(neighbors: &[Record]) -> Tally {
        let mut tally = Tally::new();
        for record in neighbors {
            tally.vote(record.label());
        }
        tally
    }

    /// Adds one vote for `label`, opening a new entry on first sight.
    pub fn vote(&mut self, label: &str) {
        match self.counts.iter_mut().find(|c| c.label == label) {
            Some(entry) => entry.count += 1,
            None => self.counts.push(LabelCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }

    /// The label with the most votes.
    ///
    /// The running maximum only moves on a strict increase, so among labels
    /// with equal counts the one met first wins. `None` for an empty tally.
    pub fn majority(&self) -> Option<&str> {
        let mut max = 0;
        let mut winner = None;

        for entry in &self.counts {
            if entry.count > max {
                max = entry.count;
                winner = Some(entry.label.as_str());
            }
        }

        winner
    }

    pub fn counts(&self) -> &[LabelCount] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<LabelCount> {
        self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
