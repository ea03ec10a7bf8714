//! The data model: labeled points and dataset records

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2-D coordinate with a class label.
///
/// For a query point the label holds the verdict of the most recent k
/// evaluated against it; it never takes part in distance computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub label: String,
}

impl Point {
    /// Creates a labeled point.
    pub fn new(x: f64, y: f64, label: impl Into<String>) -> Point {
        Point { x, y, label: label.into() }
    }

    /// Creates a point with an empty label, as a query starts out.
    pub fn unlabeled(x: f64, y: f64) -> Point {
        Point { x, y, label: String::new() }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x = {:.6}, y = {:.6}, label = {}", self.x, self.y, self.label)
    }
}

/// One row of the reference dataset.
///
/// `distance` is scratch space: it is overwritten every time the record is
/// ranked and means nothing outside the classification call that set it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub point: Point,
    #[serde(default)]
    pub distance: f64,
    pub region: String,
    pub subregion: String,
    pub risk_group: String,
}

impl Record {
    pub fn new(
        point: Point,
        region: impl Into<String>,
        subregion: impl Into<String>,
        risk_group: impl Into<String>,
    ) -> Record {
        Record {
            point,
            distance: 0.0,
            region: region.into(),
            subregion: subregion.into(),
            risk_group: risk_group.into(),
        }
    }

    /// The record's class label.
    pub fn label(&self) -> &str {
        &self.point.label
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x = {:.6} y = {:.6}, distance = {:.6} label = {}, \
             region = {}, subregion = {}, risk_group = {}",
            self.point.x,
            self.point.y,
            self.distance,
            self.point.label,
            self.region,
            self.subregion,
            self.risk_group,
        )
    }
}
