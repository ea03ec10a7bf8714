//! # knnapi - k-nearest-neighbors classification over HTTP
//!
//! knnapi classifies a 2-D query point against a labeled reference dataset by
//! majority vote among its k nearest records (brute-force Euclidean scan).
//! Several values of k can be evaluated in one go; each vote overwrites the
//! query point's label before the next k runs.
//!
//! ## Example
//!
//! ```
//! use knnapi::{Classifier, Point, Record};
//!
//! let mut classifier = Classifier::new(vec![
//!     Record::new(Point::new(0.0, 0.0, "A"), "north", "n1", "low"),
//!     Record::new(Point::new(1.0, 0.0, "A"), "north", "n2", "low"),
//!     Record::new(Point::new(5.0, 5.0, "B"), "south", "s1", "high"),
//!     Record::new(Point::new(6.0, 6.0, "B"), "south", "s2", "high"),
//! ]);
//!
//! let result = classifier
//!     .classify_sequence(&[1, 3], Point::unlabeled(0.0, 1.0))
//!     .unwrap();
//! assert_eq!(result.labels(), vec!["A", "A"]);
//! assert_eq!(result.point.label, "A");
//! ```

pub mod classifier;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod point;
mod rank;
pub mod server;
pub mod tally;

// Re-export the core types as the primary public API
pub use classifier::{Classification, Classifier, Verdict};
pub use dataset::DatasetSource;
pub use error::{Error, Result};
pub use point::{Point, Record};
pub use tally::{LabelCount, Tally};
