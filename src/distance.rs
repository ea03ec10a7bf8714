//! This is the distance module
//! Provide the Euclidean distance between two points

use crate::error::{Error, Result};
use crate::point::Point;

/// Euclidean distance
/// dist = sqrt((b.x - a.x)^2 + (b.y - a.y)^2)
/// A negative result can only come from a broken computation and is reported
/// as `Error::NegativeDistance` instead of being used for ranking.
pub fn euclidean(a: &Point, b: &Point) -> Result<f64> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < 0.0 {
        return Err(Error::NegativeDistance { distance });
    }

    Ok(distance)
}
