//! Distance ranking of dataset records against a query point

use crate::distance::euclidean;
use crate::error::Result;
use crate::point::{Point, Record};

/// Recomputes every record's distance to `query` and sorts the records
/// ascending by that distance.
///
/// The sort is stable, so records at equal distance keep their relative order.
/// On a distance fault the ranking is abandoned and the slice is left unsorted.
pub(crate) fn rank(records: &mut [Record], query: &Point) -> Result<()> {
    for record in records.iter_mut() {
        record.distance = euclidean(&record.point, query)?;
    }

    records.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    Ok(())
}

#[cfg(test)]
mod rank_test {
    use super::*;

    fn record(x: f64, y: f64, label: &str) -> Record {
        Record::new(Point::new(x, y, label), "", "", "")
    }

    #[test]
    fn test_rank_orders_ascending() {
        let mut records = vec![
            record(5.0, 5.0, "far"),
            record(0.0, 0.0, "near"),
            record(2.0, 0.0, "mid"),
        ];

        rank(&mut records, &Point::unlabeled(0.0, 0.0)).unwrap();

        let labels: Vec<&str> = records.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["near", "mid", "far"]);
        assert_eq!(records[0].distance, 0.0);
        assert!((records[1].distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_keeps_dataset_order_on_ties() {
        // All four sit on the unit circle around the origin
        let mut records = vec![
            record(1.0, 0.0, "first"),
            record(0.0, 1.0, "second"),
            record(-1.0, 0.0, "third"),
            record(0.0, -1.0, "fourth"),
        ];

        rank(&mut records, &Point::unlabeled(0.0, 0.0)).unwrap();

        let labels: Vec<&str> = records.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_rank_overwrites_stale_distances() {
        let mut records = vec![record(3.0, 4.0, "A")];
        records[0].distance = 99.0;

        rank(&mut records, &Point::unlabeled(0.0, 0.0)).unwrap();
        assert!((records[0].distance - 5.0).abs() < 1e-12);

        rank(&mut records, &Point::unlabeled(3.0, 4.0)).unwrap();
        assert_eq!(records[0].distance, 0.0);
    }

    #[test]
    fn test_rank_empty_dataset() {
        let mut records: Vec<Record> = Vec::new();
        assert!(rank(&mut records, &Point::unlabeled(1.0, 1.0)).is_ok());
    }
}
