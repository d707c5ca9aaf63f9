// src/trips/rank.rs
use serde::Serialize;
use std::cmp::Ordering;

use super::tally::TripTally;

/// A zone and its trip count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneCount {
    pub zone: String,
    pub count: u64,
}

/// A (zone, hour-of-day) slot and its trip count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotCount {
    pub zone: String,
    pub hour: u8,
    pub count: u64,
}

fn by_count_then_zone(a: &ZoneCount, b: &ZoneCount) -> Ordering {
    b.count.cmp(&a.count).then_with(|| a.zone.cmp(&b.zone))
}

fn by_count_then_zone_then_hour(a: &SlotCount, b: &SlotCount) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.zone.cmp(&b.zone))
        .then_with(|| a.hour.cmp(&b.hour))
}

/// The `k` busiest zones: count descending, then zone name ascending.
///
/// Returns fewer than `k` entries when fewer zones exist.
pub fn top_zones(tally: &TripTally, k: usize) -> Vec<ZoneCount> {
    let mut v: Vec<ZoneCount> = tally
        .totals()
        .map(|(zone, count)| ZoneCount {
            zone: zone.to_owned(),
            count,
        })
        .collect();

    // zone names are unique keys, so this order is total and the unstable sort is deterministic
    v.sort_unstable_by(by_count_then_zone);
    v.truncate(k);
    v
}

/// The `k` busiest (zone, hour) slots: count descending, then zone
/// ascending, then hour ascending. Hours with no trips are never listed.
pub fn top_slots(tally: &TripTally, k: usize) -> Vec<SlotCount> {
    let mut v: Vec<SlotCount> = Vec::with_capacity(tally.zone_count() * 4);
    for (zone, hours) in tally.hourly() {
        for (hour, &count) in hours.iter().enumerate() {
            if count > 0 {
                v.push(SlotCount {
                    zone: zone.to_owned(),
                    hour: hour as u8,
                    count,
                });
            }
        }
    }

    v.sort_unstable_by(by_count_then_zone_then_hour);
    v.truncate(k);
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zc(zone: &str, count: u64) -> ZoneCount {
        ZoneCount {
            zone: zone.into(),
            count,
        }
    }

    fn sc(zone: &str, hour: u8, count: u64) -> SlotCount {
        SlotCount {
            zone: zone.into(),
            hour,
            count,
        }
    }

    fn tally_of(rows: &[(&str, u8)]) -> TripTally {
        let mut t = TripTally::new();
        for &(z, h) in rows {
            t.record(z, h);
        }
        t
    }

    #[test]
    fn test_example_rankings() {
        let t = tally_of(&[("ZoneA", 8), ("ZoneA", 8), ("ZoneB", 23)]);
        assert_eq!(top_zones(&t, 10), vec![zc("ZoneA", 2), zc("ZoneB", 1)]);
        assert_eq!(top_slots(&t, 10), vec![sc("ZoneA", 8, 2), sc("ZoneB", 23, 1)]);
    }

    #[test]
    fn test_zone_ties_break_by_name() {
        let t = tally_of(&[("Zeta", 1), ("Alpha", 2), ("Mid", 3), ("Big", 4), ("Big", 4)]);
        assert_eq!(
            top_zones(&t, 10),
            vec![zc("Big", 2), zc("Alpha", 1), zc("Mid", 1), zc("Zeta", 1)]
        );
    }

    #[test]
    fn test_slot_ties_break_by_zone_then_hour() {
        let t = tally_of(&[("B", 5), ("A", 9), ("A", 2), ("B", 1), ("A", 9)]);
        assert_eq!(
            top_slots(&t, 10),
            vec![sc("A", 9, 2), sc("A", 2, 1), sc("B", 1, 1), sc("B", 5, 1)]
        );
    }

    #[test]
    fn test_k_limits() {
        let t = tally_of(&[("A", 1), ("B", 1), ("C", 1)]);
        assert!(top_zones(&t, 0).is_empty());
        assert!(top_slots(&t, 0).is_empty());
        assert_eq!(top_zones(&t, 2).len(), 2);
        assert_eq!(top_zones(&t, 100).len(), 3);
        assert_eq!(top_slots(&t, 100).len(), 3);
    }

    #[test]
    fn test_empty_tally() {
        let t = TripTally::new();
        assert!(top_zones(&t, 10).is_empty());
        assert!(top_slots(&t, 10).is_empty());
    }

    #[test]
    fn test_zero_hours_are_omitted() {
        let t = tally_of(&[("A", 0), ("A", 23)]);
        let slots = top_slots(&t, 24);
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| s.count > 0));
    }

    #[test]
    fn test_order_is_independent_of_insertion() {
        let rows = [("C", 3), ("A", 3), ("B", 7), ("A", 3), ("C", 1), ("B", 7)];
        let forward = tally_of(&rows);
        let mut reversed_rows = rows;
        reversed_rows.reverse();
        let backward = tally_of(&reversed_rows);

        assert_eq!(top_zones(&forward, 10), top_zones(&backward, 10));
        assert_eq!(top_slots(&forward, 10), top_slots(&backward, 10));
    }
}
