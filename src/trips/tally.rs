// src/trips/tally.rs
use std::collections::HashMap;

use super::hour::HOURS_PER_DAY;

/// Trip counts for one hour of the day, indexed 0..24.
pub type HourlyCounts = [u64; HOURS_PER_DAY];

/// Running trip tallies for one ingestion pass.
///
/// Holds the per-zone totals and the per-zone hourly profile side by side.
/// Both maps are only ever touched through [`TripTally::record`] and
/// [`TripTally::merge`], so a zone is present in one exactly when it is
/// present in the other, and the grand totals of both always agree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TripTally {
    zone_totals: HashMap<String, u64>,
    zone_hours: HashMap<String, HourlyCounts>,
}

impl TripTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one accepted trip picked up in `zone` during `hour`.
    ///
    /// Inputs are assumed valid, as produced by the ingest loop.
    ///
    /// # Panics
    ///
    /// Panics if `hour` is 24 or more.
    pub fn record(&mut self, zone: &str, hour: u8) {
        let hour = usize::from(hour);
        assert!(hour < HOURS_PER_DAY, "hour {} out of range", hour);

        // look up first so a repeat zone never allocates a key
        match self.zone_totals.get_mut(zone) {
            Some(total) => *total += 1,
            None => {
                self.zone_totals.insert(zone.to_owned(), 1);
            }
        }
        match self.zone_hours.get_mut(zone) {
            Some(hours) => hours[hour] += 1,
            None => {
                let mut hours = [0; HOURS_PER_DAY];
                hours[hour] = 1;
                self.zone_hours.insert(zone.to_owned(), hours);
            }
        }
    }

    /// Fold another pass's tallies into this one (pairwise sum).
    pub fn merge(&mut self, other: TripTally) {
        for (zone, total) in other.zone_totals {
            *self.zone_totals.entry(zone).or_insert(0) += total;
        }
        for (zone, hours) in other.zone_hours {
            let mine = self.zone_hours.entry(zone).or_insert([0; HOURS_PER_DAY]);
            for (m, h) in mine.iter_mut().zip(hours) {
                *m += h;
            }
        }
    }

    /// Drop all counts, keeping allocated capacity for the next pass.
    pub fn clear(&mut self) {
        self.zone_totals.clear();
        self.zone_hours.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.zone_totals.is_empty()
    }

    /// Number of distinct zones seen.
    pub fn zone_count(&self) -> usize {
        self.zone_totals.len()
    }

    /// Number of trips recorded across all zones.
    pub fn total_trips(&self) -> u64 {
        self.zone_totals.values().sum()
    }

    pub fn zone_total(&self, zone: &str) -> u64 {
        self.zone_totals.get(zone).copied().unwrap_or(0)
    }

    pub fn zone_hours(&self, zone: &str) -> Option<&HourlyCounts> {
        self.zone_hours.get(zone)
    }

    /// Unordered view of the per-zone totals.
    pub fn totals(&self) -> impl Iterator<Item = (&str, u64)> {
        self.zone_totals.iter().map(|(z, c)| (z.as_str(), *c))
    }

    /// Unordered view of the per-zone hourly profiles.
    pub fn hourly(&self) -> impl Iterator<Item = (&str, &HourlyCounts)> {
        self.zone_hours.iter().map(|(z, h)| (z.as_str(), h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::AssertUnwindSafe;

    fn hourly_sum(t: &TripTally) -> u64 {
        t.hourly().flat_map(|(_, h)| h.iter()).sum()
    }

    #[test]
    fn test_record_updates_both_tallies() {
        let mut t = TripTally::new();
        t.record("ZoneA", 8);
        t.record("ZoneA", 8);
        t.record("ZoneB", 23);

        assert_eq!(t.zone_count(), 2);
        assert_eq!(t.zone_total("ZoneA"), 2);
        assert_eq!(t.zone_total("ZoneB"), 1);
        assert_eq!(t.zone_total("ZoneC"), 0);

        let a = t.zone_hours("ZoneA").expect("ZoneA profile");
        assert_eq!(a[8], 2);
        assert_eq!(a.iter().sum::<u64>(), 2);
        assert_eq!(t.zone_hours("ZoneB").expect("ZoneB profile")[23], 1);
        assert_eq!(t.total_trips(), hourly_sum(&t));
    }

    #[test]
    fn test_zone_keys_are_not_normalised() {
        let mut t = TripTally::new();
        t.record("zonea", 1);
        t.record("ZoneA", 1);
        assert_eq!(t.zone_count(), 2);
    }

    #[test]
    fn test_merge_is_pairwise_sum() {
        let mut a = TripTally::new();
        a.record("ZoneA", 8);
        a.record("ZoneB", 9);

        let mut b = TripTally::new();
        b.record("ZoneA", 8);
        b.record("ZoneA", 10);
        b.record("ZoneC", 0);

        let mut sequential = TripTally::new();
        for (z, h) in [("ZoneA", 8), ("ZoneB", 9), ("ZoneA", 8), ("ZoneA", 10), ("ZoneC", 0)] {
            sequential.record(z, h);
        }

        a.merge(b);
        assert_eq!(a, sequential);
        assert_eq!(a.zone_total("ZoneA"), 3);
        assert_eq!(a.zone_hours("ZoneA").expect("ZoneA profile")[8], 2);
        assert_eq!(a.total_trips(), hourly_sum(&a));
    }

    #[test]
    #[should_panic(expected = "hour 24 out of range")]
    fn test_record_rejects_hour_24() {
        let mut t = TripTally::new();
        t.record("ZoneA", 24);
    }

    #[test]
    fn test_rejected_hour_leaves_tally_untouched() {
        let mut t = TripTally::new();
        t.record("ZoneA", 23);
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| t.record("ZoneB", 99)));
        assert!(result.is_err());
        assert_eq!(t.zone_count(), 1);
        assert!(t.zone_hours("ZoneB").is_none());
        assert_eq!(t.total_trips(), hourly_sum(&t));
    }

    #[test]
    fn test_clear() {
        let mut t = TripTally::new();
        t.record("ZoneA", 3);
        t.clear();
        assert!(t.is_empty());
        assert!(t.zone_hours("ZoneA").is_none());
        assert_eq!(t.total_trips(), 0);
    }
}
