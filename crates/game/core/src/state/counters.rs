use crate::config::GameConfig;
use crate::state::LocationId;

/// One saturating 8-bit counter per location id.
///
/// Ids 1 through `MAX_LOCATIONS` are tracked; others read as zero and
/// ignore increments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationCounters {
    counts: [u8; GameConfig::MAX_LOCATIONS],
}

impl Default for LocationCounters {
    fn default() -> Self {
        Self {
            counts: [0; GameConfig::MAX_LOCATIONS],
        }
    }
}

impl LocationCounters {
    fn slot(location: LocationId) -> Option<usize> {
        usize::from(location).checked_sub(1)
    }

    pub fn get(&self, location: LocationId) -> u8 {
        Self::slot(location)
            .and_then(|slot| self.counts.get(slot))
            .copied()
            .unwrap_or(0)
    }

    /// Adds one, holding at 255.
    pub fn increment(&mut self, location: LocationId) {
        match Self::slot(location).and_then(|slot| self.counts.get_mut(slot)) {
            Some(count) => *count = count.saturating_add(1),
            None => tracing::warn!(location, "location id outside tracked range"),
        }
    }

    pub fn set(&mut self, location: LocationId, value: u8) {
        if let Some(count) = Self::slot(location).and_then(|slot| self.counts.get_mut(slot)) {
            *count = value;
        }
    }

    /// Number of locations with a non-zero count.
    pub fn nonzero(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_saturate_at_255() {
        let mut counters = LocationCounters::default();
        for _ in 0..260 {
            counters.increment(7);
        }
        assert_eq!(counters.get(7), 255);
        assert_eq!(counters.get(8), 0);
    }

    #[test]
    fn out_of_range_ids_read_zero() {
        let mut counters = LocationCounters::default();
        counters.increment(0);
        counters.increment(300);
        counters.set(0, 4);
        counters.set(257, 4);
        assert_eq!(counters.get(0), 0);
        assert_eq!(counters.get(300), 0);
        assert_eq!(counters.get(257), 0);
        assert_eq!(counters.nonzero(), 0);
    }

    #[test]
    fn highest_location_id_is_tracked() {
        let mut counters = LocationCounters::default();
        counters.increment(256);
        assert_eq!(counters.get(256), 1);
        counters.set(256, 9);
        assert_eq!(counters.get(256), 9);
        counters.increment(1);
        assert_eq!(counters.get(1), 1);
        assert_eq!(counters.nonzero(), 2);
    }
}
