use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};

use crate::provider::{Location, PositionProvider};
use crate::track::{compute_track_with, Track, TrackConfig, TrackError};

const DEFAULT_CAPACITY: usize = 32;

/// Cache key compared by value: floats are keyed on their bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackKey {
    center: DateTime<Utc>,
    latitude_bits: u64,
    longitude_bits: u64,
    interval_bits: u64,
    window_bits: u64,
}

impl TrackKey {
    pub fn new(center: DateTime<Utc>, location: Location, config: &TrackConfig) -> Self {
        Self {
            center,
            latitude_bits: float_key(location.latitude_deg),
            longitude_bits: float_key(location.longitude_deg),
            interval_bits: float_key(config.interval_minutes),
            window_bits: float_key(config.window_hours_each_side),
        }
    }
}

fn float_key(value: f64) -> u64 {
    // -0.0 == 0.0 must hash the same.
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Memoizes tracks for one provider and remembers the last good one.
///
/// A failed [`TrackCache::refresh`] leaves [`TrackCache::current`] pointing at
/// the previous successful track so a display can keep showing it.
pub struct TrackCache<P> {
    provider: P,
    capacity: usize,
    entries: HashMap<TrackKey, Track>,
    order: VecDeque<TrackKey>,
    current: Option<TrackKey>,
}

impl<P: PositionProvider> TrackCache<P> {
    pub fn new(provider: P) -> Self {
        Self::with_capacity(provider, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(provider: P, capacity: usize) -> Self {
        Self {
            provider,
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            current: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the memoized track for these inputs, computing it on a miss.
    pub fn get_or_compute(
        &mut self,
        center: DateTime<Utc>,
        location: Location,
        config: &TrackConfig,
    ) -> Result<&Track, TrackError> {
        let key = TrackKey::new(center, location, config);
        if self.entries.contains_key(&key) {
            log::trace!("track cache hit for {}", center);
        } else {
            let track = compute_track_with(&self.provider, center, location, config)?;
            self.insert(key, track);
        }
        Ok(&self.entries[&key])
    }

    /// Like [`get_or_compute`](Self::get_or_compute), and on success makes the
    /// result the current track.
    pub fn refresh(
        &mut self,
        center: DateTime<Utc>,
        location: Location,
        config: &TrackConfig,
    ) -> Result<&Track, TrackError> {
        let key = TrackKey::new(center, location, config);
        if let Err(e) = self.get_or_compute(center, location, config) {
            log::warn!("keeping previous track, refresh failed: {}", e);
            return Err(e);
        }
        self.current = Some(key);
        Ok(&self.entries[&key])
    }

    /// The last track produced by a successful [`refresh`](Self::refresh).
    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|key| self.entries.get(&key))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.current = None;
    }

    fn insert(&mut self, key: TrackKey, track: Track) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order_pop_evictable() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.entries.insert(key, track);
        self.order.push_back(key);
    }

    // The current track is never evicted.
    fn order_pop_evictable(&mut self) -> Option<TrackKey> {
        let idx = self
            .order
            .iter()
            .position(|k| Some(*k) != self.current)?;
        self.order.remove(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Position, ProviderError};
    use chrono::{Duration, TimeZone};
    use std::cell::Cell;

    fn center() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 24, 22, 0, 0).unwrap()
    }

    fn small() -> TrackConfig {
        TrackConfig {
            interval_minutes: 30.0,
            window_hours_each_side: 1.0,
        }
    }

    struct Counting {
        calls: Cell<usize>,
        fail: Cell<bool>,
    }

    impl PositionProvider for Counting {
        fn position_at(
            &self,
            timestamp: DateTime<Utc>,
            _location: &Location,
        ) -> Result<Position, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail.get() {
                return Err(ProviderError::Propagation("offline".into()));
            }
            let minutes = (timestamp - center()).num_minutes() as f64;
            Ok(Position {
                altitude_deg: 30.0 - minutes.abs() / 4.0,
                azimuth_deg: 180.0,
                distance_km: 1000.0,
                parallactic_angle_rad: 0.0,
            })
        }
    }

    fn cache(capacity: usize) -> TrackCache<Counting> {
        TrackCache::with_capacity(
            Counting {
                calls: Cell::new(0),
                fail: Cell::new(false),
            },
            capacity,
        )
    }

    #[test]
    fn equal_inputs_hit_the_cache() {
        let mut cache = cache(4);
        let location = Location::new(51.5, -0.1);

        let first = cache.get_or_compute(center(), location, &small()).unwrap().clone();
        assert_eq!(cache.provider().calls.get(), 5);

        let again = cache.get_or_compute(center(), location, &small()).unwrap();
        assert_eq!(*again, first);
        assert_eq!(cache.provider().calls.get(), 5);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let config = small();
        assert_eq!(
            TrackKey::new(center(), Location::new(0.0, -0.0), &config),
            TrackKey::new(center(), Location::new(-0.0, 0.0), &config)
        );
        assert_ne!(
            TrackKey::new(center(), Location::new(0.0, 1.0), &config),
            TrackKey::new(center(), Location::new(0.0, 1.0 + f64::EPSILON), &config)
        );
    }

    #[test]
    fn failed_refresh_keeps_previous_track() {
        let mut cache = cache(4);
        let location = Location::new(10.0, 10.0);
        let good = cache.refresh(center(), location, &small()).unwrap().clone();

        cache.provider().fail.set(true);
        let later = center() + Duration::hours(1);
        let err = cache.refresh(later, location, &small()).unwrap_err();
        assert!(matches!(err, TrackError::PositionComputationFailed { .. }));
        assert_eq!(cache.current(), Some(&good));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalid_config_is_not_cached() {
        let mut cache = cache(4);
        let bad = TrackConfig {
            interval_minutes: 0.0,
            window_hours_each_side: 1.0,
        };
        let err = cache
            .refresh(center(), Location::new(0.0, 0.0), &bad)
            .unwrap_err();
        assert!(matches!(err, TrackError::InvalidConfiguration(_)));
        assert!(cache.is_empty());
        assert!(cache.current().is_none());
    }

    #[test]
    fn evicts_oldest_but_not_current() {
        let mut cache = cache(2);
        let location = Location::new(0.0, 0.0);
        let t = |h: i64| center() + Duration::hours(h);

        cache.refresh(t(0), location, &small()).unwrap();
        cache.get_or_compute(t(1), location, &small()).unwrap();
        cache.get_or_compute(t(2), location, &small()).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.current().is_some());

        let calls = cache.provider().calls.get();
        cache.get_or_compute(t(0), location, &small()).unwrap();
        assert_eq!(cache.provider().calls.get(), calls);
        cache.get_or_compute(t(1), location, &small()).unwrap();
        assert!(cache.provider().calls.get() > calls);
    }
}
