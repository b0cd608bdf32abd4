//! Single-pass, multi-level Rabin-Karp chunker.
//!
//! Every level ("lane") runs its own rolling window over the same bytes,
//! with its own threshold. Lane 0 has the least restrictive threshold and
//! yields the finest chunks; the last lane yields the coarsest.
//!
//! A chunk of level `t` must not depend on content outside its enclosing
//! level `t + 1` chunk. So when a boundary at level `m` is found, lanes
//! below `m` restart: their windows are padded with zeros, exactly as the
//! stream start is, and their content counters drop to zero.
//!
//! Lanes restart no less often than the lanes above them, so their content
//! counters never exceed those of higher lanes. While a restarted lane still
//! holds fewer than `window_size` real bytes, every lane below it is in the
//! same state, and all of them would see exactly the same bytes since the
//! restart. Those lanes are not updated; the lowest updated lane (the
//! "required" lane) stands in for them, and its window is copied back into
//! them when a boundary ends the shortcut.

use tracing::{debug, trace};

use super::rabin_karp::{RabinKarp, RollingWindow, Threshold};
use crate::chunker::{Boundaries, BoundaryChunker};
use crate::config::ChunkConfig;
use crate::error::ChunkError;

#[derive(Debug, Clone)]
struct Lane {
    window: RollingWindow,
    threshold: Threshold,
    /// Real bytes seen since the lane last restarted. Padding is excluded.
    content_length: usize,
}

/// Partitions a stream into nested chunks, one level per threshold, in a
/// single pass.
///
/// Each reported [`Boundary`](crate::Boundary) carries the most restrictive
/// level that matched; it closes the chunks of that level and all below.
///
/// # Example
///
/// ```
/// use rabinchunk::{BoundaryChunker, ChunkConfig, MultiLevelChunker, Threshold};
///
/// let thresholds = [16, 64, 256]
///     .into_iter()
///     .map(Threshold::from_chunk_size)
///     .collect::<Result<Vec<_>, _>>()?;
/// let mut chunker = MultiLevelChunker::new(&ChunkConfig::default(), &thresholds)?;
///
/// let data: Vec<u8> = (0..10_000u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 24) as u8).collect();
/// for boundary in chunker.boundaries(&data, 48) {
///     assert!(boundary.level < 3);
/// }
/// # Ok::<(), rabinchunk::ChunkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MultiLevelChunker {
    engine: RabinKarp,
    lanes: Vec<Lane>,
    /// Lowest lane that is kept up to date. Always `0` or the last lane.
    required: usize,
}

impl MultiLevelChunker {
    /// Creates a chunker with one level per threshold.
    ///
    /// # Errors
    ///
    /// - [`ChunkError::InvalidConfig`] for a zero window or no thresholds
    /// - [`ChunkError::UnorderedThresholds`] if a threshold is larger than
    ///   the one before it
    pub fn new(config: &ChunkConfig, thresholds: &[Threshold]) -> Result<Self, ChunkError> {
        config.validate()?;
        if thresholds.is_empty() {
            return Err(ChunkError::InvalidConfig {
                message: "at least one threshold is required",
            });
        }
        for (index, pair) in thresholds.windows(2).enumerate() {
            if pair[1] > pair[0] {
                return Err(ChunkError::UnorderedThresholds {
                    level: index + 1,
                    previous: pair[0].value(),
                    current: pair[1].value(),
                });
            }
        }

        let engine = RabinKarp::from_config(config)?;
        let lanes = thresholds
            .iter()
            .map(|&threshold| Lane {
                window: engine.window(),
                threshold,
                content_length: 0,
            })
            .collect();

        debug!(
            window_size = config.window_size(),
            seed = config.seed(),
            thresholds = ?thresholds.iter().map(|t| t.value()).collect::<Vec<_>>(),
            "multi-level chunker ready"
        );

        Ok(Self {
            engine,
            lanes,
            required: 0,
        })
    }

    /// Creates a chunker from match probabilities, least restrictive first.
    pub fn with_probabilities(
        config: &ChunkConfig,
        probabilities: &[f64],
    ) -> Result<Self, ChunkError> {
        let thresholds = probabilities
            .iter()
            .map(|&p| Threshold::from_probability(p))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(config, &thresholds)
    }

    /// Lazily yields the boundaries in `content` with their levels.
    ///
    /// Same as [`BoundaryChunker::boundaries`]; `prepend` zero bytes are fed
    /// to every lane first and again to each lane that restarts.
    pub fn boundaries_with_levels<'a>(
        &'a mut self,
        content: &'a [u8],
        prepend: usize,
    ) -> Boundaries<'a, Self> {
        self.boundaries(content, prepend)
    }

    /// Returns the thresholds, least restrictive first.
    pub fn thresholds(&self) -> impl Iterator<Item = Threshold> + '_ {
        self.lanes.iter().map(|lane| lane.threshold)
    }

    /// Returns the window size.
    pub fn window_size(&self) -> usize {
        self.engine.window_size()
    }

    fn restart_below(&mut self, level: usize, padding: usize) {
        for lane in &mut self.lanes[..level] {
            self.engine.pad(&mut lane.window, padding);
            lane.content_length = 0;
        }

        // Lanes skipped by the shortcut take over the state they would have
        // reached.
        if level < self.required {
            let (skipped, rest) = self.lanes.split_at_mut(self.required);
            let source = &rest[0].window;
            for lane in &mut skipped[level..] {
                lane.window.clone_from(source);
            }
        }

        self.required = 0;
        trace!(level, padding, "lanes restarted");
    }
}

impl BoundaryChunker for MultiLevelChunker {
    fn levels(&self) -> usize {
        self.lanes.len()
    }

    fn prime(&mut self, padding: usize) {
        for lane in &mut self.lanes {
            self.engine.pad(&mut lane.window, padding);
        }
    }

    fn scan(&mut self, byte: u8, padding: usize) -> Option<usize> {
        let window_size = self.engine.window_size();

        let mut required = self.lanes.len() - 1;
        for (index, lane) in self.lanes.iter_mut().enumerate().skip(self.required).rev() {
            self.engine.update(&mut lane.window, byte);
            lane.content_length = lane.content_length.saturating_add(1);
            if lane.content_length < window_size {
                required = index;
            }
        }
        self.required = required;

        // Most positions match nothing, so start at the least restrictive
        // level and stop at the first miss that does not depend on padding.
        let mut matched = None;
        for (level, lane) in self.lanes.iter().enumerate() {
            let driver = &self.lanes[level.max(self.required)];
            if driver.window.is_full() && lane.threshold.matches(driver.window.value()) {
                matched = Some(level);
            } else if driver.content_length >= window_size {
                break;
            }
        }

        let level = matched?;
        trace!(level, required = self.required, "multi-level boundary");
        self.restart_below(level, padding);
        Some(level)
    }

    fn reset(&mut self) {
        for lane in &mut self.lanes {
            lane.window.clear();
            lane.content_length = 0;
        }
        self.required = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cdc::RabinKarpChunker;
    use crate::chunker::Boundary;
    use proptest::prelude::*;

    /// Updates every lane on every byte, with no shortcut.
    struct Reference {
        engine: RabinKarp,
        lanes: Vec<(RollingWindow, Threshold)>,
    }

    impl Reference {
        fn new(window_size: usize, seed: u32, thresholds: &[Threshold]) -> Self {
            let engine = RabinKarp::new(window_size, seed).unwrap();
            let lanes = thresholds.iter().map(|&t| (engine.window(), t)).collect();
            Self { engine, lanes }
        }

        fn boundaries(&mut self, content: &[u8], prepend: usize) -> Vec<Boundary> {
            for (window, _) in &mut self.lanes {
                self.engine.pad(window, prepend);
            }

            let mut out = Vec::new();
            for (i, &byte) in content.iter().enumerate() {
                for (window, _) in &mut self.lanes {
                    self.engine.update(window, byte);
                }
                let matched = self
                    .lanes
                    .iter()
                    .rposition(|(window, t)| window.is_full() && t.matches(window.value()));
                if let Some(level) = matched {
                    out.push(Boundary::new(i + 1, level));
                    for (window, _) in &mut self.lanes[..level] {
                        self.engine.pad(window, prepend);
                    }
                }
            }
            out
        }
    }

    fn thresholds(sizes: &[usize]) -> Vec<Threshold> {
        sizes
            .iter()
            .map(|&s| Threshold::from_chunk_size(s).unwrap())
            .collect()
    }

    fn sample(len: usize, seed: u64) -> Vec<u8> {
        use rand::RngCore;
        let mut rng = rand_pcg::Pcg64::new(seed as u128, 0xa02bdbf7bb3c0a7ac28fa16a64abf96);
        let mut data = vec![0u8; len];
        rng.fill_bytes(&mut data);
        data
    }

    #[test]
    fn test_rejects_empty_thresholds() {
        assert!(matches!(
            MultiLevelChunker::new(&ChunkConfig::default(), &[]),
            Err(ChunkError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_increasing_thresholds() {
        let err = MultiLevelChunker::new(&ChunkConfig::default(), &thresholds(&[64, 16])).unwrap_err();
        assert!(matches!(err, ChunkError::UnorderedThresholds { level: 1, .. }));
    }

    #[test]
    fn test_equal_thresholds_allowed() {
        let chunker = MultiLevelChunker::new(&ChunkConfig::default(), &thresholds(&[32, 32]));
        assert!(chunker.is_ok());
    }

    #[test]
    fn test_with_probabilities() {
        let chunker =
            MultiLevelChunker::with_probabilities(&ChunkConfig::default(), &[0.5, 0.25]).unwrap();
        assert_eq!(chunker.levels(), 2);
        let values: Vec<_> = chunker.thresholds().map(Threshold::value).collect();
        assert_eq!(values, vec![1 << 28, 1 << 27]);

        assert!(MultiLevelChunker::with_probabilities(&ChunkConfig::default(), &[0.0]).is_err());
    }

    #[test]
    fn test_matches_reference_with_full_padding() {
        let data = sample(20_000, 7);
        let levels = thresholds(&[8, 32, 128, 512]);

        let mut fast = MultiLevelChunker::new(&ChunkConfig::new(16, 5).unwrap(), &levels).unwrap();
        let mut reference = Reference::new(16, 5, &levels);

        assert_eq!(
            fast.next_boundaries_with_levels(&data, 16),
            reference.boundaries(&data, 16)
        );
    }

    #[test]
    fn test_boundaries_trace_lane_restarts() {
        use std::sync::{Arc, Mutex};
        use tracing::field::{Field, Visit};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Clone, Default)]
        struct Messages(Arc<Mutex<Vec<String>>>);

        struct Message(Option<String>);

        impl Visit for Message {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.0 = Some(format!("{value:?}"));
                }
            }
        }

        impl<S: tracing::Subscriber> Layer<S> for Messages {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                let mut message = Message(None);
                event.record(&mut message);
                if let Some(message) = message.0 {
                    self.0.lock().unwrap().push(message);
                }
            }
        }

        let data = sample(4_000, 5);
        let mut chunker =
            MultiLevelChunker::new(&ChunkConfig::new(8, 2).unwrap(), &thresholds(&[8, 32])).unwrap();

        let messages = Messages::default();
        let subscriber = tracing_subscriber::registry().with(messages.clone());
        let boundaries = tracing::subscriber::with_default(subscriber, || {
            chunker.next_boundaries_with_levels(&data, 8)
        });

        let messages = messages.0.lock().unwrap();
        let restarts = messages.iter().filter(|m| *m == "lanes restarted").count();
        assert!(!boundaries.is_empty());
        assert_eq!(restarts, boundaries.len());
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let data = sample(4_000, 3);
        let mut chunker =
            MultiLevelChunker::new(&ChunkConfig::default(), &thresholds(&[16, 64])).unwrap();

        let first = chunker.next_boundaries_with_levels(&data, 48);
        chunker.reset();
        assert_eq!(chunker.next_boundaries_with_levels(&data, 48), first);
    }

    #[test]
    fn test_single_lane_equals_single_level() {
        let data = sample(8_000, 11);
        let config = ChunkConfig::new(32, 9).unwrap();
        let threshold = Threshold::from_chunk_size(40).unwrap();

        let mut multi = MultiLevelChunker::new(&config, &[threshold]).unwrap();
        let mut single = RabinKarpChunker::new(&config, threshold).unwrap();

        assert_eq!(
            multi.next_boundaries(&data, 0),
            single.next_boundaries(&data, 0)
        );
    }

    proptest! {
        #[test]
        fn prop_matches_reference(
            data in prop::collection::vec(any::<u8>(), 0..1500),
            window_size in 1usize..12,
            extra in 0usize..5,
            seed in any::<u32>(),
        ) {
            let levels = thresholds(&[2, 4, 9]);
            let prepend = window_size + extra;

            let config = ChunkConfig::new(window_size, seed).unwrap();
            let mut fast = MultiLevelChunker::new(&config, &levels).unwrap();
            let mut reference = Reference::new(window_size, seed, &levels);

            prop_assert_eq!(
                fast.next_boundaries_with_levels(&data, prepend),
                reference.boundaries(&data, prepend)
            );
        }

        #[test]
        fn prop_split_calls_equal_one_call(
            data in prop::collection::vec(any::<u8>(), 1..1500),
            cut in any::<prop::sample::Index>(),
        ) {
            let cut = cut.index(data.len());
            let config = ChunkConfig::new(8, 1).unwrap();
            let levels = thresholds(&[4, 16]);

            let mut whole = MultiLevelChunker::new(&config, &levels).unwrap();
            let expected = whole.next_boundaries_with_levels(&data, 0);

            let mut split = MultiLevelChunker::new(&config, &levels).unwrap();
            let mut got = split.next_boundaries_with_levels(&data[..cut], 0);
            got.extend(
                split
                    .next_boundaries_with_levels(&data[cut..], 0)
                    .into_iter()
                    .map(|b| Boundary::new(b.position + cut, b.level)),
            );

            prop_assert_eq!(got, expected);
        }

        #[test]
        fn prop_positions_increase(
            data in prop::collection::vec(any::<u8>(), 0..2000),
            prepend in 0usize..64,
        ) {
            let mut chunker =
                MultiLevelChunker::new(&ChunkConfig::new(8, 0).unwrap(), &thresholds(&[3, 8, 20]))
                    .unwrap();
            let boundaries = chunker.next_boundaries_with_levels(&data, prepend);
            prop_assert!(boundaries.windows(2).all(|w| w[0].position < w[1].position));
            prop_assert!(boundaries.iter().all(|b| b.level < 3 && b.position <= data.len()));
        }
    }
}
