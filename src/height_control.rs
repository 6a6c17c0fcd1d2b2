use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Decides how many levels a freshly inserted node takes part in.
///
/// Heights are 1-based: a node of height 1 is only linked on the base level.
/// Implementations should return values in `1..=max_height()`; the list clamps
/// anything outside that range.
pub trait HeightControl {
    fn max_height(&self) -> usize;
    fn get_height(&mut self) -> usize;
}

/// Flips coins from an injectable random source: a node keeps climbing while
/// the coin comes up with probability `upgrade_probability`. With the default
/// probability of one half, P(height = k) = 2^-k for k below the cap and the
/// remaining mass sits on the cap.
pub struct GeometricalGenerator<R = StdRng> {
    upgrade_probability_: f64,
    max_height_: usize,
    rng_: R,
}

impl GeometricalGenerator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn new(max_height: usize, upgrade_probability: f64) -> GeometricalGenerator<StdRng> {
        GeometricalGenerator::with_rng(max_height, upgrade_probability, StdRng::from_entropy())
    }

    /// Generator producing the same height sequence for the same seed.
    pub fn seeded(
        max_height: usize,
        upgrade_probability: f64,
        seed: u64,
    ) -> GeometricalGenerator<StdRng> {
        GeometricalGenerator::with_rng(max_height, upgrade_probability, StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> GeometricalGenerator<R> {
    pub fn with_rng(max_height: usize, upgrade_probability: f64, rng: R) -> GeometricalGenerator<R> {
        assert!(max_height > 0);
        assert!(upgrade_probability > 0.0);
        assert!(upgrade_probability < 1.0);

        GeometricalGenerator {
            upgrade_probability_: upgrade_probability,
            max_height_: max_height,
            rng_: rng,
        }
    }
}

impl<R: RngCore> HeightControl for GeometricalGenerator<R> {
    #[inline(always)]
    fn max_height(&self) -> usize {
        self.max_height_
    }

    fn get_height(&mut self) -> usize {
        // Number of successes before the first failure, plus the base level.
        let mut h = 1;

        while h < self.max_height_ && self.rng_.gen_bool(self.upgrade_probability_) {
            h += 1;
        }

        h
    }
}

// 'CounterGenerator' counts the trailing one bits of an incrementing counter.
// Over any aligned block of 2^k insertions it hands out exactly the geometric
// proportions, but the sequence is a pure function of the number of calls:
// 1, 2, 1, 3, 1, 2, 1, 4, ... An adversary who knows it can pick an insertion
// order that degrades the list, so only use it when reproducing that exact
// layout matters.
pub struct CounterGenerator {
    max_height_: usize,
    counter_: u64,
}

impl CounterGenerator {
    pub fn new(max_height: usize) -> CounterGenerator {
        assert!(max_height > 0);

        CounterGenerator {
            max_height_: max_height,
            counter_: 0,
        }
    }
}

impl HeightControl for CounterGenerator {
    #[inline(always)]
    fn max_height(&self) -> usize {
        self.max_height_
    }

    fn get_height(&mut self) -> usize {
        let height = self.counter_.trailing_ones() as usize + 1;
        self.counter_ = self.counter_.wrapping_add(1);
        std::cmp::min(height, self.max_height_)
    }
}
