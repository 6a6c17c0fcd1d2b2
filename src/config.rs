use crate::error::Error;
use crate::height_control::{GeometricalGenerator, HeightControl};

/// Hard upper bound on the number of levels a list may be configured with.
/// Search paths are kept on the stack in arrays of this size.
pub const MAX_HEIGHT_LIMIT: usize = 32;

/// Levels used when nothing else is requested. Good balance is expected for
/// up to roughly 2^20 elements.
pub const DEFAULT_MAX_HEIGHT: usize = 20;

pub const DEFAULT_UPGRADE_PROBABILITY: f64 = 0.5;

/// Construction parameters for a `SkipListMap`.
///
/// ```
/// use ranked_skiplist::{Config, SkipListMap};
///
/// let config = Config::new().with_max_height(12).with_seed(7);
/// let list: SkipListMap<u32, u32> = SkipListMap::with_config(config).unwrap();
/// assert_eq!(list.max_height(), 12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    max_height_: usize,
    upgrade_probability_: f64,
    seed_: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_height_: DEFAULT_MAX_HEIGHT,
            upgrade_probability_: DEFAULT_UPGRADE_PROBABILITY,
            seed_: None,
        }
    }
}

impl Config {
    pub fn new() -> Config {
        Default::default()
    }

    /// Sets the number of levels a node may reach.
    pub fn with_max_height(mut self, max_height: usize) -> Config {
        self.max_height_ = max_height;
        self
    }

    /// Sets the probability that a node is promoted one more level.
    pub fn with_upgrade_probability(mut self, upgrade_probability: f64) -> Config {
        self.upgrade_probability_ = upgrade_probability;
        self
    }

    /// Fixes the seed of the level generator, making node heights (and
    /// therefore the whole layout) reproducible.
    pub fn with_seed(mut self, seed: u64) -> Config {
        self.seed_ = Some(seed);
        self
    }

    pub fn max_height(&self) -> usize {
        self.max_height_
    }

    pub fn upgrade_probability(&self) -> f64 {
        self.upgrade_probability_
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed_
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.max_height_ == 0 || self.max_height_ > MAX_HEIGHT_LIMIT {
            return Err(Error::InvalidMaxHeight(self.max_height_));
        }

        // Written this way so that NaN is rejected as well.
        if !(self.upgrade_probability_ > 0.0 && self.upgrade_probability_ < 1.0) {
            return Err(Error::InvalidProbability(self.upgrade_probability_));
        }

        Ok(())
    }

    /// Builds the level generator described by this configuration. Assumes
    /// `validate` already passed.
    pub(crate) fn height_control(&self) -> Box<dyn HeightControl + Send + Sync> {
        match self.seed_ {
            Some(seed) => Box::new(GeometricalGenerator::seeded(
                self.max_height_,
                self.upgrade_probability_,
                seed,
            )),
            None => Box::new(GeometricalGenerator::new(
                self.max_height_,
                self.upgrade_probability_,
            )),
        }
    }
}
