//! Level seeds and the phrase hash that turns shareable text into them.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Exclusive upper bound of the seed space.
pub const SEED_SPACE: u32 = 1_000_000;

/// Deterministic integer that drives every random decision of one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelSeed(u32);

impl LevelSeed {
    /// Creates a seed, folding the value into the seed space.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value % SEED_SPACE)
    }

    /// Retrieves the numeric value of the seed.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Draws a uniformly distributed seed from the provided generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0..SEED_SPACE))
    }

    /// Hashes a phrase into a seed using a 31-multiplier rolling hash.
    ///
    /// The hash runs over UTF-16 code units with 32-bit wrapping arithmetic so
    /// that phrases shared between players resolve to identical levels.
    #[must_use]
    pub fn hash_phrase(phrase: &str) -> Self {
        let hash = phrase.encode_utf16().fold(0_i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        });
        let magnitude = i64::from(hash).abs();
        let folded = magnitude % i64::from(SEED_SPACE);
        Self(u32::try_from(folded).unwrap_or(0))
    }

    /// Resolves optional user input into a seed.
    ///
    /// Blank or absent phrases fall back to a random seed.
    pub fn from_phrase<R: Rng + ?Sized>(phrase: Option<&str>, rng: &mut R) -> Self {
        match phrase.map(str::trim).filter(|trimmed| !trimmed.is_empty()) {
            Some(trimmed) => Self::hash_phrase(trimmed),
            None => Self::random(rng),
        }
    }

    /// Counter value that starts a generation sub-stream offset from this seed.
    #[must_use]
    pub const fn stream(&self, offset: u32) -> i64 {
        self.0 as i64 + offset as i64
    }
}

impl fmt::Display for LevelSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seed paired with the phrase it was derived from, for display purposes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedLabel {
    seed: LevelSeed,
    phrase: Option<String>,
}

impl SeedLabel {
    /// Resolves optional user input into a labelled seed.
    pub fn resolve<R: Rng + ?Sized>(phrase: Option<&str>, rng: &mut R) -> Self {
        let trimmed = phrase
            .map(str::trim)
            .filter(|trimmed| !trimmed.is_empty())
            .map(str::to_owned);
        let seed = LevelSeed::from_phrase(trimmed.as_deref(), rng);
        Self {
            seed,
            phrase: trimmed,
        }
    }

    /// Seed that drives generation.
    #[must_use]
    pub const fn seed(&self) -> LevelSeed {
        self.seed
    }

    /// Phrase supplied by the user, if any.
    #[must_use]
    pub fn phrase(&self) -> Option<&str> {
        self.phrase.as_deref()
    }
}

impl fmt::Display for SeedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.phrase {
            Some(phrase) => write!(f, "Seed: \"{phrase}\""),
            None => write!(f, "Seed: {}", self.seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn hash_matches_rolling_hash_for_short_phrase() {
        // 't' = 116, 'e' = 101, 's' = 115 → ((116·31 + 101)·31 + 115)·31 + 116
        let expected = ((116 * 31 + 101) * 31 + 115) * 31 + 116;
        assert_eq!(LevelSeed::hash_phrase("test").get(), expected % SEED_SPACE);
    }

    #[test]
    fn hash_wraps_and_stays_in_range() {
        let seed = LevelSeed::hash_phrase("a considerably longer phrase that overflows 32 bits");
        assert!(seed.get() < SEED_SPACE);
        assert_eq!(
            seed,
            LevelSeed::hash_phrase("a considerably longer phrase that overflows 32 bits")
        );
    }

    #[test]
    fn blank_phrase_draws_a_random_seed() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut replay = ChaCha8Rng::seed_from_u64(7);
        let seed = LevelSeed::from_phrase(Some("   "), &mut rng);
        assert_eq!(seed, LevelSeed::random(&mut replay));
    }

    #[test]
    fn phrases_are_trimmed_before_hashing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            LevelSeed::from_phrase(Some("  test "), &mut rng),
            LevelSeed::hash_phrase("test")
        );
    }

    #[test]
    fn label_prefers_the_phrase() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let label = SeedLabel::resolve(Some("arena"), &mut rng);
        assert_eq!(label.to_string(), "Seed: \"arena\"");
        let anonymous = SeedLabel::resolve(None, &mut rng);
        assert_eq!(anonymous.to_string(), format!("Seed: {}", anonymous.seed()));
    }
}
