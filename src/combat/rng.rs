//! Randomness for raid simulation. The engine draws only through [RandomSource], so callers
//! decide between a seeded [Rng] for replays and stub sources for regression tests.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// 2^-53, maps the top 53 bits of a `u64` onto `[0, 1)`.
const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Largest draw strictly below 1.0.
const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// SplitMix64 generator.
#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Picks a fresh seed from OS entropy. Returns the seed so the run can be replayed.
    pub fn from_entropy() -> Result<(Self, u64), getrandom::Error> {
        let mut bytes = [0_u8; 8];
        getrandom::getrandom(&mut bytes)?;
        let seed = u64::from_le_bytes(bytes);
        Ok((Self::new(seed), seed))
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }
}

impl RandomSource for Rng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_SCALE
    }
}

/// Returns the same draw forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRoll(f64);

impl FixedRoll {
    /// Lands every variance roll on the middle of its range and never crits.
    pub const MIDPOINT: FixedRoll = FixedRoll(0.5);

    pub fn new(draw: f64) -> Self {
        Self(draw.clamp(0.0, MAX_UNIT))
    }
}

impl RandomSource for FixedRoll {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedRolls {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRolls {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let mut draws: Vec<f64> = draws
            .into_iter()
            .map(|draw| draw.clamp(0.0, MAX_UNIT))
            .collect();
        if draws.is_empty() {
            draws.push(0.0);
        }
        Self { draws, cursor: 0 }
    }

    /// Draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}
