//! Deterministic dice for spawn and loot rolls.
//!
//! Rolls are a pure function of a seed, so a session replays identically from
//! the same starting seed and the same sequence of actions.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR: xorshift the high bits down, then rotate by the top five bits.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Roll context: which table a roll belongs to, so two rolls taken on the
/// same turn at the same location stay independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Spawn = 0,
    Respawn = 1,
    Loot = 2,
}

/// Mixes the session seed with the turn, location and roll context.
pub fn compute_seed(game_seed: u64, turn: u16, location: u16, context: RollContext) -> u64 {
    let mut hash = game_seed;
    hash ^= u64::from(turn).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(location).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Percentage roll: `0` never triggers, `100` and above always trigger.
pub fn roll_chance(rng: &dyn RngOracle, seed: u64, chance: u8) -> bool {
    match chance {
        0 => false,
        100.. => true,
        _ => rng.roll_d100(seed) <= u32::from(chance),
    }
}
