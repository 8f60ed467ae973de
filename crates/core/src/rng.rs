//! RNG module - seeded shuffling for the symbol pool
//!
//! A small deterministic generator so a seed reproduces a board exactly.
//! Bounded draws use rejection sampling, which keeps Fisher-Yates uniform
//! over all permutations.

/// 64-bit LCG (Knuth MMIX constants) with the high half as output.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    seed: u64,
    state: u64,
}

impl SimpleRng {
    const MUL: u64 = 6364136223846793005;
    const INC: u64 = 1442695040888963407;

    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { seed, state: 0 };
        // Mix the seed in so nearby seeds diverge right away.
        rng.state = seed.wrapping_add(Self::INC);
        rng.next_u32();
        rng
    }

    /// The seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(Self::MUL).wrapping_add(Self::INC);
        (self.state >> 32) as u32
    }

    /// Uniform value in `[0, bound)`. Returns 0 for a zero bound.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        // Values at or above `zone` would bias the low residues.
        let zone = u32::MAX - (u32::MAX % bound);
        loop {
            let v = self.next_u32();
            if v < zone {
                return v % bound;
            }
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}
