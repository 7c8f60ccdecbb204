use serde::{Deserialize, Serialize};

// Xorshift64 pseudorandom generator. Seedable so food spawning and shield
// deflection replay identically in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoRandom {
    state: u64,
}

impl PseudoRandom {
    pub fn new(seed: u64) -> Self {
        // Xorshift gets stuck on a zero state
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        PseudoRandom { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform f32 in [0.0, 1.0)
    pub fn next_f32(&mut self) -> f32 {
        let value = (self.next_u32() >> 8) as f32;
        value / 16777216.0 // 2^24
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PseudoRandom::new(42);
        let mut b = PseudoRandom::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn zero_seed_still_advances() {
        let mut rng = PseudoRandom::new(0);
        let first = rng.next_u64();
        assert_ne!(first, 0);
        assert_ne!(first, rng.next_u64());
    }

    #[test]
    fn f32_stays_in_unit_interval() {
        let mut rng = PseudoRandom::new(7);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
