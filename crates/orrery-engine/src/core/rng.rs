//! Seedable pseudo-random number generator (xorshift64) and the
//! `RandomSource` seam the scene draws its initial phases and textures from.

use std::f64::consts::TAU;

/// Anything that yields uniform samples in [0, 1).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Uniform sample in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform angle in [0, 2π).
    fn angle(&mut self) -> f64 {
        self.next_f64() * TAU
    }
}

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of samples, cycling when exhausted.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl SequenceSource {
    pub(crate) fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }

    pub(crate) fn constant(value: f64) -> Self {
        Self::new(&[value])
    }
}

#[cfg(test)]
impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn unit_samples_stay_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "sample was {}", v);
            let a = rng.angle();
            assert!((0.0..TAU).contains(&a));
            let r = rng.range(2.0, 10.0);
            assert!((2.0..10.0).contains(&r));
        }
    }

    #[test]
    fn sequence_source_cycles() {
        let mut src = SequenceSource::new(&[0.25, 0.5]);
        assert_eq!(src.next_f64(), 0.25);
        assert_eq!(src.next_f64(), 0.5);
        assert_eq!(src.next_f64(), 0.25);
        assert_eq!(SequenceSource::constant(0.5).angle(), std::f64::consts::PI);
    }
}
