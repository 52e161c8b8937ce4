//! Particle Bursts
//!
//! Decorative sparkles shown around the mascot on success and click. A burst
//! always holds exactly [`PARTICLE_BURST_SIZE`] particles; a newer burst
//! replaces an older one outright instead of merging with it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Particles per burst
pub const PARTICLE_BURST_SIZE: usize = 6;

/// A single transient particle
///
/// Offsets are relative to the mascot centre and normalized to `[-1.0, 1.0]`;
/// surfaces scale them to their own units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Unique within one controller
    pub id: u64,
    /// Horizontal offset
    pub x: f32,
    /// Vertical offset
    pub y: f32,
}

/// Generates particle bursts with unique ids
#[derive(Debug, Default)]
pub struct ParticleBurst {
    next_id: u64,
}

impl ParticleBurst {
    /// Create a generator starting at id 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce one burst of [`PARTICLE_BURST_SIZE`] particles
    pub fn emit<R: Rng>(&mut self, rng: &mut R) -> Vec<Particle> {
        (0..PARTICLE_BURST_SIZE)
            .map(|_| {
                let id = self.next_id;
                self.next_id += 1;
                Particle {
                    id,
                    x: rng.gen_range(-1.0..=1.0),
                    y: rng.gen_range(-1.0..=1.0),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_burst_size_and_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let burst = ParticleBurst::new().emit(&mut rng);

        assert_eq!(burst.len(), PARTICLE_BURST_SIZE);
        for p in &burst {
            assert!((-1.0..=1.0).contains(&p.x));
            assert!((-1.0..=1.0).contains(&p.y));
        }
    }

    #[test]
    fn test_ids_never_repeat_across_bursts() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut bursts = ParticleBurst::new();
        let first = bursts.emit(&mut rng);
        let second = bursts.emit(&mut rng);

        let max_first = first.iter().map(|p| p.id).max().unwrap();
        let min_second = second.iter().map(|p| p.id).min().unwrap();
        assert!(min_second > max_first);
    }
}
