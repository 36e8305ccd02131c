//! Uniform (white-noise) baseline sampler.

use rand::{Rng, RngCore};

use super::{check_count, PointSampler, SamplerKind, SamplerMetadata};
use crate::error::Result;
use crate::points::PointSet;

/// Independent uniform draws with no spatial conditioning
pub struct UniformSampler {
    metadata: SamplerMetadata,
}

impl UniformSampler {
    pub fn new() -> Self {
        Self {
            metadata: SamplerMetadata {
                id: "white-noise".to_string(),
                name: "White Noise".to_string(),
                kind: SamplerKind::Baseline,
                description: "Independent uniform samples; flat control spectrum".to_string(),
            },
        }
    }
}

impl Default for UniformSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl PointSampler for UniformSampler {
    fn metadata(&self) -> &SamplerMetadata {
        &self.metadata
    }

    fn sample(&self, count: usize, rng: &mut dyn RngCore) -> Result<PointSet> {
        check_count(count)?;

        let mut points = PointSet::with_capacity(count);
        for _ in 0..count {
            points.push(rng.gen());
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::testing::CountingRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_uniform_count_and_range() {
        let sampler = UniformSampler::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = sampler.sample(1000, &mut rng).unwrap();

        assert_eq!(points.len(), 1000);
        assert!(points.iter().all(|p| (0.0..1.0).contains(&p)));

        let mean = points.iter().sum::<f32>() / 1000.0;
        assert!((mean - 0.5).abs() < 0.05, "mean {} far from 0.5", mean);
    }

    #[test]
    fn test_one_draw_per_point() {
        let mut rng = CountingRng::new(8);
        UniformSampler::new().sample(10, &mut rng).unwrap();
        assert_eq!(rng.draws, 10);
    }

    #[test]
    fn test_zero_count_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(UniformSampler::new().sample(0, &mut rng).is_err());
    }
}
