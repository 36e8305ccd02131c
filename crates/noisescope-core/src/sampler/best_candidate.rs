//! Best-candidate point generator.
//!
//! Points are placed one at a time. For the point at index `k`, the sampler
//! draws `k * multiplier + 1` uniform candidates, scores each against every
//! accepted point using toroidal distance, and keeps the candidate the
//! selection policy prefers. Candidate pressure grows linearly with `k`, and
//! the first point is accepted from a single draw without any comparison.
//!
//! Generating `count` points costs O(count² · multiplier) distance evaluations.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use super::{check_count, PointSampler, SamplerKind, SamplerMetadata};
use crate::error::{NoiseError, Result};
use crate::points::PointSet;

/// How a candidate is scored against the accepted points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateScore {
    /// Distance to the nearest accepted point
    NearestDistance,

    /// Distance to the farthest accepted point
    FarthestDistance,
}

impl CandidateScore {
    /// Score `candidate`, or `None` when nothing has been accepted yet
    pub fn score(&self, candidate: f32, accepted: &PointSet) -> Option<f32> {
        match self {
            CandidateScore::NearestDistance => accepted.nearest_distance(candidate),
            CandidateScore::FarthestDistance => accepted.farthest_distance(candidate),
        }
    }
}

/// Which score wins among a batch of candidates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Keep the highest score
    Highest,

    /// Keep the lowest score
    Lowest,
}

impl Selection {
    /// Whether `score` replaces the current `best`
    ///
    /// Strict comparison: on a tie the earlier candidate is kept.
    pub fn prefers(&self, score: f32, best: f32) -> bool {
        match self {
            Selection::Highest => score > best,
            Selection::Lowest => score < best,
        }
    }
}

/// Named combination of scoring metric and selection policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Nearest distance, highest score: points pushed apart
    BlueNoise,

    /// Nearest distance, lowest score: points pulled together
    RedNoise,

    /// Farthest distance, highest score
    FarthestHighest,

    /// Farthest distance, lowest score
    FarthestLowest,
}

impl SelectionStrategy {
    /// All strategies, in registration order
    pub const ALL: [SelectionStrategy; 4] = [
        SelectionStrategy::BlueNoise,
        SelectionStrategy::RedNoise,
        SelectionStrategy::FarthestHighest,
        SelectionStrategy::FarthestLowest,
    ];

    /// Build from the two independent policy flags
    pub fn from_flags(score_is_min_distance: bool, best_is_max_score: bool) -> Self {
        match (score_is_min_distance, best_is_max_score) {
            (true, true) => SelectionStrategy::BlueNoise,
            (true, false) => SelectionStrategy::RedNoise,
            (false, true) => SelectionStrategy::FarthestHighest,
            (false, false) => SelectionStrategy::FarthestLowest,
        }
    }

    pub fn score_metric(&self) -> CandidateScore {
        match self {
            SelectionStrategy::BlueNoise | SelectionStrategy::RedNoise => {
                CandidateScore::NearestDistance
            }
            SelectionStrategy::FarthestHighest | SelectionStrategy::FarthestLowest => {
                CandidateScore::FarthestDistance
            }
        }
    }

    pub fn selection(&self) -> Selection {
        match self {
            SelectionStrategy::BlueNoise | SelectionStrategy::FarthestHighest => Selection::Highest,
            SelectionStrategy::RedNoise | SelectionStrategy::FarthestLowest => Selection::Lowest,
        }
    }

    /// Stable identifier, used as registry id and file stem
    pub fn id(&self) -> &'static str {
        match self {
            SelectionStrategy::BlueNoise => "blue-noise",
            SelectionStrategy::RedNoise => "red-noise",
            SelectionStrategy::FarthestHighest => "farthest-highest",
            SelectionStrategy::FarthestLowest => "farthest-lowest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SelectionStrategy::BlueNoise => "Blue Noise",
            SelectionStrategy::RedNoise => "Red Noise",
            SelectionStrategy::FarthestHighest => "Farthest Distance, Highest Score",
            SelectionStrategy::FarthestLowest => "Farthest Distance, Lowest Score",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            SelectionStrategy::BlueNoise => {
                "Keeps the candidate farthest from its nearest neighbor; suppresses low frequencies"
            }
            SelectionStrategy::RedNoise => {
                "Keeps the candidate closest to its nearest neighbor; clusters points"
            }
            SelectionStrategy::FarthestHighest => {
                "Keeps the candidate whose farthest accepted point is farthest away"
            }
            SelectionStrategy::FarthestLowest => {
                "Keeps the candidate whose farthest accepted point is closest"
            }
        }
    }
}

/// Greedy best-candidate sampler
pub struct BestCandidate {
    metadata: SamplerMetadata,
    multiplier: usize,
    strategy: SelectionStrategy,
}

impl BestCandidate {
    /// Create a sampler; `multiplier` must be at least 1
    pub fn new(multiplier: usize, strategy: SelectionStrategy) -> Result<Self> {
        if multiplier == 0 {
            return Err(NoiseError::InvalidConfig(
                "candidate multiplier must be at least 1".to_string(),
            ));
        }
        Ok(Self::build(multiplier, strategy))
    }

    /// Construct without validation; `multiplier` is known to be non-zero
    pub(crate) fn build(multiplier: usize, strategy: SelectionStrategy) -> Self {
        let metadata = SamplerMetadata {
            id: strategy.id().to_string(),
            name: strategy.display_name().to_string(),
            kind: SamplerKind::BestCandidate,
            description: strategy.description().to_string(),
        };

        Self {
            metadata,
            multiplier,
            strategy,
        }
    }

    /// Canonical blue-noise sampler
    pub fn blue_noise(multiplier: usize) -> Result<Self> {
        Self::new(multiplier, SelectionStrategy::BlueNoise)
    }

    /// Canonical red-noise sampler
    pub fn red_noise(multiplier: usize) -> Result<Self> {
        Self::new(multiplier, SelectionStrategy::RedNoise)
    }

    pub fn multiplier(&self) -> usize {
        self.multiplier
    }

    pub fn strategy(&self) -> SelectionStrategy {
        self.strategy
    }

    /// Number of candidates drawn for the point at `index`, `None` on overflow
    pub fn candidates_for_index(&self, index: usize) -> Option<usize> {
        index.checked_mul(self.multiplier)?.checked_add(1)
    }

    /// Total candidates drawn to generate `count` points, `None` on overflow
    pub fn total_candidates(&self, count: usize) -> Option<usize> {
        let pairs = count.checked_mul(count.saturating_sub(1))? / 2;
        pairs.checked_mul(self.multiplier)?.checked_add(count)
    }

    /// Generate `count` points with the configured strategy
    pub fn generate(&self, count: usize, rng: &mut dyn RngCore) -> Result<PointSet> {
        check_count(count)?;

        let metric = self.strategy.score_metric();
        let selection = self.strategy.selection();
        let mut points = PointSet::with_capacity(count);

        for index in 0..count {
            let candidates = self.candidates_for_index(index).ok_or_else(|| {
                NoiseError::InvalidConfig(format!(
                    "candidate count overflows at index {} with multiplier {}",
                    index, self.multiplier
                ))
            })?;
            let mut best_point: f32 = rng.gen();

            // The first point has nothing to be scored against.
            if let Some(mut best_score) = metric.score(best_point, &points) {
                for _ in 1..candidates {
                    let candidate: f32 = rng.gen();
                    if let Some(score) = metric.score(candidate, &points) {
                        if selection.prefers(score, best_score) {
                            best_point = candidate;
                            best_score = score;
                        }
                    }
                }
            }

            points.push(best_point);
        }

        Ok(points)
    }
}

impl PointSampler for BestCandidate {
    fn metadata(&self) -> &SamplerMetadata {
        &self.metadata
    }

    fn sample(&self, count: usize, rng: &mut dyn RngCore) -> Result<PointSet> {
        self.generate(count, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::toroidal_distance;
    use crate::sampler::testing::CountingRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn min_gap(points: &PointSet) -> f32 {
        let p = points.as_slice();
        let mut gap = f32::INFINITY;
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                gap = gap.min(toroidal_distance(p[i], p[j]));
            }
        }
        gap
    }

    #[test]
    fn test_zero_multiplier_rejected() {
        assert!(matches!(
            BestCandidate::new(0, SelectionStrategy::BlueNoise),
            Err(NoiseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_count_rejected() {
        let sampler = BestCandidate::blue_noise(1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(sampler.generate(0, &mut rng).is_err());
    }

    #[test]
    fn test_candidate_count_growth() {
        let sampler = BestCandidate::blue_noise(3).unwrap();
        assert_eq!(sampler.candidates_for_index(0), Some(1));
        assert_eq!(sampler.candidates_for_index(1), Some(4));
        assert_eq!(sampler.candidates_for_index(9), Some(28));
        assert_eq!(sampler.total_candidates(10), Some(3 * 10 * 9 / 2 + 10));
        assert_eq!(sampler.total_candidates(1), Some(1));
    }

    #[test]
    fn test_huge_multiplier_overflow_is_an_error() {
        let sampler = BestCandidate::blue_noise(usize::MAX).unwrap();
        assert_eq!(sampler.candidates_for_index(0), Some(1));
        assert_eq!(sampler.candidates_for_index(2), None);
        assert_eq!(sampler.total_candidates(3), None);

        // A single point draws one candidate regardless of the multiplier
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(sampler.generate(1, &mut rng).is_ok());
        assert!(matches!(
            sampler.generate(2, &mut rng),
            Err(NoiseError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_draws_match_candidate_schedule() {
        for strategy in SelectionStrategy::ALL {
            for multiplier in [1, 2, 5] {
                let sampler = BestCandidate::new(multiplier, strategy).unwrap();
                let mut rng = CountingRng::new(11);
                let points = sampler.generate(10, &mut rng).unwrap();

                assert_eq!(points.len(), 10);
                assert_eq!(rng.draws, multiplier * 10 * 9 / 2 + 10);
            }
        }
    }

    #[test]
    fn test_first_point_accepted_from_single_draw() {
        for multiplier in [1, 4, 100] {
            let sampler = BestCandidate::blue_noise(multiplier).unwrap();

            let mut rng = CountingRng::new(5);
            let points = sampler.generate(1, &mut rng).unwrap();
            assert_eq!(rng.draws, 1);

            let mut reference = ChaCha8Rng::seed_from_u64(5);
            let expected: f32 = reference.gen();
            assert_eq!(points.as_slice(), &[expected]);
        }
    }

    #[test]
    fn test_points_in_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for strategy in SelectionStrategy::ALL {
            let sampler = BestCandidate::new(2, strategy).unwrap();
            let points = sampler.generate(32, &mut rng).unwrap();
            assert!(points.iter().all(|p| (0.0..1.0).contains(&p)));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let sampler = BestCandidate::blue_noise(1).unwrap();
        let a = sampler
            .generate(10, &mut ChaCha8Rng::seed_from_u64(99))
            .unwrap();
        let b = sampler
            .generate(10, &mut ChaCha8Rng::seed_from_u64(99))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blue_noise_spreads_wider_than_red_noise() {
        let blue = BestCandidate::blue_noise(4).unwrap();
        let red = BestCandidate::red_noise(4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);

        let trials = 200;
        let mut blue_gap = 0.0;
        let mut red_gap = 0.0;
        for _ in 0..trials {
            blue_gap += min_gap(&blue.generate(10, &mut rng).unwrap());
            red_gap += min_gap(&red.generate(10, &mut rng).unwrap());
        }

        assert!(
            blue_gap > red_gap * 2.0,
            "blue mean gap {} should dominate red mean gap {}",
            blue_gap / trials as f32,
            red_gap / trials as f32
        );
    }

    #[test]
    fn test_strategy_flags() {
        assert_eq!(SelectionStrategy::from_flags(true, true), SelectionStrategy::BlueNoise);
        assert_eq!(SelectionStrategy::from_flags(true, false), SelectionStrategy::RedNoise);

        let red = SelectionStrategy::RedNoise;
        assert_eq!(red.score_metric(), CandidateScore::NearestDistance);
        assert_eq!(red.selection(), Selection::Lowest);

        let far = SelectionStrategy::from_flags(false, true);
        assert_eq!(far.score_metric(), CandidateScore::FarthestDistance);
        assert_eq!(far.selection(), Selection::Highest);
    }

    #[test]
    fn test_selection_keeps_earlier_on_tie() {
        assert!(!Selection::Highest.prefers(0.3, 0.3));
        assert!(!Selection::Lowest.prefers(0.3, 0.3));
        assert!(Selection::Highest.prefers(0.4, 0.3));
        assert!(Selection::Lowest.prefers(0.2, 0.3));
    }
}
