//! Point samplers for the unit interval.
//!
//! This module provides a trait-based family of samplers that produce
//! [`PointSet`]s for spectral evaluation.
//!
//! # Key Components
//!
//! - [`PointSampler`]: The trait all samplers implement
//! - [`BestCandidate`]: Greedy best-candidate search (blue and red noise)
//! - [`UniformSampler`]: Independent uniform draws (white-noise baseline)
//! - [`SamplerRegistry`]: Lookup of built-in samplers by id
//!
//! # Example
//!
//! ```ignore
//! let registry = SamplerRegistry::new();
//! let sampler = registry.get("blue-noise").unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let points = sampler.sample(10, &mut rng)?;
//! ```

pub mod best_candidate;
pub mod registry;
pub mod uniform;

pub use best_candidate::{BestCandidate, CandidateScore, Selection, SelectionStrategy};
pub use registry::SamplerRegistry;
pub use uniform::UniformSampler;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{NoiseError, Result};
use crate::points::PointSet;

/// Family a sampler belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SamplerKind {
    /// Unconditioned draws used as the control spectrum
    Baseline,

    /// Greedy candidate search conditioned on earlier points
    BestCandidate,
}

impl SamplerKind {
    /// Get a human-readable display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            SamplerKind::Baseline => "Baseline",
            SamplerKind::BestCandidate => "Best Candidate",
        }
    }
}

/// Metadata describing a sampler
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SamplerMetadata {
    /// Unique identifier (e.g., "blue-noise"), also used as the output file stem
    pub id: String,

    /// Human-readable name (e.g., "Blue Noise")
    pub name: String,

    /// Family for organization
    pub kind: SamplerKind,

    /// Description of the distribution this sampler produces
    pub description: String,
}

/// The core trait all point samplers implement.
///
/// Samplers hold only their configuration; all randomness comes from the
/// injected `rng`, so a seeded generator reproduces a point set exactly.
pub trait PointSampler: Send + Sync {
    /// Get static metadata describing this sampler
    fn metadata(&self) -> &SamplerMetadata;

    /// Produce `count` points in [0, 1)
    fn sample(&self, count: usize, rng: &mut dyn RngCore) -> Result<PointSet>;
}

/// Reject a zero sample count before any draw happens
pub(crate) fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(NoiseError::InvalidConfig(
            "sample count must be at least 1".to_string(),
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_kind() {
        assert_eq!(SamplerKind::Baseline.display_name(), "Baseline");
        assert_eq!(SamplerKind::BestCandidate.display_name(), "Best Candidate");
    }

    #[test]
    fn test_check_count() {
        assert!(check_count(1).is_ok());
        assert!(matches!(check_count(0), Err(NoiseError::InvalidConfig(_))));
    }
}
