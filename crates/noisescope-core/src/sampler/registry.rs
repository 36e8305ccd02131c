//! Registry for point samplers.
//!
//! The registry is built with all built-in samplers registered and supports
//! runtime lookup by id or kind.

use std::collections::HashMap;

use super::{BestCandidate, PointSampler, SamplerKind, SamplerMetadata, SelectionStrategy, UniformSampler};
use crate::error::{NoiseError, Result};

/// Registry of available point samplers.
pub struct SamplerRegistry {
    samplers: Vec<Box<dyn PointSampler>>,
    by_id: HashMap<String, usize>,
    by_kind: HashMap<SamplerKind, Vec<usize>>,
}

impl SamplerRegistry {
    /// Create a registry with all built-in samplers, using multiplier 1
    pub fn new() -> Self {
        Self::with_builtins(1)
    }

    /// Create a registry whose best-candidate samplers use `multiplier`
    pub fn with_multiplier(multiplier: usize) -> Result<Self> {
        if multiplier == 0 {
            return Err(NoiseError::InvalidConfig(
                "candidate multiplier must be at least 1".to_string(),
            ));
        }
        Ok(Self::with_builtins(multiplier))
    }

    fn with_builtins(multiplier: usize) -> Self {
        let mut registry = Self::empty();

        // Baseline
        registry.register(Box::new(UniformSampler::new()));

        // Best-candidate strategies
        for strategy in SelectionStrategy::ALL {
            registry.register(Box::new(BestCandidate::build(multiplier, strategy)));
        }

        registry
    }

    /// Create an empty registry (for testing)
    pub fn empty() -> Self {
        Self {
            samplers: Vec::new(),
            by_id: HashMap::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Register a sampler; one with an existing id replaces it in place
    pub fn register(&mut self, sampler: Box<dyn PointSampler>) {
        let id = sampler.metadata().id.clone();
        let kind = sampler.metadata().kind;

        match self.by_id.get(&id) {
            Some(&index) => {
                let previous = self.samplers[index].metadata().kind;
                if previous != kind {
                    if let Some(indices) = self.by_kind.get_mut(&previous) {
                        indices.retain(|&i| i != index);
                    }
                    let indices = self.by_kind.entry(kind).or_default();
                    let position = indices.partition_point(|&i| i < index);
                    indices.insert(position, index);
                }
                self.samplers[index] = sampler;
            }
            None => {
                let index = self.samplers.len();
                self.by_id.insert(id, index);
                self.by_kind.entry(kind).or_default().push(index);
                self.samplers.push(sampler);
            }
        }
    }

    /// Get a sampler by its id.
    pub fn get(&self, id: &str) -> Option<&dyn PointSampler> {
        self.by_id
            .get(id)
            .map(|&index| self.samplers[index].as_ref())
    }

    /// Get a sampler by id, failing with [`NoiseError::UnknownSampler`]
    pub fn require(&self, id: &str) -> Result<&dyn PointSampler> {
        self.get(id)
            .ok_or_else(|| NoiseError::UnknownSampler(id.to_string()))
    }

    /// List all registered samplers in registration order.
    pub fn list_all(&self) -> Vec<&SamplerMetadata> {
        self.samplers.iter().map(|s| s.metadata()).collect()
    }

    /// List samplers of one kind.
    pub fn list_by_kind(&self, kind: SamplerKind) -> Vec<&SamplerMetadata> {
        self.by_kind
            .get(&kind)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| self.samplers[i].metadata())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ids of all registered samplers, in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.samplers
            .iter()
            .map(|s| s.metadata().id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.samplers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samplers.is_empty()
    }
}

impl Default for SamplerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointSet;
    use rand::RngCore;

    struct Fixed {
        metadata: SamplerMetadata,
    }

    impl Fixed {
        fn new(id: &str, kind: SamplerKind) -> Self {
            Self {
                metadata: SamplerMetadata {
                    id: id.to_string(),
                    name: "Fixed".to_string(),
                    kind,
                    description: "Always the midpoint".to_string(),
                },
            }
        }
    }

    impl PointSampler for Fixed {
        fn metadata(&self) -> &SamplerMetadata {
            &self.metadata
        }

        fn sample(&self, count: usize, _rng: &mut dyn RngCore) -> Result<PointSet> {
            PointSet::new(vec![0.5; count])
        }
    }

    #[test]
    fn test_builtin_samplers() {
        let registry = SamplerRegistry::new();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.ids(),
            vec!["white-noise", "blue-noise", "red-noise", "farthest-highest", "farthest-lowest"]
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let registry = SamplerRegistry::new();
        let blue = registry.get("blue-noise").unwrap();
        assert_eq!(blue.metadata().kind, SamplerKind::BestCandidate);
        assert!(registry.get("pink-noise").is_none());
        assert!(matches!(
            registry.require("pink-noise"),
            Err(NoiseError::UnknownSampler(_))
        ));
    }

    #[test]
    fn test_list_by_kind() {
        let registry = SamplerRegistry::new();
        assert_eq!(registry.list_by_kind(SamplerKind::Baseline).len(), 1);
        assert_eq!(registry.list_by_kind(SamplerKind::BestCandidate).len(), 4);
    }

    #[test]
    fn test_invalid_multiplier() {
        assert!(SamplerRegistry::with_multiplier(0).is_err());
    }

    #[test]
    fn test_empty_registry() {
        let registry = SamplerRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.list_by_kind(SamplerKind::Baseline).is_empty());
    }

    #[test]
    fn test_register_replaces_existing_id() {
        let mut registry = SamplerRegistry::new();
        registry.register(Box::new(Fixed::new("blue-noise", SamplerKind::Baseline)));

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.list_all().len(), 5);
        assert_eq!(registry.ids()[1], "blue-noise");
        assert_eq!(registry.get("blue-noise").unwrap().metadata().name, "Fixed");

        let baseline: Vec<&str> = registry
            .list_by_kind(SamplerKind::Baseline)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(baseline, vec!["white-noise", "blue-noise"]);
        assert_eq!(registry.list_by_kind(SamplerKind::BestCandidate).len(), 3);
    }

    #[test]
    fn test_register_same_kind_keeps_counts() {
        let mut registry = SamplerRegistry::new();
        registry.register(Box::new(Fixed::new("red-noise", SamplerKind::BestCandidate)));

        assert_eq!(registry.len(), 5);
        assert_eq!(registry.list_by_kind(SamplerKind::BestCandidate).len(), 4);
    }
}
