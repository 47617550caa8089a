//! Arena storage for feature manifests.
//!
//! Manifests are held in insertion order and refer to each other through
//! [`FeatureId`] indices. The graph itself performs no checks on insert;
//! [`FeatureGraph::validate`] runs every check at once before resolution.

mod validate;

pub use validate::validate;

use crate::error::{ManifestError, ValidationErrors};
use crate::models::{FeatureId, FeatureManifest};

#[derive(Debug, Clone, Default)]
pub struct FeatureGraph {
    features: Vec<FeatureManifest>,
}

impl FeatureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a manifest and return its handle.
    ///
    /// Dependencies may point at ids that are not inserted yet; dangling ids
    /// are reported by validation.
    pub fn insert(&mut self, manifest: FeatureManifest) -> FeatureId {
        let id = FeatureId(self.features.len());
        tracing::debug!(feature = %manifest.base_name, %id, "inserted feature");
        self.features.push(manifest);
        id
    }

    pub fn get(&self, id: FeatureId) -> Option<&FeatureManifest> {
        self.features.get(id.0)
    }

    /// Like [`get`](Self::get), but as an error for `?` propagation.
    pub fn manifest(&self, id: FeatureId) -> Result<&FeatureManifest, ManifestError> {
        self.get(id).ok_or(ManifestError::UnknownFeature(id))
    }

    pub fn find(&self, base_name: &str) -> Option<FeatureId> {
        self.features
            .iter()
            .position(|manifest| manifest.base_name == base_name)
            .map(FeatureId)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        (0..self.features.len()).map(FeatureId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &FeatureManifest)> + '_ {
        self.features
            .iter()
            .enumerate()
            .map(|(index, manifest)| (FeatureId(index), manifest))
    }

    /// Direct dependents of `id`, in insertion order.
    pub fn dependents(&self, id: FeatureId) -> Vec<FeatureId> {
        self.iter()
            .filter(|(_, manifest)| manifest.feature_dependencies.contains(&id))
            .map(|(dependent, _)| dependent)
            .collect()
    }

    /// Features no other feature depends on.
    pub fn roots(&self) -> Vec<FeatureId> {
        self.ids()
            .filter(|id| {
                !self
                    .features
                    .iter()
                    .any(|manifest| manifest.feature_dependencies.contains(id))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate(self)
    }
}
