//! Configuration errors raised while validating a feature graph or deriving
//! its targets.

use thiserror::Error;

use crate::models::{FeatureId, Module, Product};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ManifestError {
    #[error("{feature} feature doesn't have {module} module")]
    ModuleNotAdopted { feature: String, module: Module },

    #[error("{feature} feature requires {required} module to have {module} module")]
    MissingRequiredModule {
        feature: String,
        module: Module,
        required: Module,
    },

    #[error("{feature} feature can't make {module} module with a {product} source product")]
    IncompatibleProduct {
        feature: String,
        module: Module,
        product: Product,
    },

    #[error("{feature} feature specifies {count} example products; at most one is allowed")]
    MultipleExampleProducts { feature: String, count: usize },

    #[error("feature name {name:?} is declared {count} times")]
    DuplicateFeatureName { name: String, count: usize },

    #[error("feature name must not be empty ({id})")]
    EmptyFeatureName { id: FeatureId },

    #[error("{feature} feature depends on unknown feature {dependency}")]
    UnknownDependency { feature: String, dependency: FeatureId },

    #[error("dependency cycle detected: {}", path.join(" → "))]
    DependencyCycle { path: Vec<String> },

    #[error("no feature with id {0}")]
    UnknownFeature(FeatureId),
}

/// Every error found by one validation pass. Never empty.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} configuration error(s):{}", .0.len(), bullet_list(.0))]
pub struct ValidationErrors(Vec<ManifestError>);

#[allow(clippy::len_without_is_empty)]
impl ValidationErrors {
    /// `Ok(())` when `errors` is empty.
    pub fn check(errors: Vec<ManifestError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    pub fn errors(&self) -> &[ManifestError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<ManifestError> {
        self.0
    }
}

fn bullet_list(errors: &[ManifestError]) -> String {
    errors.iter().map(|error| format!("\n  - {}", error)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_joins_path() {
        let error = ManifestError::DependencyCycle {
            path: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(error.to_string(), "dependency cycle detected: A → B → A");
    }

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ValidationErrors::check(Vec::new()).is_ok());
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = ValidationErrors::check(vec![
            ManifestError::UnknownFeature(FeatureId(3)),
            ManifestError::ModuleNotAdopted {
                feature: "Home".into(),
                module: Module::Testing,
            },
        ])
        .unwrap_err();

        assert_eq!(
            errors.to_string(),
            "2 configuration error(s):\n  - no feature with id #3\n  - Home feature doesn't have testing module"
        );
        let error: &dyn std::error::Error = &errors;
        assert!(error.source().is_none());
    }
}
