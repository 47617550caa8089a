//! JSON workspace declarations.
//!
//! A workspace file lists features by name; dependencies refer to other
//! features by name and may point forward. Loading turns the file into a
//! [`FeatureGraph`] whose ids follow declaration order. It does not
//! validate the graph; cycles and module errors surface from
//! [`FeatureGraph::validate`].

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::FeatureGraph;
use crate::models::*;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workspace file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{feature} feature depends on undeclared feature {dependency:?}")]
    UnknownDependency { feature: String, dependency: String },

    #[error("{feature} feature has no bundle id and the workspace declares no default")]
    MissingBundleId { feature: String },

    #[error("{0} feature declares no modules")]
    NoModules(String),
}

/// The top-level workspace declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceFile {
    /// Project name handed to the host tool.
    pub name: String,
    #[serde(default)]
    pub base_bundle_id: Option<String>,
    #[serde(default)]
    pub destinations: Option<Destinations>,
    #[serde(default)]
    pub deployment_targets: Option<DeploymentTargets>,
    pub features: Vec<FeatureInput>,
}

/// One feature as declared in a workspace file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureInput {
    pub name: String,
    pub product: Product,
    pub modules: BTreeSet<ModuleKind>,
    /// Overrides the workspace bundle id prefix.
    #[serde(default)]
    pub base_bundle_id: Option<String>,
    #[serde(default)]
    pub destinations: Option<Destinations>,
    #[serde(default)]
    pub deployment_targets: Option<DeploymentTargets>,
    /// Grouping path under `Sources/`.
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub info_plist: Option<InfoPlist>,
    #[serde(default)]
    pub interface_resources: Option<Vec<ResourceFileElement>>,
    #[serde(default)]
    pub source_resources: Option<Vec<ResourceFileElement>>,
    #[serde(default)]
    pub entitlements: Option<Entitlements>,
    #[serde(default)]
    pub scripts: Vec<TargetScript>,
    /// Names of other features in the same workspace.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub external_dependencies: Vec<TargetDependency>,
    #[serde(default)]
    pub tests_dependencies: Vec<TargetDependency>,
    #[serde(default)]
    pub source_settings: Option<Settings>,
}

impl WorkspaceFile {
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn read(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Build the feature graph.
    ///
    /// `default_bundle_id` is used for features when neither the feature nor
    /// the workspace declares one.
    pub fn into_graph(self, default_bundle_id: Option<&str>) -> Result<FeatureGraph, LoadError> {
        // First declaration wins for lookups; duplicates are left for
        // validation to report.
        let mut ids: HashMap<&str, FeatureId> = HashMap::new();
        for (index, feature) in self.features.iter().enumerate() {
            ids.entry(feature.name.as_str()).or_insert(FeatureId(index));
        }

        let mut manifests = Vec::with_capacity(self.features.len());
        for feature in &self.features {
            if feature.modules.is_empty() {
                return Err(LoadError::NoModules(feature.name.clone()));
            }

            let dependencies = feature
                .dependencies
                .iter()
                .map(|dependency| {
                    ids.get(dependency.as_str())
                        .copied()
                        .ok_or_else(|| LoadError::UnknownDependency {
                            feature: feature.name.clone(),
                            dependency: dependency.clone(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let bundle_id = feature
                .base_bundle_id
                .as_deref()
                .or(self.base_bundle_id.as_deref())
                .or(default_bundle_id)
                .ok_or_else(|| LoadError::MissingBundleId {
                    feature: feature.name.clone(),
                })?;

            let destinations = feature
                .destinations
                .clone()
                .or_else(|| self.destinations.clone())
                .unwrap_or_else(Destinations::ios);
            let deployment_targets = feature
                .deployment_targets
                .clone()
                .or_else(|| self.deployment_targets.clone())
                .unwrap_or_default();

            let mut manifest = FeatureManifest::new(
                feature.name.clone(),
                bundle_id,
                destinations,
                feature.product,
                deployment_targets,
                feature.modules.iter().copied(),
            )
            .with_scripts(feature.scripts.clone())
            .with_feature_dependencies(dependencies)
            .with_basic_dependencies(feature.external_dependencies.clone())
            .with_tests_dependencies(feature.tests_dependencies.clone());

            if let Some(info_plist) = &feature.info_plist {
                manifest = manifest.with_source_info_plist(info_plist.clone());
            }
            if let Some(group) = &feature.group {
                manifest = manifest.with_group_path(group.clone());
            }
            if let Some(resources) = &feature.interface_resources {
                manifest = manifest.with_interface_resources(resources.clone());
            }
            if let Some(resources) = &feature.source_resources {
                manifest = manifest.with_source_resources(resources.clone());
            }
            if let Some(entitlements) = &feature.entitlements {
                manifest = manifest.with_entitlements(entitlements.clone());
            }
            if let Some(settings) = &feature.source_settings {
                manifest = manifest.with_source_settings(settings.clone());
            }

            manifests.push(manifest);
        }

        let mut graph = FeatureGraph::new();
        for manifest in manifests {
            graph.insert(manifest);
        }
        tracing::debug!(name = %self.name, features = graph.len(), "loaded workspace");
        Ok(graph)
    }
}

/// Read a workspace file and build its graph in one step.
pub fn load_workspace(
    path: &Path,
    default_bundle_id: Option<&str>,
) -> Result<(String, FeatureGraph), LoadError> {
    let workspace = WorkspaceFile::read(path)?;
    let name = workspace.name.clone();
    let graph = workspace.into_graph(default_bundle_id)?;
    Ok((name, graph))
}
