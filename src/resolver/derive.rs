//! Derivation of the six module targets.

use std::collections::BTreeMap;

use indexmap::IndexSet;

use super::ModuleResolver;
use crate::error::ManifestError;
use crate::models::{
    FeatureId, FeatureManifest, InfoPlist, MergedBinaryType, Module, Product, Target,
    TargetDependency,
};
use crate::plist;

impl ModuleResolver<'_> {
    /// The contract-only framework. Depends on the feature's basic
    /// dependencies and nothing from other features.
    pub fn interface(&self, id: FeatureId) -> Result<Target, ManifestError> {
        let manifest = self.graph.manifest(id)?;
        require(manifest, Module::Interface)?;
        require_compatible_product(manifest, Module::Interface)?;

        let mut target = base_target(manifest, Module::Interface, Product::Framework);
        target.resources = manifest.resources_for_interface.clone();
        target.scripts = manifest.scripts.clone();
        target.dependencies = manifest.basic_dependencies.clone();
        Ok(log_derived(target))
    }

    /// The implementation. Each feature dependency is linked through its
    /// interface when it has one, otherwise through its source.
    pub fn source(&self, id: FeatureId) -> Result<Target, ManifestError> {
        let manifest = self.graph.manifest(id)?;
        require(manifest, Module::Source)?;

        let mut dependencies = IndexSet::new();
        for &dependency_id in &manifest.feature_dependencies {
            let dependency = self.graph.manifest(dependency_id)?;
            let name = if dependency.has_interface_module() {
                dependency.interface_name()
            } else {
                dependency.source_name()
            };
            dependencies.insert(TargetDependency::target(name));
        }
        // Basic dependencies already arrive through the interface.
        if manifest.has_interface_module() {
            dependencies.insert(TargetDependency::target(manifest.interface_name()));
        } else {
            dependencies.extend(manifest.basic_dependencies.iter().cloned());
        }

        let mut target = base_target(manifest, Module::Source, manifest.source_product);
        target.info_plist = manifest.source_info_plist.clone();
        target.resources = manifest.resources_for_source.clone();
        target.entitlements = manifest.source_entitlements.clone();
        target.settings = manifest.source_settings.clone();
        target.dependencies = dependencies.into_iter().collect();
        Ok(log_derived(target))
    }

    /// Test doubles, built against the interface only.
    pub fn testing(&self, id: FeatureId) -> Result<Target, ManifestError> {
        let manifest = self.graph.manifest(id)?;
        require(manifest, Module::Testing)?;
        require_with(manifest, Module::Testing, Module::Interface)?;
        require_compatible_product(manifest, Module::Testing)?;

        let mut target = base_target(manifest, Module::Testing, Product::Framework);
        target.dependencies = vec![TargetDependency::target(manifest.interface_name())];
        Ok(log_derived(target))
    }

    /// Unit test bundle. Links the feature's source plus the transitive
    /// closure of its feature dependencies, then the tests dependencies.
    pub fn unit_tests(&self, id: FeatureId) -> Result<Target, ManifestError> {
        let manifest = self.graph.manifest(id)?;
        require(manifest, Module::UnitTests)?;
        require_with(manifest, Module::UnitTests, Module::Source)?;

        let mut target = base_target(manifest, Module::UnitTests, Product::UnitTests);
        target.dependencies = self.test_dependencies(manifest);
        Ok(log_derived(target))
    }

    /// UI test bundle. Flattens dependencies exactly like unit tests.
    pub fn ui_tests(&self, id: FeatureId) -> Result<Target, ManifestError> {
        let manifest = self.graph.manifest(id)?;
        require(manifest, Module::UiTests)?;

        let mut target = base_target(manifest, Module::UiTests, Product::UiTests);
        target.dependencies = self.test_dependencies(manifest);
        Ok(log_derived(target))
    }

    /// Example app exercising the feature against its direct collaborators.
    ///
    /// Only one level of feature dependencies is linked: their sources and,
    /// where adopted, their testing modules. Source edges are emitted by name
    /// whether or not the dependency adopts a source module.
    pub fn example(&self, id: FeatureId) -> Result<Target, ManifestError> {
        let manifest = self.graph.manifest(id)?;
        let product = match manifest.example_products().as_slice() {
            [] => {
                return Err(ManifestError::ModuleNotAdopted {
                    feature: manifest.base_name.clone(),
                    module: Module::Example,
                })
            }
            [product] => *product,
            products => {
                return Err(ManifestError::MultipleExampleProducts {
                    feature: manifest.base_name.clone(),
                    count: products.len(),
                })
            }
        };
        require_compatible_product(manifest, Module::Example)?;

        let mut dependencies = IndexSet::new();
        dependencies.insert(TargetDependency::target(manifest.source_name()));
        let mut testing = Vec::new();
        for &dependency_id in &manifest.feature_dependencies {
            let dependency = self.graph.manifest(dependency_id)?;
            dependencies.insert(TargetDependency::target(dependency.source_name()));
            if dependency.has_testing_module() {
                testing.push(TargetDependency::target(dependency.testing_name()));
            }
        }
        dependencies.extend(testing);
        if manifest.has_testing_module() {
            dependencies.insert(TargetDependency::target(manifest.testing_name()));
        }

        let mut target = base_target(manifest, Module::Example, product);
        target.info_plist = plist::example_info_plist();
        target.dependencies = dependencies.into_iter().collect();
        Ok(log_derived(target))
    }

    fn test_dependencies(&self, manifest: &FeatureManifest) -> Vec<TargetDependency> {
        let mut features = IndexSet::new();
        for &dependency_id in &manifest.feature_dependencies {
            features.extend(self.descendants(dependency_id).iter().copied());
        }

        let mut dependencies = IndexSet::new();
        dependencies.insert(TargetDependency::target(manifest.source_name()));
        for id in features {
            let Some(dependency) = self.graph.get(id) else {
                continue;
            };
            dependencies.insert(TargetDependency::target(dependency.source_name()));
            if dependency.has_testing_module() {
                dependencies.insert(TargetDependency::target(dependency.testing_name()));
            }
        }
        dependencies.extend(manifest.tests_dependencies.iter().cloned());
        dependencies.into_iter().collect()
    }
}

fn require(manifest: &FeatureManifest, module: Module) -> Result<(), ManifestError> {
    if manifest.has_module(module) {
        Ok(())
    } else {
        Err(ManifestError::ModuleNotAdopted {
            feature: manifest.base_name.clone(),
            module,
        })
    }
}

fn require_with(
    manifest: &FeatureManifest,
    module: Module,
    required: Module,
) -> Result<(), ManifestError> {
    if manifest.has_module(required) {
        Ok(())
    } else {
        Err(ManifestError::MissingRequiredModule {
            feature: manifest.base_name.clone(),
            module,
            required,
        })
    }
}

fn require_compatible_product(
    manifest: &FeatureManifest,
    module: Module,
) -> Result<(), ManifestError> {
    if manifest.source_product.supports_auxiliary_modules() {
        Ok(())
    } else {
        Err(ManifestError::IncompatibleProduct {
            feature: manifest.base_name.clone(),
            module,
            product: manifest.source_product,
        })
    }
}

/// A target with the fields every module shares; callers fill in the rest.
fn base_target(manifest: &FeatureManifest, module: Module, product: Product) -> Target {
    Target {
        name: manifest.module_name(module),
        destinations: manifest.destinations.clone(),
        product,
        product_name: None,
        bundle_id: manifest.bundle_id(module),
        deployment_targets: manifest.deployment_targets.clone(),
        info_plist: InfoPlist::Default,
        sources: manifest.sources_glob(module),
        resources: None,
        entitlements: None,
        scripts: Vec::new(),
        dependencies: Vec::new(),
        settings: None,
        environment_variables: BTreeMap::new(),
        launch_arguments: Vec::new(),
        merged_binary_type: MergedBinaryType::Disabled,
        mergeable: false,
    }
}

fn log_derived(target: Target) -> Target {
    tracing::debug!(
        target_name = %target.name,
        product = %target.product,
        dependencies = target.dependencies.len(),
        "derived target"
    );
    target
}
