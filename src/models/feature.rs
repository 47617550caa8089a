use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    DeploymentTargets, Destinations, Entitlements, InfoPlist, Module, ModuleKind, Product,
    ResourceFileElement, Settings, TargetDependency, TargetScript,
};

/// Handle of a feature inside a [`FeatureGraph`](crate::graph::FeatureGraph).
///
/// Handles are indices into the graph's arena and are only meaningful for the
/// graph that issued them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct FeatureId(pub usize);

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The declared shape of one feature.
///
/// A manifest is built once and never mutated after it is inserted into a
/// graph. Its targets are derived by [`ModuleResolver`](crate::resolver::ModuleResolver)
/// from the manifest plus every feature reachable through
/// `feature_dependencies`.
///
/// # Modules
/// A feature adopts any subset of interface, source, testing, unit tests,
/// UI tests and one example. Interface, testing and example modules require
/// the source product to be a framework or library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureManifest {
    /// Unique within a graph. Target names are `base_name` + module suffix.
    pub base_name: String,
    /// Prefix of every module's bundle identifier, e.g. `com.example.app`.
    pub base_bundle_id: String,
    pub destinations: Destinations,
    /// Product of the source module.
    pub source_product: Product,
    pub deployment_targets: DeploymentTargets,
    pub source_info_plist: InfoPlist,
    /// Optional grouping under `Sources/`, e.g. `Scenes` or `IOS/Scenes`.
    pub source_files_group_path: Option<String>,
    pub resources_for_interface: Option<Vec<ResourceFileElement>>,
    pub resources_for_source: Option<Vec<ResourceFileElement>>,
    pub source_entitlements: Option<Entitlements>,
    /// Build-phase scripts of the interface module.
    pub scripts: Vec<TargetScript>,
    /// Features the source module depends on, in declaration order.
    pub feature_dependencies: Vec<FeatureId>,
    /// Dependencies outside the feature graph (packages, SDKs, frameworks).
    pub basic_dependencies: Vec<TargetDependency>,
    /// Dependencies of the unit and UI test modules only.
    pub tests_dependencies: Vec<TargetDependency>,
    /// Settings of the source module only. Useful when it builds an app.
    pub source_settings: Option<Settings>,
    pub adopted_modules: BTreeSet<ModuleKind>,
}

impl FeatureManifest {
    pub fn new(
        base_name: impl Into<String>,
        base_bundle_id: impl Into<String>,
        destinations: Destinations,
        source_product: Product,
        deployment_targets: DeploymentTargets,
        adopted_modules: impl IntoIterator<Item = ModuleKind>,
    ) -> Self {
        Self {
            base_name: base_name.into(),
            base_bundle_id: base_bundle_id.into(),
            destinations,
            source_product,
            deployment_targets,
            source_info_plist: InfoPlist::Default,
            source_files_group_path: None,
            resources_for_interface: None,
            resources_for_source: None,
            source_entitlements: None,
            scripts: Vec::new(),
            feature_dependencies: Vec::new(),
            basic_dependencies: Vec::new(),
            tests_dependencies: Vec::new(),
            source_settings: None,
            adopted_modules: adopted_modules.into_iter().collect(),
        }
    }

    pub fn with_source_info_plist(mut self, info_plist: InfoPlist) -> Self {
        self.source_info_plist = info_plist;
        self
    }

    pub fn with_group_path(mut self, path: impl Into<String>) -> Self {
        self.source_files_group_path = Some(path.into());
        self
    }

    pub fn with_interface_resources(mut self, resources: Vec<ResourceFileElement>) -> Self {
        self.resources_for_interface = Some(resources);
        self
    }

    pub fn with_source_resources(mut self, resources: Vec<ResourceFileElement>) -> Self {
        self.resources_for_source = Some(resources);
        self
    }

    pub fn with_entitlements(mut self, entitlements: Entitlements) -> Self {
        self.source_entitlements = Some(entitlements);
        self
    }

    pub fn with_scripts(mut self, scripts: Vec<TargetScript>) -> Self {
        self.scripts = scripts;
        self
    }

    pub fn with_feature_dependencies(
        mut self,
        dependencies: impl IntoIterator<Item = FeatureId>,
    ) -> Self {
        self.feature_dependencies = dependencies.into_iter().collect();
        self
    }

    pub fn with_basic_dependencies(mut self, dependencies: Vec<TargetDependency>) -> Self {
        self.basic_dependencies = dependencies;
        self
    }

    pub fn with_tests_dependencies(mut self, dependencies: Vec<TargetDependency>) -> Self {
        self.tests_dependencies = dependencies;
        self
    }

    pub fn with_source_settings(mut self, settings: Settings) -> Self {
        self.source_settings = Some(settings);
        self
    }

    // ============================================================
    // Adoption queries
    // ============================================================

    /// Whether any adopted tag maps to `module`.
    pub fn has_module(&self, module: Module) -> bool {
        self.adopted_modules.iter().any(|kind| kind.module() == module)
    }

    pub fn has_interface_module(&self) -> bool {
        self.has_module(Module::Interface)
    }

    pub fn has_source_module(&self) -> bool {
        self.has_module(Module::Source)
    }

    pub fn has_testing_module(&self) -> bool {
        self.has_module(Module::Testing)
    }

    pub fn has_unit_tests_module(&self) -> bool {
        self.has_module(Module::UnitTests)
    }

    pub fn has_ui_tests_module(&self) -> bool {
        self.has_module(Module::UiTests)
    }

    pub fn has_example_module(&self) -> bool {
        self.has_module(Module::Example)
    }

    /// Products of every adopted example tag. More than one is a
    /// configuration error.
    pub fn example_products(&self) -> Vec<Product> {
        self.adopted_modules
            .iter()
            .filter_map(|kind| match kind {
                ModuleKind::Example { product } => Some(*product),
                _ => None,
            })
            .collect()
    }

    /// Adopted modules in resolution order.
    pub fn modules(&self) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|module| self.has_module(*module))
            .collect()
    }

    // ============================================================
    // Naming
    // ============================================================

    pub fn module_name(&self, module: Module) -> String {
        format!("{}{}", self.base_name, module.name_suffix())
    }

    pub fn interface_name(&self) -> String {
        self.module_name(Module::Interface)
    }

    pub fn source_name(&self) -> String {
        self.module_name(Module::Source)
    }

    pub fn testing_name(&self) -> String {
        self.module_name(Module::Testing)
    }

    /// Source glob of `module`: `Sources[/<group>]/<base_name>/<subpath>/**`.
    pub fn sources_glob(&self, module: Module) -> String {
        let mut sources = String::from("Sources");
        if let Some(group) = &self.source_files_group_path {
            sources.push('/');
            sources.push_str(group);
        }
        format!("{}/{}/{}/**", sources, self.base_name, module.sources_subpath())
    }

    pub fn bundle_id(&self, module: Module) -> String {
        format!(
            "{}.{}",
            self.base_bundle_id,
            crate::naming::to_valid_bundle_identifier(&self.module_name(module))
        )
    }
}
