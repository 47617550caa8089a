use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DeploymentTargets, Destinations, Product};

/// A value inside an Info.plist or entitlements dictionary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlistValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Array(Vec<PlistValue>),
    Dictionary(BTreeMap<String, PlistValue>),
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PlistValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// How a target's Info.plist is produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum InfoPlist {
    /// The host tool's generated default.
    #[default]
    Default,
    /// An existing file, relative to the project manifest.
    File(String),
    /// The default plist with these keys added or replaced.
    ExtendingDefault(BTreeMap<String, PlistValue>),
    /// A fully specified dictionary.
    Dictionary(BTreeMap<String, PlistValue>),
}

/// A resource entry copied into a target's bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ResourceFileElement {
    Glob {
        pattern: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        excluding: Vec<String>,
    },
    FolderReference {
        path: String,
    },
}

impl ResourceFileElement {
    pub fn glob(pattern: impl Into<String>) -> Self {
        Self::Glob {
            pattern: pattern.into(),
            excluding: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum Entitlements {
    File(String),
    Dictionary(BTreeMap<String, PlistValue>),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ScriptOrder {
    #[default]
    Pre,
    Post,
}

/// A build-phase script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TargetScript {
    pub name: String,
    pub script: String,
    #[serde(default)]
    pub order: ScriptOrder,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub input_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_paths: Vec<String>,
    #[serde(default = "default_true")]
    pub based_on_dependency_analysis: bool,
}

fn default_true() -> bool {
    true
}

/// Build settings. `base` applies to every configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub base: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub debug: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub release: BTreeMap<String, String>,
}

/// An edge from a target to something it links against.
///
/// Only `Target` edges are produced by resolution; the other variants come
/// from a manifest's external and test dependency lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TargetDependency {
    /// Another target in the same project.
    Target { name: String },
    /// A target in another project.
    Project { target: String, path: String },
    /// A product of an external package resolved by the package manager.
    External { name: String },
    /// A product of a local Swift package.
    Package { product: String },
    /// A system SDK (`XCTest`, `libc++.tbd`, ...).
    Sdk {
        name: String,
        #[serde(default)]
        optional: bool,
    },
    Framework { path: String },
    Xcframework { path: String },
}

impl TargetDependency {
    pub fn target(name: impl Into<String>) -> Self {
        Self::Target { name: name.into() }
    }

    pub fn external(name: impl Into<String>) -> Self {
        Self::External { name: name.into() }
    }

    /// The referenced name, whatever the edge kind.
    pub fn name(&self) -> &str {
        match self {
            Self::Target { name } | Self::External { name } | Self::Sdk { name, .. } => name,
            Self::Project { target, .. } => target,
            Self::Package { product } => product,
            Self::Framework { path } | Self::Xcframework { path } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MergedBinaryType {
    #[default]
    Disabled,
    Automatic,
    Manual,
}

/// A fully specified build target, as consumed by the host build tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub name: String,
    pub destinations: Destinations,
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    pub bundle_id: String,
    pub deployment_targets: DeploymentTargets,
    pub info_plist: InfoPlist,
    /// Glob pattern, e.g. `Sources/Services/FirstService/Source/**`.
    pub sources: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceFileElement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitlements: Option<Entitlements>,
    #[serde(default)]
    pub scripts: Vec<TargetScript>,
    #[serde(default)]
    pub dependencies: Vec<TargetDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default)]
    pub environment_variables: BTreeMap<String, String>,
    #[serde(default)]
    pub launch_arguments: Vec<String>,
    #[serde(default)]
    pub merged_binary_type: MergedBinaryType,
    #[serde(default)]
    pub mergeable: bool,
}

impl Target {
    /// Names of `Target` edges, in order. External edges are skipped.
    pub fn target_dependency_names(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter_map(|dependency| match dependency {
                TargetDependency::Target { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}
