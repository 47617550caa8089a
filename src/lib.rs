//! Micro-feature target generation.
//!
//! This crate expands feature declarations into the build targets of an
//! Xcode project: interface, source, testing, unit tests, UI tests and
//! example modules, with bundle ids, source globs and dependencies wired
//! between them.
//!
//! # Usage
//!
//! ```
//! use microfeature::graph::FeatureGraph;
//! use microfeature::models::*;
//! use microfeature::resolver::ModuleResolver;
//!
//! let mut graph = FeatureGraph::new();
//! let service = graph.insert(FeatureManifest::new(
//!     "Service",
//!     "com.example",
//!     Destinations::ios(),
//!     Product::Framework,
//!     DeploymentTargets::ios("17.0"),
//!     [ModuleKind::Interface, ModuleKind::Source],
//! ));
//! let scene = graph.insert(
//!     FeatureManifest::new(
//!         "Scene",
//!         "com.example",
//!         Destinations::ios(),
//!         Product::Framework,
//!         DeploymentTargets::ios("17.0"),
//!         [ModuleKind::Source, ModuleKind::UnitTests],
//!     )
//!     .with_feature_dependencies([service]),
//! );
//!
//! let resolver = ModuleResolver::new(&graph)?;
//! let source = resolver.source(scene)?;
//! assert_eq!(source.target_dependency_names(), ["ServiceInterface"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod models;
pub mod naming;
pub mod plist;
pub mod render;
pub mod resolver;

// Re-export commonly used types at crate root
pub use error::{ManifestError, ValidationErrors};
pub use graph::FeatureGraph;
pub use resolver::ModuleResolver;
