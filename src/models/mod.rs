//! Domain models for microfeature.
//!
//! # Core Concepts
//!
//! ## Declarations
//!
//! - [`FeatureManifest`]: The declared shape of one feature. Immutable once it
//!   is inserted into a [`FeatureGraph`](crate::graph::FeatureGraph).
//! - [`ModuleKind`]: A tag in a manifest's adoption set. [`Module`] is the same
//!   tag without the example product payload.
//! - [`Product`], [`Destinations`], [`DeploymentTargets`]: The host tool's
//!   build vocabulary.
//!
//! ## Derived Values
//!
//! These are computed on demand and never stored on a manifest:
//!
//! - [`Target`]: One build target with its wired [`TargetDependency`] list.
//! - [`Project`]: Every resolved target of a graph, ready for the host tool.

mod feature;
mod module;
mod product;
mod project;
mod target;

pub use feature::*;
pub use module::*;
pub use product::*;
pub use project::*;
pub use target::*;
