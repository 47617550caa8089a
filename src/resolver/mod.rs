//! Target resolution over a validated feature graph.
//!
//! [`ModuleResolver`] is the entry point: it validates the graph once on
//! construction, then derives targets on demand.
//!
//! - [`ModuleResolver::resolve_modules`] returns every adopted module of one
//!   feature in resolution order and never fails on an absent module.
//! - The per-module derivations ([`interface`](ModuleResolver::interface),
//!   [`source`](ModuleResolver::source), ...) return
//!   [`ManifestError::ModuleNotAdopted`] when asked for an absent module.
//!
//! Transitive closures used by test targets are memoized per feature, so a
//! diamond-shaped graph is walked once per node.

mod derive;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexSet;

use crate::error::{ManifestError, ValidationErrors};
use crate::graph::FeatureGraph;
use crate::models::{FeatureId, Module, Project, Target};

pub struct ModuleResolver<'g> {
    graph: &'g FeatureGraph,
    closures: RefCell<HashMap<FeatureId, Rc<[FeatureId]>>>,
}

impl<'g> ModuleResolver<'g> {
    /// Validate `graph` and build a resolver over it.
    pub fn new(graph: &'g FeatureGraph) -> Result<Self, ValidationErrors> {
        graph.validate()?;
        Ok(Self {
            graph,
            closures: RefCell::new(HashMap::new()),
        })
    }

    pub fn graph(&self) -> &'g FeatureGraph {
        self.graph
    }

    /// Derive the target of one module.
    pub fn target(&self, id: FeatureId, module: Module) -> Result<Target, ManifestError> {
        match module {
            Module::Interface => self.interface(id),
            Module::Source => self.source(id),
            Module::Testing => self.testing(id),
            Module::UnitTests => self.unit_tests(id),
            Module::UiTests => self.ui_tests(id),
            Module::Example => self.example(id),
        }
    }

    /// Targets of every adopted module of `id`, in the order interface,
    /// source, testing, unit tests, UI tests, example.
    pub fn resolve_modules(&self, id: FeatureId) -> Result<Vec<Target>, ManifestError> {
        let manifest = self.graph.manifest(id)?;
        manifest
            .modules()
            .into_iter()
            .map(|module| self.target(id, module))
            .collect()
    }

    /// Targets of every feature, in insertion order.
    pub fn resolve_all(&self) -> Result<Vec<Target>, ManifestError> {
        let mut targets = Vec::new();
        for id in self.graph.ids() {
            targets.extend(self.resolve_modules(id)?);
        }
        tracing::info!(
            features = self.graph.len(),
            targets = targets.len(),
            "resolved feature graph"
        );
        Ok(targets)
    }

    /// Assemble every resolved target into one project.
    pub fn project(&self, name: impl Into<String>) -> Result<Project, ManifestError> {
        Ok(Project {
            name: name.into(),
            targets: self.resolve_all()?,
        })
    }

    /// Features `id` contributes to a dependent's test targets: itself, then
    /// the same for each of its feature dependencies, depth first, each
    /// feature once.
    ///
    /// A feature without a source module contributes nothing, including its
    /// own descendants. That case is logged and resolution continues.
    fn descendants(&self, id: FeatureId) -> Rc<[FeatureId]> {
        if let Some(cached) = self.closures.borrow().get(&id) {
            return Rc::clone(cached);
        }

        let mut features = IndexSet::new();
        match self.graph.get(id) {
            Some(manifest) if manifest.has_source_module() => {
                features.insert(id);
                for &child in &manifest.feature_dependencies {
                    features.extend(self.descendants(child).iter().copied());
                }
            }
            Some(manifest) => {
                tracing::error!(
                    feature = %manifest.base_name,
                    "feature doesn't have source module; skipping it and its dependencies"
                );
            }
            None => {}
        }

        let closure: Rc<[FeatureId]> = features.into_iter().collect();
        self.closures.borrow_mut().insert(id, Rc::clone(&closure));
        closure
    }
}
