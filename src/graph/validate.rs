//! Whole-graph validation.
//!
//! Every configuration error is collected in one pass so an author sees all
//! of them at once. A graph that passes is safe to resolve: every id is
//! known, there are no cycles, and every adopted module has the modules and
//! product it needs. UI tests and examples without a source module are only
//! warned about.

use std::collections::HashMap;

use super::FeatureGraph;
use crate::error::{ManifestError, ValidationErrors};
use crate::models::{FeatureId, FeatureManifest, Module};

pub fn validate(graph: &FeatureGraph) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    check_names(graph, &mut errors);
    for (_, manifest) in graph.iter() {
        check_dependencies(graph, manifest, &mut errors);
        check_modules(manifest, &mut errors);
    }
    check_cycles(graph, &mut errors);

    if errors.is_empty() {
        tracing::debug!(features = graph.len(), "feature graph is valid");
    }
    ValidationErrors::check(errors)
}

fn check_names(graph: &FeatureGraph, errors: &mut Vec<ManifestError>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();

    for (id, manifest) in graph.iter() {
        if manifest.base_name.is_empty() {
            errors.push(ManifestError::EmptyFeatureName { id });
            continue;
        }
        let count = counts.entry(manifest.base_name.as_str()).or_insert(0);
        if *count == 0 {
            order.push(manifest.base_name.as_str());
        }
        *count += 1;
    }

    for name in order {
        let count = counts[name];
        if count > 1 {
            errors.push(ManifestError::DuplicateFeatureName {
                name: name.to_string(),
                count,
            });
        }
    }
}

fn check_dependencies(
    graph: &FeatureGraph,
    manifest: &FeatureManifest,
    errors: &mut Vec<ManifestError>,
) {
    let has_flattening_modules = manifest.has_unit_tests_module()
        || manifest.has_ui_tests_module()
        || manifest.has_example_module();

    for &dependency in &manifest.feature_dependencies {
        match graph.get(dependency) {
            None => errors.push(ManifestError::UnknownDependency {
                feature: manifest.base_name.clone(),
                dependency,
            }),
            Some(target) if has_flattening_modules && !target.has_source_module() => {
                // Not fatal: test closures skip the dependency and log it again.
                tracing::warn!(
                    feature = %manifest.base_name,
                    dependency = %target.base_name,
                    "dependency has no source module and will be left out of test targets"
                );
            }
            Some(_) => {}
        }
    }
}

fn check_modules(manifest: &FeatureManifest, errors: &mut Vec<ManifestError>) {
    let feature = || manifest.base_name.clone();
    let product = manifest.source_product;
    let incompatible = |module| ManifestError::IncompatibleProduct {
        feature: feature(),
        module,
        product,
    };
    let requires = |module, required| ManifestError::MissingRequiredModule {
        feature: feature(),
        module,
        required,
    };

    if manifest.has_interface_module() && !product.supports_auxiliary_modules() {
        errors.push(incompatible(Module::Interface));
    }

    if manifest.has_testing_module() {
        if !manifest.has_interface_module() {
            errors.push(requires(Module::Testing, Module::Interface));
        }
        if !product.supports_auxiliary_modules() {
            errors.push(incompatible(Module::Testing));
        }
    }

    if manifest.has_unit_tests_module() && !manifest.has_source_module() {
        errors.push(requires(Module::UnitTests, Module::Source));
    }

    // UI tests and examples still resolve without a source; their own
    // source edge is then left for the host tool to report.
    for module in [Module::UiTests, Module::Example] {
        if manifest.has_module(module) && !manifest.has_source_module() {
            tracing::warn!(
                feature = %manifest.base_name,
                %module,
                "module links a source target the feature doesn't adopt"
            );
        }
    }

    let example_products = manifest.example_products();
    if !example_products.is_empty() {
        if example_products.len() > 1 {
            errors.push(ManifestError::MultipleExampleProducts {
                feature: feature(),
                count: example_products.len(),
            });
        }
        if !product.supports_auxiliary_modules() {
            errors.push(incompatible(Module::Example));
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Depth-first search reporting one path per back edge.
fn check_cycles(graph: &FeatureGraph, errors: &mut Vec<ManifestError>) {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut stack = Vec::new();

    for id in graph.ids() {
        if marks[id.0] == Mark::Unvisited {
            visit(graph, id, &mut marks, &mut stack, errors);
        }
    }
}

fn visit(
    graph: &FeatureGraph,
    id: FeatureId,
    marks: &mut [Mark],
    stack: &mut Vec<FeatureId>,
    errors: &mut Vec<ManifestError>,
) {
    let Some(manifest) = graph.get(id) else {
        return;
    };

    marks[id.0] = Mark::InProgress;
    stack.push(id);

    for &dependency in &manifest.feature_dependencies {
        // Dangling ids are reported by check_dependencies.
        let Some(mark) = marks.get(dependency.0).copied() else {
            continue;
        };
        match mark {
            Mark::Unvisited => visit(graph, dependency, marks, stack, errors),
            Mark::InProgress => {
                let start = stack
                    .iter()
                    .position(|&on_stack| on_stack == dependency)
                    .unwrap_or(0);
                let path = stack[start..]
                    .iter()
                    .chain(std::iter::once(&dependency))
                    .filter_map(|&member| graph.get(member))
                    .map(|member| member.base_name.clone())
                    .collect();
                errors.push(ManifestError::DependencyCycle { path });
            }
            Mark::Done => {}
        }
    }

    stack.pop();
    marks[id.0] = Mark::Done;
}
