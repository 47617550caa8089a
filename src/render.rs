//! ASCII tree rendering for feature dependency graphs.

use crate::graph::FeatureGraph;
use crate::models::{FeatureId, FeatureManifest, Module};

const CYCLE: char = '↺';

/// Short marker for a module in node labels.
fn module_marker(module: Module) -> &'static str {
    match module {
        Module::Interface => "I",
        Module::Source => "S",
        Module::Testing => "T",
        Module::UnitTests => "UT",
        Module::UiTests => "UI",
        Module::Example => "E",
    }
}

fn label(manifest: &FeatureManifest) -> String {
    let markers: Vec<&str> = manifest.modules().into_iter().map(module_marker).collect();
    format!("{} [{}]", manifest.base_name, markers.join(" "))
}

/// Render every root feature and its dependencies as ASCII art.
///
/// Shared dependencies are printed under every feature that uses them. A
/// dependency already on the current path is printed once with `↺` and not
/// expanded, so unvalidated graphs still render. Features no root reaches
/// (cycles with no dependent outside them) start trees of their own, in
/// insertion order.
///
/// Example output:
/// ```text
/// IOSAppFeature [S]
/// ├── IOSLoginScene [S UT E]
/// │   └── FirstUseCase [I S UT]
/// │       └── FirstService [I S T UT]
/// └── IOSHomeScene [S UT E]
///     └── SecondUseCase [I S T UT]
/// ```
pub fn render_tree(graph: &FeatureGraph) -> String {
    let mut output = String::new();
    let mut path = Vec::new();
    let mut rendered = vec![false; graph.len()];

    for root in graph.roots() {
        render_node(&mut output, graph, root, "", true, true, &mut path, &mut rendered);
    }
    for id in graph.ids() {
        if !rendered[id.0] {
            render_node(&mut output, graph, id, "", true, true, &mut path, &mut rendered);
        }
    }
    output
}

/// Recursively render a node and its dependencies.
#[allow(clippy::too_many_arguments)]
fn render_node(
    output: &mut String,
    graph: &FeatureGraph,
    id: FeatureId,
    prefix: &str,
    is_last: bool,
    is_root: bool,
    path: &mut Vec<FeatureId>,
    rendered: &mut [bool],
) {
    let Some(manifest) = graph.get(id) else {
        return;
    };
    let on_path = path.contains(&id);

    if !is_root {
        let branch = if is_last { "└── " } else { "├── " };
        output.push_str(prefix);
        output.push_str(branch);
    }
    if on_path {
        output.push(CYCLE);
        output.push(' ');
        output.push_str(&manifest.base_name);
        output.push('\n');
        return;
    }
    output.push_str(&label(manifest));
    output.push('\n');
    rendered[id.0] = true;

    let child_prefix = if is_root {
        String::new()
    } else {
        let continuation = if is_last { "    " } else { "│   " };
        format!("{}{}", prefix, continuation)
    };

    path.push(id);
    let children = &manifest.feature_dependencies;
    for (i, &child) in children.iter().enumerate() {
        let child_is_last = i == children.len() - 1;
        render_node(output, graph, child, &child_prefix, child_is_last, false, path, rendered);
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeploymentTargets, Destinations, ModuleKind, Product};

    fn make_feature(name: &str, modules: Vec<ModuleKind>, deps: Vec<FeatureId>) -> FeatureManifest {
        FeatureManifest::new(
            name,
            "com.example",
            Destinations::ios(),
            Product::Framework,
            DeploymentTargets::ios("17.0"),
            modules,
        )
        .with_feature_dependencies(deps)
    }

    #[test]
    fn test_single_root() {
        let mut graph = FeatureGraph::new();
        graph.insert(make_feature("Support", vec![ModuleKind::Source], vec![]));
        assert_eq!(render_tree(&graph), "Support [S]\n");
    }

    #[test]
    fn test_nested_dependencies() {
        let mut graph = FeatureGraph::new();
        let service = graph.insert(make_feature(
            "Service",
            vec![ModuleKind::Interface, ModuleKind::Source, ModuleKind::Testing],
            vec![],
        ));
        let use_case = graph.insert(make_feature(
            "UseCase",
            vec![ModuleKind::Source, ModuleKind::UnitTests],
            vec![service],
        ));
        let support = graph.insert(make_feature("Support", vec![ModuleKind::Source], vec![]));
        graph.insert(make_feature(
            "Scene",
            vec![
                ModuleKind::Source,
                ModuleKind::UiTests,
                ModuleKind::example(Product::App),
            ],
            vec![use_case, support],
        ));

        let expected = "Scene [S UI E]\n├── UseCase [S UT]\n│   └── Service [I S T]\n└── Support [S]\n";
        assert_eq!(render_tree(&graph), expected);
    }

    #[test]
    fn test_cycle_is_not_expanded() {
        let mut graph = FeatureGraph::new();
        graph.insert(make_feature("A", vec![ModuleKind::Source], vec![FeatureId(1)]));
        graph.insert(make_feature("B", vec![ModuleKind::Source], vec![FeatureId(0)]));

        assert_eq!(render_tree(&graph), "A [S]\n└── B [S]\n    └── ↺ A\n");
    }

    #[test]
    fn test_cycle_outside_every_root_still_renders() {
        let mut graph = FeatureGraph::new();
        graph.insert(make_feature("Support", vec![ModuleKind::Source], vec![]));
        graph.insert(make_feature("A", vec![ModuleKind::Source], vec![FeatureId(2)]));
        graph.insert(make_feature("B", vec![ModuleKind::Source], vec![FeatureId(1)]));

        assert_eq!(
            render_tree(&graph),
            "Support [S]\nA [S]\n└── B [S]\n    └── ↺ A\n"
        );
    }
}
