use microfeature::loader::{load_workspace, LoadError, WorkspaceFile};
use microfeature::models::*;
use microfeature::ModuleResolver;
use speculate2::speculate;

const EXAMPLE_WORKSPACE: &str = include_str!("../demos/example-workspace.json");

fn names(target: &Target) -> Vec<&str> {
    target.dependencies.iter().map(|d| d.name()).collect()
}

speculate! {
    describe "example workspace" {
        before {
            let workspace = WorkspaceFile::from_json(EXAMPLE_WORKSPACE).expect("Failed to parse workspace");
            let graph = workspace.into_graph(None).expect("Failed to build graph");
            let resolver = ModuleResolver::new(&graph).expect("Example graph should be valid");
        }

        it "declares every feature in order" {
            assert_eq!(graph.len(), 7);
            assert_eq!(graph.find("FirstService"), Some(FeatureId(0)));
            assert_eq!(graph.find("IOSAppFeature"), Some(FeatureId(6)));
        }

        it "resolves every adopted module" {
            let targets = resolver.resolve_all().expect("resolve");
            assert_eq!(targets.len(), 4 + 3 + 4 + 2 + 3 + 3 + 1);
        }

        it "flattens the home scene's unit tests" {
            let home = graph.find("IOSHomeScene").unwrap();
            let target = resolver.unit_tests(home).unwrap();
            assert_eq!(names(&target), vec![
                "IOSHomeSceneSource",
                "IOSSupportSource",
                "FirstUseCaseSource",
                "FirstServiceSource",
                "FirstServiceTesting",
                "SecondUseCaseSource",
                "SecondUseCaseTesting",
            ]);
            assert_eq!(target.sources, "Sources/IOSScenes/IOSHomeScene/Tests/UnitTests/**");
            assert_eq!(target.bundle_id, "MicroFeatureExample.IOSHomeSceneUnitTests");
        }

        it "links the home scene example one level deep" {
            let home = graph.find("IOSHomeScene").unwrap();
            let target = resolver.example(home).unwrap();
            assert_eq!(names(&target), vec![
                "IOSHomeSceneSource",
                "IOSSupportSource",
                "FirstUseCaseSource",
                "SecondUseCaseSource",
                "SecondUseCaseTesting",
            ]);
        }

        it "wires the app's source with its configuration" {
            let app = graph.find("IOSAppFeature").unwrap();
            let target = resolver.source(app).unwrap();
            assert_eq!(target.product, Product::App);
            assert_eq!(names(&target), vec!["IOSLoginSceneSource", "IOSHomeSceneSource", "RxSwift"]);
            assert_eq!(target.info_plist, InfoPlist::File("Resources/InfoPlist/Info.plist".to_string()));
            assert_eq!(target.resources, Some(vec![ResourceFileElement::glob("Resources/Common/**")]));
            assert_eq!(target.sources, "Sources/IOSAppFeature/Source/**");
        }

        it "inherits workspace destinations and deployment targets" {
            let service = graph.find("FirstService").unwrap();
            let target = resolver.interface(service).unwrap();
            assert_eq!(target.destinations, Destinations::ios());
            assert_eq!(target.deployment_targets, DeploymentTargets::ios("17.0"));
        }

        it "serializes the project in the host tool's vocabulary" {
            let project = resolver.project("MicroFeatureExample").unwrap();
            let json = serde_json::to_value(&project).unwrap();
            let first = &json["targets"][0];

            assert_eq!(json["name"], "MicroFeatureExample");
            assert_eq!(first["name"], "FirstServiceInterface");
            assert_eq!(first["bundleId"], "MicroFeatureExample.FirstServiceInterface");
            assert_eq!(first["product"], "framework");
            assert_eq!(first["mergedBinaryType"], "disabled");
            assert_eq!(first["mergeable"], false);
            assert_eq!(first["deploymentTargets"]["iOS"], "17.0");
            assert_eq!(first["infoPlist"]["type"], "default");
        }
    }

    describe "workspace declarations" {
        it "resolves forward references by name" {
            let workspace = WorkspaceFile::from_json(r#"{
                "name": "Forward",
                "baseBundleId": "com.example",
                "features": [
                    { "name": "Scene", "product": "framework", "dependencies": ["Service"], "modules": ["source"] },
                    { "name": "Service", "product": "framework", "modules": ["source"] }
                ]
            }"#).unwrap();
            let graph = workspace.into_graph(None).unwrap();

            let scene = graph.get(FeatureId(0)).unwrap();
            assert_eq!(scene.feature_dependencies, vec![FeatureId(1)]);
        }

        it "rejects unknown dependency names" {
            let workspace = WorkspaceFile::from_json(r#"{
                "name": "Broken",
                "baseBundleId": "com.example",
                "features": [
                    { "name": "Scene", "product": "framework", "dependencies": ["Ghost"], "modules": ["source"] }
                ]
            }"#).unwrap();

            match workspace.into_graph(None) {
                Err(LoadError::UnknownDependency { feature, dependency }) => {
                    assert_eq!(feature, "Scene");
                    assert_eq!(dependency, "Ghost");
                }
                other => panic!("expected UnknownDependency, got {:?}", other.map(|g| g.len())),
            }
        }

        it "falls back to the configured bundle id" {
            let json = r#"{
                "name": "NoBundle",
                "features": [
                    { "name": "Scene", "product": "framework", "modules": ["source"] },
                    { "name": "Other", "product": "framework", "baseBundleId": "org.other", "modules": ["source"] }
                ]
            }"#;

            let missing = WorkspaceFile::from_json(json).unwrap().into_graph(None);
            assert!(matches!(missing, Err(LoadError::MissingBundleId { .. })));

            let graph = WorkspaceFile::from_json(json).unwrap().into_graph(Some("com.fallback")).unwrap();
            assert_eq!(graph.get(FeatureId(0)).unwrap().base_bundle_id, "com.fallback");
            assert_eq!(graph.get(FeatureId(1)).unwrap().base_bundle_id, "org.other");
        }

        it "rejects features without modules" {
            let workspace = WorkspaceFile::from_json(r#"{
                "name": "Empty",
                "baseBundleId": "com.example",
                "features": [ { "name": "Scene", "product": "framework", "modules": [] } ]
            }"#).unwrap();

            assert!(matches!(workspace.into_graph(None), Err(LoadError::NoModules(name)) if name == "Scene"));
        }

        it "leaves cycles for validation" {
            let workspace = WorkspaceFile::from_json(r#"{
                "name": "Cyclic",
                "baseBundleId": "com.example",
                "features": [
                    { "name": "A", "product": "framework", "dependencies": ["B"], "modules": ["source"] },
                    { "name": "B", "product": "framework", "dependencies": ["A"], "modules": ["source"] }
                ]
            }"#).unwrap();
            let graph = workspace.into_graph(None).unwrap();

            let errors = graph.validate().unwrap_err();
            assert_eq!(errors.errors()[0].to_string(), "dependency cycle detected: A → B → A");
        }

        it "reports malformed json" {
            assert!(matches!(WorkspaceFile::from_json("{ \"name\": 3 }"), Err(LoadError::Parse(_))));
        }
    }

    describe "files" {
        it "loads a workspace from disk" {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("workspace.json");
            std::fs::write(&path, EXAMPLE_WORKSPACE).unwrap();

            let (name, graph) = load_workspace(&path, None).unwrap();
            assert_eq!(name, "MicroFeatureExample");
            assert_eq!(graph.len(), 7);
        }

        it "reports missing files" {
            let dir = tempfile::tempdir().unwrap();
            let result = load_workspace(&dir.path().join("missing.json"), None);
            assert!(matches!(result, Err(LoadError::Io { .. })));
        }
    }
}
