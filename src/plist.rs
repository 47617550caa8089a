//! Fixed Info.plist of example app targets.

use crate::models::{InfoPlist, PlistValue};

/// Class name the single default scene configuration points at.
pub const SCENE_DELEGATE_CLASS: &str = "$(PRODUCT_MODULE_NAME).SceneDelegate";

pub const LOCALIZATIONS: [&str; 7] = ["en", "ko", "zh", "de", "it", "fr", "ja"];

pub const INTERFACE_ORIENTATIONS: [&str; 4] = [
    "UIInterfaceOrientationLandscapeLeft",
    "UIInterfaceOrientationLandscapeRight",
    "UIInterfaceOrientationPortrait",
    "UIInterfaceOrientationPortraitUpsideDown",
];

fn dictionary<const N: usize>(entries: [(&str, PlistValue); N]) -> PlistValue {
    PlistValue::Dictionary(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

fn strings(values: &[&str]) -> PlistValue {
    PlistValue::Array(values.iter().map(|&value| value.into()).collect())
}

/// The Info.plist every example target gets: bundle metadata build
/// variables, one non-multiple scene wired to `SceneDelegate`, all four
/// orientations and a fixed localization list.
pub fn example_info_plist() -> InfoPlist {
    let scene_manifest = dictionary([
        ("UIApplicationSupportsMultipleScenes", false.into()),
        (
            "UISceneConfigurations",
            dictionary([(
                "UIWindowSceneSessionRoleApplication",
                PlistValue::Array(vec![dictionary([
                    ("UISceneDelegateClassName", SCENE_DELEGATE_CLASS.into()),
                    ("UISceneConfigurationName", "DefaultConfiguration".into()),
                ])]),
            )]),
        ),
    ]);

    let entries: [(&str, PlistValue); 13] = [
        ("CFBundleDevelopmentRegion", "en".into()),
        ("CFBundleExecutable", "$(EXECUTABLE_NAME)".into()),
        ("CFBundleIdentifier", "$(PRODUCT_BUNDLE_IDENTIFIER)".into()),
        ("CFBundleInfoDictionaryVersion", "6.0".into()),
        ("CFBundleName", "$(PRODUCT_NAME)".into()),
        ("CFBundlePackageType", "$(PRODUCT_BUNDLE_PACKAGE_TYPE)".into()),
        ("CFBundleShortVersionString", "1.0.0".into()),
        ("CFBundleVersion", "1".into()),
        ("LSRequiresIPhoneOS", true.into()),
        ("UIApplicationSceneManifest", scene_manifest),
        ("CFBundleLocalizations", strings(&LOCALIZATIONS)),
        ("UISupportedInterfaceOrientations", strings(&INTERFACE_ORIENTATIONS)),
        ("UILaunchStoryboardName", "".into()),
    ];

    InfoPlist::Dictionary(
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn entries() -> BTreeMap<String, PlistValue> {
        match example_info_plist() {
            InfoPlist::Dictionary(entries) => entries,
            other => panic!("expected dictionary, got {:?}", other),
        }
    }

    #[test]
    fn test_has_all_top_level_keys() {
        let keys: Vec<String> = entries().into_keys().collect();
        assert_eq!(keys.len(), 13);
        assert!(keys.contains(&"UIApplicationSceneManifest".to_string()));
        assert!(keys.contains(&"UILaunchStoryboardName".to_string()));
    }

    #[test]
    fn test_bundle_metadata_values() {
        let entries = entries();
        assert_eq!(entries["CFBundleVersion"], PlistValue::from("1"));
        assert_eq!(entries["CFBundleShortVersionString"], PlistValue::from("1.0.0"));
        assert_eq!(entries["LSRequiresIPhoneOS"], PlistValue::Bool(true));
        assert_eq!(entries["UILaunchStoryboardName"], PlistValue::from(""));
    }

    #[test]
    fn test_scene_manifest_json_shape() {
        let entries = entries();
        let json = serde_json::to_value(&entries["UIApplicationSceneManifest"]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "UIApplicationSupportsMultipleScenes": false,
                "UISceneConfigurations": {
                    "UIWindowSceneSessionRoleApplication": [{
                        "UISceneConfigurationName": "DefaultConfiguration",
                        "UISceneDelegateClassName": "$(PRODUCT_MODULE_NAME).SceneDelegate"
                    }]
                }
            })
        );
    }

    #[test]
    fn test_orientations_and_localizations() {
        let entries = entries();
        assert_eq!(
            entries["UISupportedInterfaceOrientations"],
            strings(&INTERFACE_ORIENTATIONS)
        );
        assert_eq!(entries["CFBundleLocalizations"], strings(&LOCALIZATIONS));
    }
}
