use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The build artifact kind of a target.
///
/// Names serialize in the host tool's camelCase vocabulary (`staticFramework`,
/// `uiTests`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Product {
    App,
    StaticLibrary,
    DynamicLibrary,
    Framework,
    StaticFramework,
    UnitTests,
    UiTests,
    Bundle,
    CommandLineTool,
    AppExtension,
    Watch2App,
    Watch2Extension,
    TvTopShelfExtension,
    MessagesExtension,
    StickerPackExtension,
    AppClip,
    Xpc,
    SystemExtension,
    ExtensionKitExtension,
    Macro,
}

impl Product {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::StaticLibrary => "staticLibrary",
            Self::DynamicLibrary => "dynamicLibrary",
            Self::Framework => "framework",
            Self::StaticFramework => "staticFramework",
            Self::UnitTests => "unitTests",
            Self::UiTests => "uiTests",
            Self::Bundle => "bundle",
            Self::CommandLineTool => "commandLineTool",
            Self::AppExtension => "appExtension",
            Self::Watch2App => "watch2App",
            Self::Watch2Extension => "watch2Extension",
            Self::TvTopShelfExtension => "tvTopShelfExtension",
            Self::MessagesExtension => "messagesExtension",
            Self::StickerPackExtension => "stickerPackExtension",
            Self::AppClip => "appClip",
            Self::Xpc => "xpc",
            Self::SystemExtension => "systemExtension",
            Self::ExtensionKitExtension => "extensionKitExtension",
            Self::Macro => "macro",
        }
    }

    /// Whether a feature whose source module builds this product may also
    /// carry interface, testing and example modules.
    ///
    /// Only framework and library products can be linked into sibling
    /// modules; an app or extension cannot.
    pub fn supports_auxiliary_modules(&self) -> bool {
        matches!(
            self,
            Self::Framework
                | Self::StaticFramework
                | Self::StaticLibrary
                | Self::DynamicLibrary
                | Self::Macro
        )
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single platform/device a target can run on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Destination {
    #[serde(rename = "iPhone")]
    IPhone,
    #[serde(rename = "iPad")]
    IPad,
    #[serde(rename = "mac")]
    Mac,
    #[serde(rename = "macWithiPadDesign")]
    MacWithIPadDesign,
    #[serde(rename = "macCatalyst")]
    MacCatalyst,
    #[serde(rename = "appleWatch")]
    AppleWatch,
    #[serde(rename = "appleTv")]
    AppleTv,
    #[serde(rename = "appleVision")]
    AppleVision,
    #[serde(rename = "appleVisionWithiPadDesign")]
    AppleVisionWithIPadDesign,
}

/// The set of destinations shared by every module of a feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Destinations(pub BTreeSet<Destination>);

impl Destinations {
    pub fn ios() -> Self {
        Self::from_iter([
            Destination::IPhone,
            Destination::IPad,
            Destination::MacWithIPadDesign,
            Destination::AppleVisionWithIPadDesign,
        ])
    }

    pub fn macos() -> Self {
        Self::from_iter([Destination::Mac])
    }

    pub fn watchos() -> Self {
        Self::from_iter([Destination::AppleWatch])
    }

    pub fn tvos() -> Self {
        Self::from_iter([Destination::AppleTv])
    }

    pub fn visionos() -> Self {
        Self::from_iter([Destination::AppleVision])
    }

    pub fn contains(&self, destination: Destination) -> bool {
        self.0.contains(&destination)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Destination> for Destinations {
    fn from_iter<I: IntoIterator<Item = Destination>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Minimum OS versions per platform. Unset platforms are omitted from output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentTargets {
    #[serde(rename = "iOS", default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
    #[serde(rename = "macOS", default, skip_serializing_if = "Option::is_none")]
    pub macos: Option<String>,
    #[serde(rename = "watchOS", default, skip_serializing_if = "Option::is_none")]
    pub watchos: Option<String>,
    #[serde(rename = "tvOS", default, skip_serializing_if = "Option::is_none")]
    pub tvos: Option<String>,
    #[serde(rename = "visionOS", default, skip_serializing_if = "Option::is_none")]
    pub visionos: Option<String>,
}

impl DeploymentTargets {
    pub fn ios(version: impl Into<String>) -> Self {
        Self {
            ios: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn macos(version: impl Into<String>) -> Self {
        Self {
            macos: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn watchos(version: impl Into<String>) -> Self {
        Self {
            watchos: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn tvos(version: impl Into<String>) -> Self {
        Self {
            tvos: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn visionos(version: impl Into<String>) -> Self {
        Self {
            visionos: Some(version.into()),
            ..Self::default()
        }
    }
}
