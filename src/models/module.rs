use serde::{Deserialize, Serialize};

use super::Product;

/// One of the six build artifacts a feature may produce.
///
/// Variant order is the canonical resolution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Module {
    Interface,
    Source,
    Testing,
    UnitTests,
    UiTests,
    Example,
}

impl Module {
    /// Every module kind, in resolution order.
    pub const ALL: [Module; 6] = [
        Module::Interface,
        Module::Source,
        Module::Testing,
        Module::UnitTests,
        Module::UiTests,
        Module::Example,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Source => "source",
            Self::Testing => "testing",
            Self::UnitTests => "unitTests",
            Self::UiTests => "uiTests",
            Self::Example => "example",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "interface" => Some(Self::Interface),
            "source" => Some(Self::Source),
            "testing" => Some(Self::Testing),
            "unitTests" | "unit-tests" => Some(Self::UnitTests),
            "uiTests" | "ui-tests" => Some(Self::UiTests),
            "example" => Some(Self::Example),
            _ => None,
        }
    }

    /// Appended to a feature's base name to form the target name.
    pub fn name_suffix(&self) -> &'static str {
        match self {
            Self::Interface => "Interface",
            Self::Source => "Source",
            Self::Testing => "Testing",
            Self::UnitTests => "UnitTests",
            Self::UiTests => "UITests",
            Self::Example => "Example",
        }
    }

    /// Directory under `Sources/<group>/<feature>/` holding this module's files.
    pub fn sources_subpath(&self) -> &'static str {
        match self {
            Self::Interface => "Interface",
            Self::Source => "Source",
            Self::Testing => "Testing",
            Self::UnitTests => "Tests/UnitTests",
            Self::UiTests => "Tests/UITests",
            Self::Example => "Example",
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module tag in a feature's adoption set.
///
/// `Example` carries the product its target builds, so two examples with
/// different products are distinct set members. Validation rejects that case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ModuleKind {
    Interface,
    Source,
    Testing,
    UnitTests,
    UiTests,
    Example { product: Product },
}

impl ModuleKind {
    pub fn module(&self) -> Module {
        match self {
            Self::Interface => Module::Interface,
            Self::Source => Module::Source,
            Self::Testing => Module::Testing,
            Self::UnitTests => Module::UnitTests,
            Self::UiTests => Module::UiTests,
            Self::Example { .. } => Module::Example,
        }
    }

    pub fn example(product: Product) -> Self {
        Self::Example { product }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_in_resolution_order() {
        let mut sorted = Module::ALL;
        sorted.sort();
        assert_eq!(sorted, Module::ALL);
        assert_eq!(Module::ALL[0], Module::Interface);
        assert_eq!(Module::ALL[5], Module::Example);
    }

    #[test]
    fn test_from_str_accepts_both_spellings() {
        assert_eq!(Module::from_str("uiTests"), Some(Module::UiTests));
        assert_eq!(Module::from_str("ui-tests"), Some(Module::UiTests));
        assert_eq!(Module::from_str("unit-tests"), Some(Module::UnitTests));
        assert_eq!(Module::from_str("tests"), None);
    }

    #[test]
    fn test_ui_tests_suffix_is_uppercase() {
        assert_eq!(Module::UiTests.name_suffix(), "UITests");
        assert_eq!(Module::UiTests.sources_subpath(), "Tests/UITests");
    }

    #[test]
    fn test_module_kind_serde_shape() {
        let json = serde_json::to_string(&ModuleKind::example(Product::App)).unwrap();
        assert_eq!(json, r#"{"example":{"product":"app"}}"#);

        let kind: ModuleKind = serde_json::from_str(r#""unitTests""#).unwrap();
        assert_eq!(kind, ModuleKind::UnitTests);
    }
}
