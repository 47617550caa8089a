use serde::{Deserialize, Serialize};

use super::Target;

/// The assembled project handed to the host build tool.
///
/// Targets appear feature by feature in graph insertion order, and within a
/// feature in module resolution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub targets: Vec<Target>,
}

impl Project {
    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|target| target.name == name)
    }

    pub fn target_names(&self) -> Vec<&str> {
        self.targets.iter().map(|target| target.name.as_str()).collect()
    }
}
