use serde::{Deserialize, Serialize};

/// Grouping within a category; ids are only unique inside their category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl SubCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// Top-level grouping for resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub resource_types: Vec<SubCategory>,
}

impl Category {
    pub fn sub_category(&self, sub_category_id: &str) -> Option<&SubCategory> {
        self.resource_types
            .iter()
            .find(|sub| sub.id == sub_category_id)
    }

    /// Sub-category ids in declaration order.
    pub fn sub_category_ids(&self) -> Vec<&str> {
        self.resource_types.iter().map(|sub| sub.id.as_str()).collect()
    }
}
