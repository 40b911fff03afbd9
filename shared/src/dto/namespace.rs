use serde::{Deserialize, Serialize};

/// Namespace listing (`GET /get_all_namespaces`)
///
/// Each namespace is one book the book-wise bot can answer questions about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceList {
    #[serde(default)]
    pub data: Vec<NamespaceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamespaceItem {
    pub namespace: String,
}

impl NamespaceList {
    /// Namespace names in server order.
    pub fn into_names(self) -> Vec<String> {
        self.data.into_iter().map(|item| item.namespace).collect()
    }
}
