/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the stores, the HTTP collaborators and the UI layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Value used by every field of the placeholder records
pub const NOT_AVAILABLE: &str = "N/A";

/// Descriptive metadata for one file known to the index server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Name assigned by the file server (e.g., "informe1.pdf")
    pub server_name: String,
    /// Patient the file belongs to
    pub patient: String,
    /// Last update, as reported by the server (date-like, not parsed)
    pub updated_at: String,
    /// Opaque token used to fetch the file contents
    pub fetch_token: String,
}

impl FileRecord {
    pub fn new(
        server_name: impl Into<String>,
        patient: impl Into<String>,
        updated_at: impl Into<String>,
        fetch_token: impl Into<String>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            patient: patient.into(),
            updated_at: updated_at.into(),
            fetch_token: fetch_token.into(),
        }
    }

    /// The all-"N/A" record shown when no metadata exists
    pub fn placeholder() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE)
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

/// One element of the mapping tree served by `/main/mappings`
///
/// Decoding is permissive: only `id` is required, and `null` reads as
/// empty (the index server sends `"children": null` for leaves).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MappingNode {
    pub id: String,
    /// Display label
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<MappingNode>,
}

/// Read a present-but-`null` field as `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl MappingNode {
    pub const ROOT_ID: &'static str = "-1";

    /// Wrap a fetched list in the synthetic root node
    pub fn root(children: Vec<MappingNode>) -> Self {
        Self {
            id: Self::ROOT_ID.to_string(),
            text: "root".to_string(),
            path: String::new(),
            children,
        }
    }

    #[cfg(test)]
    pub fn is_root(&self) -> bool {
        self.id == Self::ROOT_ID
    }

    /// Depth-first search for the first node with `id`
    pub fn find(&self, id: &str) -> Option<&MappingNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(MappingNode::node_count).sum::<usize>()
    }
}

/// The payload of a selection action
///
/// `id` and `path` are what the store needs; anything else the caller
/// sends along is kept in `extra` and handed back untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Selection {
    pub id: String,
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Selection {
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            extra: Map::new(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE)
    }

    /// Attach an extra field to the payload
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl From<&MappingNode> for Selection {
    fn from(node: &MappingNode) -> Self {
        Selection::new(node.id.clone(), node.path.clone()).with("text", node.text.clone())
    }
}

/// Join of the selected tree node with its file metadata
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionComposite {
    /// Metadata from the file registry, or the placeholder record
    pub fs_data: FileRecord,
    /// The selection payload, exactly as it was dispatched
    pub is_data: Selection,
}

impl SelectionComposite {
    pub fn placeholder() -> Self {
        Self {
            fs_data: FileRecord::placeholder(),
            is_data: Selection::placeholder(),
        }
    }
}

impl Default for SelectionComposite {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Profile returned by the OAuth provider
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    /// Provider-side subject identifier
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserProfile {
    /// Best available label for the signed-in user
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mapping_node_defaults_missing_fields() {
        let node: MappingNode = serde_json::from_value(json!({
            "id": "7",
            "extra": true
        }))
        .unwrap();

        assert_eq!(node.id, "7");
        assert!(node.text.is_empty());
        assert!(node.path.is_empty());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_mapping_node_accepts_index_server_shape() {
        let nodes: Vec<MappingNode> = serde_json::from_str(
            r#"[{"id":"1","text":"docs","type":"folder","children":[
                {"id":"2","text":"informe1.pdf","type":"file","children":null}
            ]}]"#,
        )
        .unwrap();

        assert_eq!(nodes[0].text, "docs");
        assert!(nodes[0].path.is_empty());
        assert_eq!(nodes[0].children[0].id, "2");
        assert!(nodes[0].children[0].children.is_empty());
    }

    #[test]
    fn test_mapping_node_null_label_and_path() {
        let node: MappingNode =
            serde_json::from_str(r#"{"id":"3","text":null,"path":null}"#).unwrap();

        assert!(node.text.is_empty());
        assert!(node.path.is_empty());
    }

    #[test]
    fn test_mapping_node_requires_id() {
        let result = serde_json::from_value::<MappingNode>(json!({ "text": "a" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_find_and_count() {
        let tree = MappingNode::root(vec![MappingNode {
            id: "1".into(),
            text: "a".into(),
            path: "/a".into(),
            children: vec![MappingNode {
                id: "2".into(),
                text: "b".into(),
                path: "/a/b".into(),
                children: vec![],
            }],
        }]);

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.find("2").map(|n| n.path.as_str()), Some("/a/b"));
        assert!(tree.find("3").is_none());
        assert!(tree.find(MappingNode::ROOT_ID).unwrap().is_root());
    }

    #[test]
    fn test_selection_keeps_unknown_fields() {
        let payload = json!({ "id": "9", "path": "/x", "text": "report", "depth": 2 });
        let selection: Selection = serde_json::from_value(payload.clone()).unwrap();

        assert_eq!(selection.id, "9");
        assert_eq!(selection.extra.get("depth"), Some(&json!(2)));
        assert_eq!(serde_json::to_value(&selection).unwrap(), payload);
    }

    #[test]
    fn test_file_record_uses_camel_case() {
        let record = FileRecord::new("a.pdf", "p", "01/01/2020", "tok");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["serverName"], "a.pdf");
        assert_eq!(value["fetchToken"], "tok");
        assert!(!record.is_placeholder());
        assert!(FileRecord::placeholder().is_placeholder());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut profile = UserProfile {
            sub: "123".into(),
            ..UserProfile::default()
        };
        assert_eq!(profile.display_name(), "123");

        profile.email = Some("x@example.com".into());
        assert_eq!(profile.display_name(), "x@example.com");

        profile.name = Some("Ana".into());
        assert_eq!(profile.display_name(), "Ana");
    }
}
