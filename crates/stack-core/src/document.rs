//! Keyed-tree document model
//!
//! Every fragment, resolved document and global document is a [`Document`]:
//! a string-keyed mapping whose values are nested mappings, sequences or
//! scalars. The value type is a closed enum so the merge engine can match
//! exhaustively on shapes.
//!
//! Mappings are ordered by key, which makes serialization of a given tree
//! byte-for-byte stable.

use serde::Serialize;
use std::collections::BTreeMap;

/// A string-keyed mapping with stable key order.
pub type Mapping = BTreeMap<String, Value>;

/// A node in a keyed-tree document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Mapping(Mapping),
    Sequence(Vec<Value>),
    Scalar(Scalar),
}

/// A leaf value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
}

/// Problems turning fragment text into a [`Document`], or back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("{0}")]
    Syntax(String),

    #[error("top level must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("mapping keys must be scalars, found {found}")]
    UnsupportedKey { found: &'static str },

    #[error("{0}")]
    Render(String),
}

impl Value {
    /// Human-readable shape name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
            Value::Scalar(Scalar::Null) => "null",
            Value::Scalar(Scalar::Bool(_)) => "bool",
            Value::Scalar(Scalar::Number(_)) => "number",
            Value::Scalar(Scalar::String(_)) => "string",
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::String(s))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Scalar(Scalar::Number(n.into()))
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl From<Vec<Value>> for Value {
    fn from(s: Vec<Value>) -> Self {
        Value::Sequence(s)
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = DocumentError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        use serde_yaml::Value as Yaml;

        Ok(match value {
            Yaml::Null => Value::Scalar(Scalar::Null),
            Yaml::Bool(b) => Value::Scalar(Scalar::Bool(b)),
            Yaml::Number(n) => Value::Scalar(Scalar::Number(n)),
            Yaml::String(s) => Value::Scalar(Scalar::String(s)),
            Yaml::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Yaml::Mapping(map) => Value::Mapping(convert_mapping(map)?),
            // Tags such as `!reset` carry no meaning here; keep the payload
            Yaml::Tagged(tagged) => Value::try_from(tagged.value)?,
        })
    }
}

fn convert_mapping(map: serde_yaml::Mapping) -> Result<Mapping, DocumentError> {
    let mut out = Mapping::new();
    for (key, value) in map {
        out.insert(key_string(key)?, Value::try_from(value)?);
    }
    Ok(out)
}

fn key_string(key: serde_yaml::Value) -> Result<String, DocumentError> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => key_string(tagged.value),
        Yaml::Sequence(_) => Err(DocumentError::UnsupportedKey { found: "sequence" }),
        Yaml::Mapping(_) => Err(DocumentError::UnsupportedKey { found: "mapping" }),
    }
}

fn yaml_kind_name(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "bool",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(tagged) => yaml_kind_name(&tagged.value),
    }
}

fn is_blank_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#') || line == "---"
}

/// A parsed fragment or a merge result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// An empty document, the identity for [`Document::merge`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse fragment text.
    ///
    /// Empty input (or input containing only comments) yields an empty
    /// document. Anchors, aliases and `<<` merge keys are expanded.
    pub fn parse(content: &str) -> Result<Self, DocumentError> {
        if content.lines().all(is_blank_line) {
            return Ok(Self::new());
        }

        let mut raw: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| DocumentError::Syntax(e.to_string()))?;
        raw.apply_merge()
            .map_err(|e| DocumentError::Syntax(e.to_string()))?;

        match raw {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(map) => Ok(Self {
                root: convert_mapping(map)?,
            }),
            other => Err(DocumentError::NotAMapping {
                found: yaml_kind_name(&other),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    pub fn into_mapping(self) -> Mapping {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Layer `overlay` on top of this document in place.
    ///
    /// See [`crate::merge`] for the rules.
    pub fn merge(&mut self, overlay: Document) {
        crate::merge::merge_into(&mut self.root, overlay.root);
    }

    /// Consuming form of [`Document::merge`].
    pub fn merged(mut self, overlay: Document) -> Self {
        self.merge(overlay);
        self
    }

    /// Serialize to YAML text.
    pub fn to_yaml(&self) -> Result<String, DocumentError> {
        serde_yaml::to_string(&self.root).map_err(|e| DocumentError::Render(e.to_string()))
    }

    /// Serialize to pretty-printed JSON text.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(&self.root).map_err(|e| DocumentError::Render(e.to_string()))
    }
}

impl From<Mapping> for Document {
    fn from(root: Mapping) -> Self {
        Self { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_and_comment_only_input_is_empty_document() {
        assert_eq!(Document::parse("").unwrap(), Document::new());
        assert_eq!(Document::parse("   \n").unwrap(), Document::new());
        assert_eq!(Document::parse("# nothing here\n").unwrap(), Document::new());
    }

    #[test]
    fn kind_names_describe_shapes() {
        let doc = Document::parse("m: {}\ns: []\nn: ~\nb: true\ni: 3\nt: x\n").unwrap();
        let kinds: Vec<_> = ["m", "s", "n", "b", "i", "t"]
            .iter()
            .map(|key| doc.get(key).unwrap().kind_name())
            .collect();
        assert_eq!(
            kinds,
            vec!["mapping", "sequence", "null", "bool", "number", "string"]
        );
    }

    #[test]
    fn top_level_sequence_is_rejected() {
        let err = Document::parse("- a\n- b\n").unwrap_err();
        assert_eq!(err, DocumentError::NotAMapping { found: "sequence" });
    }

    #[test]
    fn syntax_error_is_reported() {
        assert!(matches!(
            Document::parse("services: [unclosed\n"),
            Err(DocumentError::Syntax(_))
        ));
    }

    #[test]
    fn scalar_keys_are_stringified() {
        let doc = Document::parse("ports:\n  8080: web\n  true: flag\n").unwrap();
        let ports = doc.get("ports").and_then(Value::as_mapping).unwrap();
        assert_eq!(ports.get("8080"), Some(&Value::from("web")));
        assert_eq!(ports.get("true"), Some(&Value::from("flag")));
    }

    #[test]
    fn merge_keys_are_expanded() {
        let doc = Document::parse(
            "x-common: &common\n  restart: always\nservices:\n  web:\n    <<: *common\n    image: nginx\n",
        )
        .unwrap();
        let web = doc
            .get("services")
            .and_then(Value::as_mapping)
            .and_then(|s| s.get("web"))
            .and_then(Value::as_mapping)
            .unwrap();
        assert_eq!(web.get("restart"), Some(&Value::from("always")));
        assert_eq!(web.get("image"), Some(&Value::from("nginx")));
        assert!(!web.contains_key("<<"));
    }

    #[test]
    fn yaml_output_has_sorted_keys() {
        let doc = Document::parse("zeta: 1\nalpha: 2\nmid: {b: 1, a: 2}\n").unwrap();
        assert_eq!(
            doc.to_yaml().unwrap(),
            "alpha: 2\nmid:\n  a: 2\n  b: 1\nzeta: 1\n"
        );
    }

    #[test]
    fn scalars_survive_a_yaml_round_trip() {
        let text = "flag: true\nname: web\nnothing: null\nratio: 0.5\ncount: 3\n";
        let doc = Document::parse(text).unwrap();
        let again = Document::parse(&doc.to_yaml().unwrap()).unwrap();
        assert_eq!(doc, again);
    }

    #[test]
    fn json_output() {
        let doc = Document::parse("services:\n  web:\n    ports: [80]\n").unwrap();
        let json: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["services"]["web"]["ports"][0], 80);
    }
}
