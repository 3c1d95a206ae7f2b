//! JSON form of content model trees
//!
//! The schema front end hands content models over as JSON:
//!
//! ```json
//! {"kind": "sequence", "minOccurs": 0, "maxOccurs": "unbounded", "particles": [
//!     {"kind": "element", "name": "title", "type": "xs:string"},
//!     {"kind": "element", "name": "author", "maxOccurs": "unbounded"}
//! ]}
//! ```
//!
//! Deserialization is two-step: serde reads the raw shape, then the kind
//! and occurrence attributes are validated into a [`ContentNode`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::elements::{ElementDescriptor, ElementParticle};
use super::groups::{ContentNode, ModelGroup, ModelType};
use super::occurs::Occurs;

/// maxOccurs as written: a count or the keyword "unbounded"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum RawMaxOccurs {
    Count(u32),
    Keyword(String),
}

/// Raw content model node as found in JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    nillable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_occurs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_occurs: Option<RawMaxOccurs>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    particles: Vec<RawNode>,
}

fn parse_occurs(min: Option<u32>, max: Option<&RawMaxOccurs>) -> Result<Occurs> {
    let mut occurs = Occurs::once();
    if let Some(min) = min {
        occurs.min = min;
    }
    match max {
        Some(RawMaxOccurs::Count(max)) => occurs.max = Some(*max),
        Some(RawMaxOccurs::Keyword(kw)) if kw == "unbounded" => occurs.max = None,
        Some(RawMaxOccurs::Keyword(kw)) => {
            return Err(Error::InvalidModel(format!(
                "maxOccurs value '{}' must be a non-negative integer or 'unbounded'",
                kw
            )))
        }
        None => {}
    }
    Ok(occurs)
}

impl TryFrom<RawNode> for ContentNode {
    type Error = Error;

    fn try_from(raw: RawNode) -> Result<Self> {
        let occurs = parse_occurs(raw.min_occurs, raw.max_occurs.as_ref())?;

        if raw.kind == "element" || raw.kind == "{http://www.w3.org/2001/XMLSchema}element" {
            let name = raw
                .name
                .ok_or_else(|| Error::InvalidModel("element particle without a name".into()))?;
            let descriptor = ElementDescriptor {
                name,
                namespace: raw.namespace,
                type_name: raw.type_name,
                nillable: raw.nillable,
                default: raw.default,
            };
            return Ok(ContentNode::Element(ElementParticle::new(descriptor, occurs)));
        }

        let model = ModelType::from_tag(&raw.kind)?;
        let particles = raw
            .particles
            .into_iter()
            .map(ContentNode::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(ContentNode::Group(ModelGroup {
            model,
            particles,
            occurs,
        }))
    }
}

impl From<&ContentNode> for RawNode {
    fn from(node: &ContentNode) -> Self {
        let occurs = node.occurs();
        let min_occurs = (occurs.min != 1).then_some(occurs.min);
        let max_occurs = match occurs.max {
            Some(1) => None,
            Some(max) => Some(RawMaxOccurs::Count(max)),
            None => Some(RawMaxOccurs::Keyword("unbounded".into())),
        };
        match node {
            ContentNode::Element(e) => RawNode {
                kind: "element".into(),
                name: Some(e.descriptor.name.clone()),
                namespace: e.descriptor.namespace.clone(),
                type_name: e.descriptor.type_name.clone(),
                nillable: e.descriptor.nillable,
                default: e.descriptor.default.clone(),
                min_occurs,
                max_occurs,
                particles: Vec::new(),
            },
            ContentNode::Group(g) => RawNode {
                kind: g.model.as_str().into(),
                name: None,
                namespace: None,
                type_name: None,
                nillable: false,
                default: None,
                min_occurs,
                max_occurs,
                particles: g.particles.iter().map(RawNode::from).collect(),
            },
        }
    }
}

impl ContentNode {
    /// Load a content model from a JSON value
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawNode = serde_json::from_value(value)?;
        ContentNode::try_from(raw)
    }

    /// Load a content model from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawNode = serde_json::from_str(text)?;
        ContentNode::try_from(raw)
    }

    /// Serialize this content model to a JSON value
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(RawNode::from(self))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_element() {
        let node = ContentNode::from_json_value(json!({
            "kind": "element",
            "name": "title",
            "type": "xs:string",
            "minOccurs": 0
        }))
        .unwrap();

        match node {
            ContentNode::Element(e) => {
                assert_eq!(e.name(), "title");
                assert_eq!(e.descriptor.type_name.as_deref(), Some("xs:string"));
                assert_eq!(e.occurs, Occurs::optional());
            }
            other => panic!("expected element, got {:?}", other),
        }
    }

    #[test]
    fn test_load_nested_groups() {
        let node = ContentNode::from_json_str(
            r#"{"kind": "sequence", "particles": [
                {"kind": "element", "name": "a"},
                {"kind": "choice", "maxOccurs": "unbounded", "particles": [
                    {"kind": "element", "name": "b"},
                    {"kind": "element", "name": "c"}
                ]}
            ]}"#,
        )
        .unwrap();

        let expected = ContentNode::sequence(vec![
            ContentNode::element("a"),
            ContentNode::choice(vec![ContentNode::element("b"), ContentNode::element("c")])
                .with_occurs(Occurs::new(1, None)),
        ]);
        assert_eq!(node, expected);
    }

    #[test]
    fn test_unknown_kind() {
        let err = ContentNode::from_json_value(json!({"kind": "any"})).unwrap_err();
        assert!(matches!(err, Error::UnsupportedGroupKind(kind) if kind == "any"));
    }

    #[test]
    fn test_invalid_max_occurs() {
        let err = ContentNode::from_json_value(json!({
            "kind": "element", "name": "a", "maxOccurs": "many"
        }))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_element_without_name() {
        let err = ContentNode::from_json_value(json!({"kind": "element"})).unwrap_err();
        assert!(matches!(err, Error::InvalidModel(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = ContentNode::from_json_str("{\"kind\": ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_json_value_roundtrip() {
        let node = ContentNode::all(vec![
            ContentNode::from_descriptor(ElementDescriptor::new("x").with_nillable(true)),
            ContentNode::element("y").with_occurs(Occurs::optional()),
        ])
        .with_occurs(Occurs::zero_or_more());

        let value = node.to_json_value().unwrap();
        assert_eq!(value["kind"], "all");
        assert_eq!(value["maxOccurs"], "unbounded");
        assert_eq!(ContentNode::from_json_value(value).unwrap(), node);
    }
}
