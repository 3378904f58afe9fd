use crate::model::{check_attribute, Edge, Node, SchemaViolation};
use crate::schema::AttributeSchema;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    #[default]
    Directed,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Directed => "directed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphModel {
    pub node: AttributeSchema,
}

/// Free-form document metadata. Never carries timestamps so that repeated
/// runs over the same input stay byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct GraphMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GraphMeta {
    pub fn is_empty(&self) -> bool {
        self.creator.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument {
    pub default_edge_type: EdgeType,
    pub model: GraphModel,
    #[serde(skip_serializing_if = "GraphMeta::is_empty")]
    pub meta: GraphMeta,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Package built nodes and edges with their schema. Recommendations are
/// one-way, so the default edge type is always directed.
pub fn assemble(nodes: Vec<Node>, edges: Vec<Edge>, schema: AttributeSchema) -> GraphDocument {
    GraphDocument {
        default_edge_type: EdgeType::Directed,
        model: GraphModel { node: schema },
        meta: GraphMeta::default(),
        nodes,
        edges,
    }
}

impl GraphDocument {
    pub fn with_meta(mut self, meta: GraphMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Every populated node attribute must be declared with a matching kind.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        for node in &self.nodes {
            for (key, value) in node.attributes() {
                check_attribute(&self.model.node, key, value)?;
            }
        }
        Ok(())
    }
}
