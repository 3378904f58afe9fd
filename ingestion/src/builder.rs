use std::collections::HashSet;
use tracing::debug;
use tubegraph_core::model::{Edge, Node, SchemaViolation, VideoRecord};
use tubegraph_core::schema::AttributeSchema;

/// One node per record, attributes attached in schema order. Fields the
/// record does not carry are left off the node.
pub fn build_nodes(
    videos: &[VideoRecord],
    schema: &AttributeSchema,
) -> Result<Vec<Node>, SchemaViolation> {
    videos
        .iter()
        .map(|video| build_node(video, schema))
        .collect()
}

fn build_node(video: &VideoRecord, schema: &AttributeSchema) -> Result<Node, SchemaViolation> {
    let mut node = Node::new(video.id.clone(), video.title.clone());
    for key in schema.keys() {
        match video.attribute(key) {
            Some(value) => node = node.with_attribute(schema, key, value)?,
            None => debug!(video = %video.id, attribute = key, "attribute absent"),
        }
    }
    Ok(node)
}

/// One edge per recommendation slot, in record order then slot order.
/// Targets are not checked against the node set.
pub fn build_edges(videos: &[VideoRecord]) -> Vec<Edge> {
    videos
        .iter()
        .flat_map(|video| {
            video
                .recommendations
                .iter()
                .enumerate()
                .map(move |(index, target)| Edge::new(video.id.as_str(), target.as_str(), index))
        })
        .collect()
}

pub fn build(
    videos: &[VideoRecord],
    schema: &AttributeSchema,
) -> Result<(Vec<Node>, Vec<Edge>), SchemaViolation> {
    let nodes = build_nodes(videos, schema)?;
    let edges = build_edges(videos);
    Ok((nodes, edges))
}

/// Summary counts over a built graph, for reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    /// Edges whose target has no node in the graph.
    pub dangling_edges: usize,
    pub duplicate_node_ids: usize,
}

impl GraphStats {
    pub fn compute(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut ids = HashSet::with_capacity(nodes.len());
        let duplicate_node_ids = nodes
            .iter()
            .filter(|node| !ids.insert(node.id.as_str()))
            .count();
        let dangling_edges = edges
            .iter()
            .filter(|edge| !ids.contains(edge.target.as_str()))
            .count();

        Self {
            nodes: nodes.len(),
            edges: edges.len(),
            dangling_edges,
            duplicate_node_ids,
        }
    }
}
