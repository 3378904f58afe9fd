use crate::escape::escape_xml;
use std::fmt::Write as _;
use thiserror::Error;
use tracing::debug;
use tubegraph_core::document::{GraphDocument, GraphMeta};
use tubegraph_core::error::{ErrorCode, TubegraphError};
use tubegraph_core::model::{Edge, Node, SchemaViolation};
use tubegraph_core::schema::AttributeSchema;

const GEXF_NAMESPACE: &str = "http://www.gexf.net/1.2draft";
const GEXF_VERSION: &str = "1.2";
const DEFAULT_INDENT: usize = 2;

#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("graph document violates its attribute schema: {0}")]
    Schema(#[from] SchemaViolation),
    #[error("failed to format document: {0}")]
    Format(#[from] std::fmt::Error),
}

impl TubegraphError for SerializeError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SerializeError::Schema(err) => err.error_code(),
            SerializeError::Format(_) => ErrorCode::Internal,
        }
    }
}

/// Renders a graph document to its textual interchange form.
pub trait GraphSerializer {
    fn serialize(&self, document: &GraphDocument) -> Result<String, SerializeError>;
}

/// GEXF 1.2 writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GexfSerializer {
    indent: usize,
}

impl GexfSerializer {
    pub fn new() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }

    /// `0` writes the whole document on one line.
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }
}

impl Default for GexfSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphSerializer for GexfSerializer {
    fn serialize(&self, document: &GraphDocument) -> Result<String, SerializeError> {
        document.validate()?;

        let mut xml = XmlOut::new(self.indent);
        xml.line(0, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        xml.line(
            0,
            format_args!(
                r#"<gexf xmlns="{}" version="{}">"#,
                GEXF_NAMESPACE, GEXF_VERSION
            ),
        )?;
        write_meta(&mut xml, &document.meta)?;
        xml.line(
            1,
            format_args!(
                r#"<graph mode="static" defaultedgetype="{}">"#,
                document.default_edge_type.as_str()
            ),
        )?;
        write_attributes(&mut xml, &document.model.node)?;
        write_nodes(&mut xml, &document.nodes)?;
        write_edges(&mut xml, &document.edges)?;
        xml.line(1, "</graph>")?;
        xml.line(0, "</gexf>")?;

        debug!(
            nodes = document.nodes.len(),
            edges = document.edges.len(),
            bytes = xml.out.len(),
            "rendered gexf document"
        );
        Ok(xml.out)
    }
}

fn write_meta(xml: &mut XmlOut, meta: &GraphMeta) -> Result<(), SerializeError> {
    if meta.is_empty() {
        return Ok(());
    }
    xml.line(1, "<meta>")?;
    if let Some(creator) = &meta.creator {
        xml.line(2, format_args!("<creator>{}</creator>", escape_xml(creator)))?;
    }
    if let Some(description) = &meta.description {
        xml.line(
            2,
            format_args!("<description>{}</description>", escape_xml(description)),
        )?;
    }
    xml.line(1, "</meta>")?;
    Ok(())
}

fn write_attributes(xml: &mut XmlOut, schema: &AttributeSchema) -> Result<(), SerializeError> {
    if schema.is_empty() {
        return Ok(());
    }
    xml.line(2, r#"<attributes class="node">"#)?;
    for entry in schema.entries() {
        xml.line(
            3,
            format_args!(
                r#"<attribute id="{}" title="{}" type="{}"/>"#,
                escape_xml(&entry.id),
                escape_xml(&entry.title),
                entry.kind
            ),
        )?;
    }
    xml.line(2, "</attributes>")?;
    Ok(())
}

fn write_nodes(xml: &mut XmlOut, nodes: &[Node]) -> Result<(), SerializeError> {
    xml.line(2, "<nodes>")?;
    for node in nodes {
        let mut open = format!(r#"<node id="{}""#, escape_xml(&node.id));
        if let Some(label) = &node.label {
            write!(open, r#" label="{}""#, escape_xml(label))?;
        }

        if node.attributes().is_empty() {
            open.push_str("/>");
            xml.line(3, open)?;
            continue;
        }

        open.push('>');
        xml.line(3, open)?;
        xml.line(4, "<attvalues>")?;
        for (key, value) in node.attributes() {
            xml.line(
                5,
                format_args!(
                    r#"<attvalue for="{}" value="{}"/>"#,
                    escape_xml(key),
                    escape_xml(&value.to_string())
                ),
            )?;
        }
        xml.line(4, "</attvalues>")?;
        xml.line(3, "</node>")?;
    }
    xml.line(2, "</nodes>")?;
    Ok(())
}

fn write_edges(xml: &mut XmlOut, edges: &[Edge]) -> Result<(), SerializeError> {
    xml.line(2, "<edges>")?;
    for edge in edges {
        xml.line(
            3,
            format_args!(
                r#"<edge id="{}" source="{}" target="{}"/>"#,
                escape_xml(&edge.id),
                escape_xml(&edge.source),
                escape_xml(&edge.target)
            ),
        )?;
    }
    xml.line(2, "</edges>")?;
    Ok(())
}

struct XmlOut {
    out: String,
    indent: usize,
}

impl XmlOut {
    fn new(indent: usize) -> Self {
        Self {
            out: String::with_capacity(64 * 1024),
            indent,
        }
    }

    fn line(&mut self, depth: usize, text: impl std::fmt::Display) -> std::fmt::Result {
        if self.indent > 0 {
            for _ in 0..depth * self.indent {
                self.out.push(' ');
            }
        }
        write!(self.out, "{}", text)?;
        if self.indent > 0 {
            self.out.push('\n');
        }
        Ok(())
    }
}
