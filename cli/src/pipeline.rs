use gexf::{GexfSerializer, GraphSerializer, SerializeError};
use ingestion::{build, load_videos, GraphStats, LoadError};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use tubegraph_core::config::{AppConfig, ConfigError};
use tubegraph_core::document::{assemble, GraphMeta};
use tubegraph_core::error::{ErrorCode, TubegraphError};
use tubegraph_core::model::{SchemaViolation, VideoRecord};
use tubegraph_core::schema::AttributeSchema;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Schema(#[from] SchemaViolation),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl TubegraphError for CliError {
    fn error_code(&self) -> ErrorCode {
        match self {
            CliError::Config(_) => ErrorCode::Internal,
            CliError::Load(err) => err.error_code(),
            CliError::Schema(err) => err.error_code(),
            CliError::Serialize(err) => err.error_code(),
            CliError::Output(_) => ErrorCode::Internal,
        }
    }
}

/// Load → build → assemble → serialize, held together for one run.
pub struct Pipeline {
    schema: AttributeSchema,
    meta: GraphMeta,
    serializer: Box<dyn GraphSerializer>,
}

impl Pipeline {
    pub fn new(serializer: Box<dyn GraphSerializer>) -> Self {
        Self {
            schema: AttributeSchema::video(),
            meta: GraphMeta::default(),
            serializer,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Box::new(GexfSerializer::with_indent(config.gexf.indent))).with_meta(GraphMeta {
            creator: config.gexf.creator.clone(),
            description: config.gexf.description.clone(),
        })
    }

    pub fn with_meta(mut self, meta: GraphMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn render_file(&self, path: &Path) -> Result<String, CliError> {
        let videos = load_videos(path)?;
        self.render(&videos)
    }

    pub fn render(&self, videos: &[VideoRecord]) -> Result<String, CliError> {
        let (nodes, edges) = build(videos, &self.schema)?;

        let stats = GraphStats::compute(&nodes, &edges);
        info!(
            nodes = stats.nodes,
            edges = stats.edges,
            dangling_edges = stats.dangling_edges,
            "built recommendation graph"
        );
        if stats.duplicate_node_ids > 0 {
            warn!(
                duplicates = stats.duplicate_node_ids,
                "input repeats video ids; output will contain duplicate nodes"
            );
        }

        let document = assemble(nodes, edges, self.schema.clone()).with_meta(self.meta.clone());
        Ok(self.serializer.serialize(&document)?)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(GexfSerializer::new()))
    }
}

/// Write the rendered document, terminated by a single newline.
pub fn emit(xml: &str, out: &mut impl Write) -> io::Result<()> {
    out.write_all(xml.as_bytes())?;
    if !xml.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}
