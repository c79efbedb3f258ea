pub mod config;
pub mod display;
pub mod error;
pub mod graph;
pub mod ipc;
pub mod llm;
pub mod models;
pub mod reliability;
pub mod store;

pub use config::ArgusConfig;
pub use display::{group_color, humanize_label, sanitize_description, to_title_case, EntityDisplay};
pub use error::ArgusError;
pub use graph::{all_simple_paths, labels_for_path, shortest_path, GraphEdge, NodeId};
pub use llm::{HttpLlmClient, LlmBackend, LlmError};
pub use reliability::ReliabilityBand;
pub use store::{GraphStore, StoredNode, Subgraph};
