pub mod config;
pub mod dot;
pub mod engine;
pub mod error;
pub mod link;
pub mod render;

pub use config::RenderConfig;
pub use error::GraphError;
pub use link::link_ancestry;
pub use render::{render, EdgeDecl, NodeDecl, PresentationGraph, Role};
