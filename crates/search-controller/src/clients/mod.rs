//! HTTP clients for the services the controller depends on

pub mod renderer;
pub mod search;

pub use renderer::RendererClient;
pub use search::SearchClient;
