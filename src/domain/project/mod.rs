//! Project domain - groups of models

mod entity;
mod repository;

pub use entity::{Project, ProjectId};
pub use repository::{in_memory::InMemoryProjectRepository, ProjectRepository};
