// Infrastructure layer module
// Adapters for storage, the LLM provider and seed data
// Follows Hexagonal Architecture

pub mod llm;
pub mod repositories;
pub mod seed;
