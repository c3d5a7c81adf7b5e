// LLM provider adapters

pub mod openai_provider;

pub use openai_provider::OpenAiStructuredProvider;
