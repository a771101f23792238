// Tailoring
// Upload → parse → analyse listing → rewrite → assemble → store.
// Every LLM call goes through llm_client; documents are produced by the document module.

pub mod convert;
pub mod handlers;
pub mod keywords;
pub mod models;
pub mod prompts;
pub mod repository;
pub mod rewrite;
pub mod storage;
pub mod upload;
