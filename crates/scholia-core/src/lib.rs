//! Retrieval-augmented question answering over a single PDF.
//!
//! Pipeline: extract text → chunk → embed → index → per-question retrieve →
//! generate. Everything lives in memory for one interactive session; opening
//! a new document replaces the previous chunks and index wholesale.

pub mod answer;
pub mod chunks;
pub mod config;
pub mod document;
pub mod embedding;
pub mod index;
pub mod openai;
pub mod pipeline;
pub mod retriever;

pub use answer::{generate, ChatProvider, GenerationError, SYSTEM_PROMPT};
pub use chunks::{chunk_text, Chunk, DEFAULT_MAX_WORDS};
pub use config::{load_settings, Config, ConfigError, Settings, API_KEY_VAR};
pub use document::{extract_text, normalize_whitespace, save_upload, ExtractError, UploadError};
pub use embedding::{embed_all, EmbeddingError, EmbeddingProvider};
pub use index::{ValidationError, VectorIndex};
pub use openai::{ClientError, OpenAiClient};
pub use pipeline::{AskError, DocumentIndex, PipelineError};
pub use retriever::{retrieve, RetrieveError, DEFAULT_TOP_K};
