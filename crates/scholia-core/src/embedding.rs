//! Embedding provider seam and batch embedding with dimension validation.

use log::warn;

use crate::chunks::Chunk;

/// Something that turns text into a fixed-dimension embedding vector.
///
/// Implemented by [`crate::openai::OpenAiClient`]; tests substitute
/// deterministic stand-ins.
pub trait EmbeddingProvider {
    /// Embed a single string. One attempt, no retry; failures carry the
    /// transport or service error.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Embed every chunk in order, one call per chunk.
///
/// A chunk whose call fails or whose vector does not have `embedding_dim`
/// components is dropped and logged, not fatal. Returns the surviving
/// vectors and chunks as two index-aligned lists of equal length; fails only
/// when nothing survives.
pub fn embed_all<P: EmbeddingProvider>(
    provider: &P,
    chunks: &[Chunk],
    embedding_dim: usize,
) -> Result<(Vec<Vec<f32>>, Vec<Chunk>), EmbeddingError> {
    let mut vectors = Vec::with_capacity(chunks.len());
    let mut surviving = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        match provider.embed(&chunk.text) {
            Ok(v) if v.len() == embedding_dim => {
                vectors.push(v);
                surviving.push(chunk.clone());
            }
            Ok(v) => warn!(
                "skipping chunk {}: embedding dimension {} (expected {})",
                chunk.index,
                v.len(),
                embedding_dim
            ),
            Err(e) => warn!("skipping chunk {}: {}", chunk.index, e),
        }
    }
    if vectors.is_empty() {
        return Err(EmbeddingError::NoValidEmbeddings);
    }
    Ok((vectors, surviving))
}

#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("embedding service returned {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("embedding response contained no vector")]
    EmptyResponse,
    #[error("no valid embeddings were generated")]
    NoValidEmbeddings,
}
