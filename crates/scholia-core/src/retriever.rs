//! Maps a question to the most relevant document chunks.

use crate::chunks::Chunk;
use crate::embedding::{EmbeddingError, EmbeddingProvider};
use crate::index::VectorIndex;

/// Default number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 3;

/// Embed `question`, search `index`, and return the texts of the nearest
/// chunks in ascending distance order.
///
/// `chunks` must be the surviving chunk list the index was built from; row
/// ids returned by the index are positions into it. A row id outside the
/// list means the two drifted apart and is reported, never skipped.
pub fn retrieve<P: EmbeddingProvider>(
    question: &str,
    provider: &P,
    index: &VectorIndex,
    chunks: &[Chunk],
    k: usize,
) -> Result<Vec<String>, RetrieveError> {
    let query = provider.embed(question)?;
    if query.len() != index.dim() {
        return Err(RetrieveError::QueryDimension {
            expected: index.dim(),
            found: query.len(),
        });
    }
    let mut texts = Vec::new();
    for (row, _distance) in index.search(&query, k) {
        let chunk = chunks.get(row).ok_or(RetrieveError::Misaligned {
            row,
            chunks: chunks.len(),
        })?;
        texts.push(chunk.text.clone());
    }
    Ok(texts)
}

#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    #[error("question embedding has dimension {found}, index expects {expected}")]
    QueryDimension { expected: usize, found: usize },
    #[error("index returned row {row} but only {chunks} chunks are known")]
    Misaligned { row: usize, chunks: usize },
}
