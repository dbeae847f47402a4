//! Ingest pipeline: chunk → embed → index. Holds one document's chunks and
//! vector index, kept index-aligned, and answers questions against them.

use log::{debug, info};

use crate::answer::{generate, ChatProvider, GenerationError};
use crate::chunks::{chunk_text, Chunk};
use crate::embedding::{embed_all, EmbeddingError, EmbeddingProvider};
use crate::index::{ValidationError, VectorIndex};
use crate::retriever::{retrieve, RetrieveError};

/// One document's surviving chunks and their vector index. Row `i` of the
/// index is the embedding of `chunks()[i]`. Immutable once built; opening a
/// new document builds a fresh one and the old one is dropped.
#[derive(Debug)]
pub struct DocumentIndex {
    chunks: Vec<Chunk>,
    index: VectorIndex,
}

impl DocumentIndex {
    /// Run the ingest pipeline over extracted document text: chunk, embed
    /// every chunk, build the index. Nothing is kept on failure, so a caller
    /// holding a previous index keeps a usable one.
    pub fn build<P: EmbeddingProvider>(
        text: &str,
        provider: &P,
        max_words: usize,
        embedding_dim: usize,
    ) -> Result<Self, PipelineError> {
        let chunks = chunk_text(text, max_words);
        debug!("chunked document into {} chunk(s)", chunks.len());
        let (vectors, chunks) = embed_all(provider, &chunks, embedding_dim)?;
        let index = VectorIndex::build(vectors)?;
        info!("indexed {} chunk(s)", index.len());
        Ok(Self { chunks, index })
    }

    /// Answer one question: retrieve the `k` nearest chunks, then generate.
    /// A failure leaves the index untouched and usable for the next question.
    pub fn ask<P, C>(
        &self,
        question: &str,
        provider: &P,
        chat: &C,
        k: usize,
    ) -> Result<String, AskError>
    where
        P: EmbeddingProvider,
        C: ChatProvider,
    {
        let context = retrieve(question, provider, &self.index, &self.chunks, k)?;
        debug!("retrieved {} chunk(s) of context", context.len());
        Ok(generate(question, &context, chat)?)
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The surviving chunks, in index row order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
    #[error("index error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("retrieval error: {0}")]
    Retrieve(#[from] RetrieveError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerationError),
}
