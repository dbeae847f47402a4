//! Splits document text into word-bounded chunks for embedding and retrieval.

/// Default maximum words per chunk. Keeps chunks small enough for embedding
/// models and prompt context.
pub const DEFAULT_MAX_WORDS: usize = 500;

/// A chunk of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    /// Position of this chunk within the document (0, 1, 2, …).
    pub index: usize,
}

/// Split text into chunks of at most `max_words` whitespace-separated words.
///
/// Greedy accumulation: words are appended to the current chunk until adding
/// one more would exceed the bound, then the chunk is closed and the next
/// word starts a new one. Words are re-joined with single spaces, so runs of
/// whitespace in the input do not survive. The bound is on word count, not
/// characters; a single word longer than the bound is never split.
pub fn chunk_text(text: &str, max_words: usize) -> Vec<Chunk> {
    let max_words = max_words.max(1);
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for word in text.split_whitespace() {
        if current.len() + 1 > max_words {
            close_chunk(&mut chunks, &current);
            current.clear();
        }
        current.push(word);
    }
    if !current.is_empty() {
        close_chunk(&mut chunks, &current);
    }
    chunks
}

fn close_chunk(chunks: &mut Vec<Chunk>, words: &[&str]) {
    chunks.push(Chunk {
        text: words.join(" "),
        index: chunks.len(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(chunk_text("", 500).is_empty());
        assert!(chunk_text("   \n\t ", 500).is_empty());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let c = chunk_text("one short sentence", 500);
        assert_eq!(texts(&c), vec!["one short sentence"]);
        assert_eq!(c[0].index, 0);
    }

    #[test]
    fn splits_at_word_bound() {
        let c = chunk_text("Alpha beta gamma. Delta epsilon.", 2);
        assert_eq!(texts(&c), vec!["Alpha beta", "gamma. Delta", "epsilon."]);
    }

    #[test]
    fn every_chunk_respects_the_bound() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod";
        for max in 1..=6 {
            for chunk in chunk_text(text, max) {
                assert!(chunk.text.split_whitespace().count() <= max);
            }
        }
    }

    #[test]
    fn chunks_reproduce_the_normalized_input() {
        let text = "  spaced\tout \n words   across\nlines ";
        let joined = chunk_text(text, 3)
            .iter()
            .map(|c| c.text.clone())
            .collect::<Vec<_>>()
            .join(" ");
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(joined, normalized);
    }

    #[test]
    fn long_word_is_never_split() {
        let c = chunk_text("supercalifragilisticexpialidocious", 1);
        assert_eq!(texts(&c), vec!["supercalifragilisticexpialidocious"]);
    }

    #[test]
    fn indices_follow_emission_order() {
        let c = chunk_text("a b c d e f", 2);
        let indices: Vec<usize> = c.iter().map(|ch| ch.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
