//! Prompt assembly and grounded answer generation.

/// Something that turns a system instruction and user message into one
/// completion. Implemented by [`crate::openai::OpenAiClient`]; tests
/// substitute deterministic stand-ins.
pub trait ChatProvider {
    fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError>;
}

/// Fixed system instruction for every completion.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Ask the chat model to answer `question` grounded in `context_chunks`.
///
/// The retrieved chunks are joined by newline and placed ahead of the
/// question in a fixed template; the trimmed completion text is the answer.
/// Remote failures propagate as-is: no retry, no fallback answer.
pub fn generate<C: ChatProvider>(
    question: &str,
    context_chunks: &[String],
    provider: &C,
) -> Result<String, GenerationError> {
    let context = context_chunks.join("\n");
    let user = format!("{context}\n\nQuestion: {question}\nAnswer:");
    let answer = provider.complete(SYSTEM_PROMPT, &user)?;
    Ok(answer.trim().to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion service returned {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("completion response contained no choices")]
    NoChoices,
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records the messages it was asked to complete and replies with a
    /// canned answer.
    struct Recorder {
        seen: RefCell<Vec<(String, String)>>,
        reply: &'static str,
    }

    impl Recorder {
        fn new(reply: &'static str) -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    impl ChatProvider for Recorder {
        fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
            self.seen.borrow_mut().push((system.to_string(), user.to_string()));
            Ok(self.reply.to_string())
        }
    }

    struct Failing;

    impl ChatProvider for Failing {
        fn complete(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
            Err(GenerationError::NoChoices)
        }
    }

    #[test]
    fn prompt_follows_the_fixed_template() {
        let recorder = Recorder::new("fine");
        let context = vec!["first chunk".to_string(), "second chunk".to_string()];
        generate("What is this?", &context, &recorder).unwrap();

        let seen = recorder.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, SYSTEM_PROMPT);
        assert_eq!(
            seen[0].1,
            "first chunk\nsecond chunk\n\nQuestion: What is this?\nAnswer:"
        );
    }

    #[test]
    fn answer_text_is_trimmed() {
        let recorder = Recorder::new("  the answer \n");
        let answer = generate("q", &["ctx".to_string()], &recorder).unwrap();
        assert_eq!(answer, "the answer");
    }

    #[test]
    fn remote_failure_propagates() {
        let err = generate("q", &[], &Failing).unwrap_err();
        assert!(matches!(err, GenerationError::NoChoices));
    }
}
