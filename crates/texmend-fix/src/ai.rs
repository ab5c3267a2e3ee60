use async_trait::async_trait;
use log::warn;
use thiserror::Error;

use texmend_log::ir::LatexError;

use crate::edit::{FixEdit, FixKind, FixSuggestion};

/// Generative suggestions are always low confidence.
pub const AI_CONFIDENCE: f64 = 0.5;

/// Failure at the completion boundary. Every variant degrades to "no fix
/// available" for the caller; nothing here propagates past
/// [`fix_with_ai`].
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no completion service is configured")]
    Unavailable,
    #[error("completion request failed: {0}")]
    Request(String),
    #[error("completion response was malformed: {0}")]
    Malformed(String),
}

/// Injected text-generation capability.
///
/// The engine never talks to a network itself; callers hand in an
/// implementation of this trait and own its timeout and cancellation.
/// Tests substitute a scripted double.
#[async_trait]
pub trait AiFixProvider: Send + Sync {
    /// Produces replacement text for the error's source line.
    async fn complete(
        &self,
        error: &LatexError,
        source_lines: &[&str],
        credential: &str,
    ) -> Result<String, AiError>;
}

/// Provider used when no completion service is configured.
pub struct NoOpAiProvider;

#[async_trait]
impl AiFixProvider for NoOpAiProvider {
    async fn complete(
        &self,
        _error: &LatexError,
        _source_lines: &[&str],
        _credential: &str,
    ) -> Result<String, AiError> {
        Err(AiError::Unavailable)
    }
}

/// Generative fallback, to be invoked only after [`crate::fix`] returned
/// `None`.
///
/// The first line of the generated text becomes a `replace_line` edit on
/// the error's source line. Provider failures, empty replies and errors
/// without source attribution all resolve to `None`; this boundary never
/// panics and never surfaces an error to the caller.
pub async fn fix_with_ai(
    provider: &dyn AiFixProvider,
    error: &LatexError,
    source_lines: &[&str],
    credential: &str,
) -> Option<FixSuggestion> {
    let line = error.line?;
    let original = source_lines
        .get(line.checked_sub(1)? as usize)
        .map(|text| text.to_string());

    let reply = match provider.complete(error, source_lines, credential).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!("ai fallback failed for error {}: {}", error.id, err);
            return None;
        }
    };

    let replacement = reply.lines().next().unwrap_or("").trim_end().to_string();
    if replacement.trim().is_empty() {
        warn!("ai fallback returned an empty reply for error {}", error.id);
        return None;
    }

    Some(FixSuggestion {
        error_id: error.id,
        description: "AI-suggested rewrite of the reported line".to_string(),
        kind: FixKind::Ai,
        edit: FixEdit {
            action: crate::edit::FixAction::ReplaceLine,
            line,
            end_line: None,
            new_text: Some(replacement),
            original_text: original,
        },
        confidence: AI_CONFIDENCE,
    })
}
