use serde::{Deserialize, Serialize};

/// How an edit is applied to the document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixAction {
    ReplaceLine,
    InsertBefore,
    InsertAfter,
    DeleteLine,
    ReplaceRange,
}

/// Origin of a suggestion: the deterministic rule catalogue or the
/// generative fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixKind {
    Rule,
    Ai,
}

/// A declarative patch against the document source.
///
/// The fix engine never touches the document itself; it emits one of these
/// for the owning editor to apply. Lines are 1-indexed. When several edits
/// are applied together the caller must work from the highest line number
/// down so earlier edits do not shift later anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixEdit {
    pub action: FixAction,
    pub line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,
    /// The text being replaced, kept for preview and undo surfaces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

impl FixEdit {
    pub fn replace_line(line: u32, new_text: String, original_text: String) -> Self {
        Self {
            action: FixAction::ReplaceLine,
            line,
            end_line: None,
            new_text: Some(new_text),
            original_text: Some(original_text),
        }
    }

    pub fn insert_before(line: u32, new_text: String) -> Self {
        Self {
            action: FixAction::InsertBefore,
            line,
            end_line: None,
            new_text: Some(new_text),
            original_text: None,
        }
    }

    pub fn insert_after(line: u32, new_text: String) -> Self {
        Self {
            action: FixAction::InsertAfter,
            line,
            end_line: None,
            new_text: Some(new_text),
            original_text: None,
        }
    }
}

/// One proposed repair for one diagnostic.
///
/// The engine returns at most one suggestion per invocation; `confidence`
/// is a display-ordering hint, not an application gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub error_id: u32,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: FixKind,
    pub edit: FixEdit,
    pub confidence: f64,
}
