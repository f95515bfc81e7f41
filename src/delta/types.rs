//! Core Delta document types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced when a Delta document cannot be parsed or serialized.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// The JSON did not match the Delta wire format.
    #[error("malformed delta JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of list a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Ordered,
    Bullet,
}

/// Formatting attributes attached to an insert operation.
///
/// Fields mirror the Quill attribute vocabulary for the supported toolbar
/// feature set. `None` means "not set"; unset fields are omitted from the
/// JSON encoding. Attributes on a `"\n"`-only insert are line attributes
/// and apply to the preceding line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<bool>,
    #[serde(rename = "code-block", skip_serializing_if = "Option::is_none")]
    pub code_block: Option<bool>,
    /// Heading level, 1-based.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<ListKind>,
}

impl Attributes {
    /// True when no attribute is set.
    pub const fn is_empty(&self) -> bool {
        self.bold.is_none()
            && self.italic.is_none()
            && self.strike.is_none()
            && self.code_block.is_none()
            && self.header.is_none()
            && self.list.is_none()
    }

    /// Merge `patch` into a copy of `self`: fields set in `patch` win,
    /// unset fields keep their current value.
    pub fn merged(&self, patch: &Self) -> Self {
        Self {
            bold: patch.bold.or(self.bold),
            italic: patch.italic.or(self.italic),
            strike: patch.strike.or(self.strike),
            code_block: patch.code_block.or(self.code_block),
            header: patch.header.or(self.header),
            list: patch.list.or(self.list),
        }
    }
}

/// An embedded image insert: `{"image": "<url>"}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInsert {
    pub image: String,
}

/// The payload of a Delta operation: a text run or an embed.
///
/// Embeds occupy exactly one position in the document's index space;
/// text runs occupy one position per character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    Text(String),
    Image(ImageInsert),
}

impl Insert {
    /// Length of this insert in document positions.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::Image(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single insert operation with optional formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaOp {
    pub insert: Insert,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl DeltaOp {
    /// A plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            insert: Insert::Text(text.into()),
            attributes: None,
        }
    }

    /// A text run with formatting attributes. Empty attribute sets are
    /// stored as absent so serialization stays canonical.
    pub fn text_with(text: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            insert: Insert::Text(text.into()),
            attributes: if attributes.is_empty() {
                None
            } else {
                Some(attributes)
            },
        }
    }

    /// An image embed.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            insert: Insert::Image(ImageInsert { image: url.into() }),
            attributes: None,
        }
    }

    /// Length of this op in document positions.
    pub fn len(&self) -> usize {
        self.insert.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insert.is_empty()
    }
}

/// An ordered sequence of insert operations describing a whole document.
///
/// Wire format is Quill's: `{"ops":[{"insert": ...}, ...]}`. Positions
/// used by [`Delta::slice`] count characters for text runs and one for
/// each embed; indices are character positions, never byte offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub ops: Vec<DeltaOp>,
}

impl Delta {
    /// An empty document (no ops at all).
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Total document length in positions.
    pub fn len(&self) -> usize {
        self.ops.iter().map(DeltaOp::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.iter().all(DeltaOp::is_empty)
    }

    /// Append an op, normalizing as Quill does: empty text runs are
    /// dropped and adjacent text runs with identical attributes merge.
    pub fn push(&mut self, op: DeltaOp) {
        if let Insert::Text(text) = &op.insert {
            if text.is_empty() {
                return;
            }
            if let Some(last) = self.ops.last_mut() {
                if last.attributes == op.attributes {
                    if let Insert::Text(prev) = &mut last.insert {
                        prev.push_str(text);
                        return;
                    }
                }
            }
        }
        self.ops.push(op);
    }

    /// Concatenate two documents, normalizing at the seam.
    pub fn concat(mut self, other: Self) -> Self {
        for op in other.ops {
            self.push(op);
        }
        self
    }

    /// The sub-document covering positions `[start, end)`.
    ///
    /// Text ops are split at the boundaries with their attributes
    /// preserved; an embed is included when its position falls inside
    /// the range. Out-of-range bounds clamp to the document end and a
    /// degenerate range yields an empty op list.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let mut out = Self::new();
        if end <= start {
            return out;
        }
        let mut pos = 0;
        for op in &self.ops {
            let op_start = pos;
            let op_end = pos + op.len();
            pos = op_end;
            if op_end <= start {
                continue;
            }
            if op_start >= end {
                break;
            }
            match &op.insert {
                Insert::Text(text) => {
                    let skip = start.saturating_sub(op_start);
                    let take = end.min(op_end) - op_start - skip;
                    let piece: String = text.chars().skip(skip).take(take).collect();
                    out.push(DeltaOp {
                        insert: Insert::Text(piece),
                        attributes: op.attributes.clone(),
                    });
                }
                Insert::Image(_) => out.push(op.clone()),
            }
        }
        out
    }

    /// The suffix of the document starting at `start`.
    pub fn slice_from(&self, start: usize) -> Self {
        self.slice(start, self.len())
    }

    /// Parse a document from its JSON encoding.
    ///
    /// # Errors
    /// Returns [`DeltaError::Json`] when the input is not a well-formed
    /// Delta document.
    pub fn from_json(json: &str) -> Result<Self, DeltaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to its JSON encoding.
    ///
    /// # Errors
    /// Returns [`DeltaError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DeltaError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<DeltaOp> for Delta {
    fn from_iter<I: IntoIterator<Item = DeltaOp>>(iter: I) -> Self {
        let mut delta = Self::new();
        for op in iter {
            delta.push(op);
        }
        delta
    }
}
