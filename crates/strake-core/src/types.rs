use serde::Serialize;

/// Identifiers of the defects strake reports.
///
/// Declaration order is the fixed reporting order: findings on the same line
/// are sorted by this order so runs stay deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorId {
    Unreadable,
    InvalidSyntax,
    NoCondition,
    PreInvalidArg,
    SnapshotInvalidArg,
    SnapshotWoPost,
    SnapshotWoCapture,
    PostInvalidArg,
    PostResultNone,
    PostResultConflict,
    PostOldConflict,
    InvInvalidArg,
}

impl ErrorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorId::Unreadable => "unreadable",
            ErrorId::InvalidSyntax => "invalid-syntax",
            ErrorId::NoCondition => "no-condition",
            ErrorId::PreInvalidArg => "pre-invalid-arg",
            ErrorId::SnapshotInvalidArg => "snapshot-invalid-arg",
            ErrorId::SnapshotWoPost => "snapshot-wo-post",
            ErrorId::SnapshotWoCapture => "snapshot-wo-capture",
            ErrorId::PostInvalidArg => "post-invalid-arg",
            ErrorId::PostResultNone => "post-result-none",
            ErrorId::PostResultConflict => "post-result-conflict",
            ErrorId::PostOldConflict => "post-old-conflict",
            ErrorId::InvInvalidArg => "inv-invalid-arg",
        }
    }
}

impl std::fmt::Display for ErrorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four recognized contract registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Precondition,
    Postcondition,
    Invariant,
    Snapshot,
}

impl ContractKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKind::Precondition => "precondition",
            ContractKind::Postcondition => "postcondition",
            ContractKind::Invariant => "invariant",
            ContractKind::Snapshot => "snapshot",
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported defect.
///
/// `line` is 1-based and absent only for file-level findings without a
/// position (an unreadable file). The owning file path is carried separately
/// so serialized findings match the per-file report layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    #[serde(rename = "identifier")]
    pub id: ErrorId,
    pub message: String,
    #[serde(skip)]
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Finding {
    pub fn new(id: ErrorId, message: impl Into<String>, file: impl Into<String>, line: Option<u32>) -> Self {
        Finding {
            id,
            message: message.into(),
            file: file.into(),
            line,
        }
    }
}
