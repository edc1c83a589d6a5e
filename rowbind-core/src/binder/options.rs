/// What to do with a column that no record field maps to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedColumns {
    /// Read the value and drop it.
    #[default]
    Discard,
    /// Fail the bind with `BindError::UnmatchedColumn`.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindOptions {
    pub unmatched_columns: UnmatchedColumns,
}

impl BindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every column of a record row must map to a field.
    pub fn reject_unmatched_columns(mut self) -> Self {
        self.unmatched_columns = UnmatchedColumns::Reject;
        self
    }

    pub fn unmatched_columns(mut self, policy: UnmatchedColumns) -> Self {
        self.unmatched_columns = policy;
        self
    }
}
