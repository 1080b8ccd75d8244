//! Custom actions for the term store.

/// Operations on a [`Term`](crate::model::Term) beyond plain CRUD.
#[derive(Debug, Clone)]
pub enum TermAction {
    /// Sets a metadata value, replacing any previous one.
    SetMeta { key: String, value: String },
    /// Removes a metadata key. Removing an absent key is not an error.
    DeleteMeta(String),
}

/// Results from [`TermAction`]s, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum TermActionResult {
    /// The value the key held before, if any.
    SetMeta(Option<String>),
    /// The removed value, if the key existed.
    DeleteMeta(Option<String>),
}
