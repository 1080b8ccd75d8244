//! Privacy filter: nulls out restricted fields after resolution.

use super::error::ResourceKind;
use super::field::FieldMap;
use super::settings::GraphSettings;

/// Sets every private field of `kind` present in `fields` to null.
///
/// The key stays, signalling that the field was requested but is restricted.
/// Fields that were not requested stay absent. Applies whatever the safe meta
/// mode.
pub fn apply(mut fields: FieldMap, kind: ResourceKind, settings: &GraphSettings) -> FieldMap {
    for name in settings.private_fields(kind) {
        fields.nullify(name);
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::field::FieldValue;

    #[test]
    fn requested_private_fields_become_null() {
        let mut settings = GraphSettings::default();
        settings.safe_meta_mode = false;

        let mut fields = FieldMap::new();
        fields.insert("id", FieldValue::UInt(1));
        fields.insert("password", FieldValue::text("hunter2"));
        fields.insert("_edit_lock", FieldValue::text("1700000000:1"));

        let filtered = apply(fields, ResourceKind::Post, &settings);
        assert_eq!(filtered.get("id"), Some(&FieldValue::UInt(1)));
        assert_eq!(filtered.get("password"), Some(&FieldValue::Null));
        assert_eq!(filtered.get("_edit_lock"), Some(&FieldValue::Null));
        assert!(!filtered.contains("_edit_last"));
    }

    #[test]
    fn policies_are_per_kind() {
        let settings = GraphSettings::default();
        let mut fields = FieldMap::new();
        fields.insert("password", FieldValue::text("kept"));
        fields.insert("author_email", FieldValue::text("a@example.com"));

        let filtered = apply(fields, ResourceKind::Comment, &settings);
        assert_eq!(filtered.get("password"), Some(&FieldValue::text("kept")));
        assert_eq!(filtered.get("author_email"), Some(&FieldValue::Null));
    }
}
