//! Restore - Saving and restoring box values across process restarts.
//!
//! A snapshot is the ordered list of optional characters, one per box. It
//! serializes to JSON as e.g. `{"segments":["1",null,"3",null]}`. Boxes that
//! were typed into and then cleared are listed in `blank`, so a restored
//! field projects the same aggregate: `{"segments":["a",null],"blank":[1]}`.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::state::segment::{Segment, SegmentValue};
use crate::types::FieldProps;

/// Serializable box values of a code field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub segments: Vec<Option<char>>,
    /// Indices of empty boxes that hold `Blank` rather than `Unset`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blank: Vec<usize>,
}

impl Snapshot {
    pub(crate) fn capture(segments: &[Segment]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.value().char()).collect(),
            blank: segments
                .iter()
                .enumerate()
                .filter(|(_, s)| s.value() == SegmentValue::Blank)
                .map(|(index, _)| index)
                .collect(),
        }
    }

    /// Validate against `props` and convert to box values.
    ///
    /// Empty entries come back as `Blank` when listed in `blank`, otherwise
    /// as `Unset`. Blank indices that name a filled box are ignored.
    pub(crate) fn values_for(&self, props: &FieldProps) -> Result<Vec<SegmentValue>, FieldError> {
        if self.segments.len() != props.length {
            return Err(FieldError::SnapshotLength {
                expected: props.length,
                found: self.segments.len(),
            });
        }

        self.segments
            .iter()
            .enumerate()
            .map(|(index, entry)| match *entry {
                None if self.blank.contains(&index) => Ok(SegmentValue::Blank),
                None => Ok(SegmentValue::Unset),
                Some(ch) if props.character_class.accepts(ch) => Ok(SegmentValue::Filled(ch)),
                Some(ch) => Err(FieldError::InvalidCharacter { index, ch }),
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, FieldError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, FieldError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::CodeField;
    use crate::state::focus::FocusQueue;

    #[test]
    fn test_snapshot_restores_values() {
        let mut field = CodeField::new(FieldProps::digits(4)).unwrap();
        let mut focus = FocusQueue::new();
        field.on_value_changed(0, "1", &mut focus);
        field.on_value_changed(2, "3", &mut focus);

        let json = field.snapshot().to_json().unwrap();
        assert_eq!(json, r#"{"segments":["1",null,"3",null]}"#);

        let mut restored = CodeField::new(FieldProps::digits(4)).unwrap();
        restored.restore(&Snapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored.aggregate(), "1null3null");
        assert_eq!(restored.snapshot(), field.snapshot());
    }

    #[test]
    fn test_blank_is_saved_as_none() {
        let mut field = CodeField::new(FieldProps::characters(2)).unwrap();
        let mut focus = FocusQueue::new();
        field.on_value_changed(0, "k", &mut focus);
        field.on_value_changed(0, "", &mut focus);
        assert_eq!(field.segment(0).unwrap().value(), SegmentValue::Blank);

        let snapshot = field.snapshot();
        assert_eq!(snapshot.segments, vec![None, None]);
        assert_eq!(snapshot.blank, vec![0]);
    }

    #[test]
    fn test_cleared_character_box_keeps_aggregate() {
        let mut field = CodeField::new(FieldProps::characters(2)).unwrap();
        let mut focus = FocusQueue::new();
        field.on_value_changed(0, "a", &mut focus);
        field.on_value_changed(1, "b", &mut focus);
        field.on_value_changed(1, "", &mut focus);
        assert_eq!(field.aggregate(), "a");

        let json = field.snapshot().to_json().unwrap();
        assert_eq!(json, r#"{"segments":["a",null],"blank":[1]}"#);

        let mut restored = CodeField::new(FieldProps::characters(2)).unwrap();
        restored.restore(&Snapshot::from_json(&json).unwrap()).unwrap();
        assert_eq!(restored.aggregate(), "a");
        assert_eq!(restored.segment(1).unwrap().value(), SegmentValue::Blank);
    }

    #[test]
    fn test_missing_blank_list_restores_unset() {
        let snapshot = Snapshot::from_json(r#"{"segments":["a",null]}"#).unwrap();
        assert!(snapshot.blank.is_empty());

        let mut field = CodeField::new(FieldProps::characters(2)).unwrap();
        field.restore(&snapshot).unwrap();
        assert_eq!(field.aggregate(), "anull");
    }

    #[test]
    fn test_length_mismatch() {
        let mut field = CodeField::new(FieldProps::digits(4)).unwrap();
        let snapshot = Snapshot {
            segments: vec![Some('1'); 5],
            blank: Vec::new(),
        };
        let err = field.restore(&snapshot).unwrap_err();
        assert!(matches!(err, FieldError::SnapshotLength { expected: 4, found: 5 }));
    }

    #[test]
    fn test_invalid_character_leaves_field_untouched() {
        let mut field = CodeField::new(FieldProps::digits(3)).unwrap();
        let snapshot = Snapshot {
            segments: vec![Some('1'), Some('x'), None],
            blank: Vec::new(),
        };
        let err = field.restore(&snapshot).unwrap_err();
        assert!(matches!(err, FieldError::InvalidCharacter { index: 1, ch: 'x' }));
        assert_eq!(field.aggregate(), "nullnullnull");
    }

    #[test]
    fn test_malformed_json() {
        let err = Snapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, FieldError::Snapshot(_)));
    }
}
