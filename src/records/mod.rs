//! Form records: flat string-valued field sets with immutable updates
//!
//! Each document kind owns one record type. Records are never mutated in
//! place; `Record::set` returns a new record and `FormState` swaps it in, so
//! the form always has exactly one current value to render from.

pub mod onboarding;
pub mod photo;
pub mod staff;
pub mod student;

pub use onboarding::{OnboardingField, OnboardingRecord};
pub use photo::PhotoAsset;
pub use staff::{StaffField, StaffRecord};
pub use student::{StudentField, StudentRecord};

use crate::{DocumentKind, Error};
use serde::Serialize;
use std::fmt::Debug;
use std::str::FromStr;

/// Department options shared by the staff and onboarding forms
pub const DEPARTMENTS: &[&str] = &[
    "Human Resources",
    "Information Technology",
    "Finance",
    "Administration",
    "Academic",
    "Student Affairs",
    "Library",
    "Maintenance",
];

/// Kind of input control a field is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "options")]
pub enum InputKind {
    Text,
    MultiLine,
    Tel,
    Email,
    Date,
    Select(&'static [&'static str]),
    ImageFile,
}

/// Description of one input on a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field name. Text-valued inputs parse into the record's field enum;
    /// the image input is attached with a photo file instead.
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    /// Hint shown in an empty input
    pub hint: &'static str,
}

impl FieldSpec {
    /// Whether the field takes a text value through `set_named`
    pub fn settable(&self) -> bool {
        self.input != InputKind::ImageFile
    }
}

/// A flat record of form fields for one entity.
pub trait Record: Clone + Default + Debug + Send + Sync + 'static {
    /// Typed field selector; names from outside the program parse into it
    type Field: Copy + Eq + Debug + FromStr<Err = Error> + Send + 'static;

    /// Document produced from this record
    const KIND: DocumentKind;

    /// Current value of a field (empty when never set)
    fn get(&self, field: Self::Field) -> &str;

    /// Return a copy of the record with one field replaced
    fn set(&self, field: Self::Field, value: impl Into<String>) -> Self;

    /// Attached photo, for records that carry one
    fn photo(&self) -> Option<&PhotoAsset> {
        None
    }

    /// Return a copy of the record with the photo replaced. Records without a
    /// photo slot return themselves unchanged.
    fn with_photo(&self, _photo: PhotoAsset) -> Self {
        self.clone()
    }

    /// The input surface of the form
    fn form() -> Vec<FieldSpec>;

    /// Value of the identifying field used to name exported documents
    fn primary(&self) -> &str;

    /// Output file name for this record's document
    fn file_name(&self) -> String {
        Self::KIND.file_name(self.primary())
    }
}

/// Owns the single current record of a form and applies edits to it.
#[derive(Debug, Clone, Default)]
pub struct FormState<R: Record> {
    record: R,
    revision: u64,
}

impl<R: Record> FormState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: R) -> Self {
        Self { record, revision: 0 }
    }

    /// The current record
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Number of edits applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace one field
    pub fn set(&mut self, field: R::Field, value: impl Into<String>) {
        self.record = self.record.set(field, value);
        self.revision += 1;
    }

    /// Parse a field name and replace that field
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> crate::Result<()> {
        let field = name.parse::<R::Field>()?;
        self.set(field, value);
        Ok(())
    }

    /// Replace the photo. `None` means no file was selected and keeps the
    /// previous photo.
    pub fn set_photo(&mut self, photo: Option<PhotoAsset>) {
        if let Some(photo) = photo {
            self.record = self.record.with_photo(photo);
            self.revision += 1;
        }
    }

    /// Replace the whole record
    pub fn replace(&mut self, record: R) {
        self.record = record;
        self.revision += 1;
    }
}

/// Split a `field=value` assignment as given on the command line
pub fn parse_assignment(input: &str) -> crate::Result<(String, String)> {
    match input.split_once('=') {
        Some((name, value)) => Ok((name.trim().to_string(), value.to_string())),
        None => Err(Error::Other(format!(
            "expected `field=value`, got `{}`",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_state_replaces_record_on_edit() {
        let mut form = FormState::<StaffRecord>::new();
        let before = form.record().clone();
        form.set(StaffField::EmpId, "GU-104");
        assert_eq!(form.record().get(StaffField::EmpId), "GU-104");
        assert_eq!(before.get(StaffField::EmpId), "");
        assert_eq!(form.revision(), 1);
    }

    #[test]
    fn unselected_photo_keeps_previous_one() {
        let mut form = FormState::<StudentRecord>::new();
        let photo = photo::tests::tiny_png_asset();
        form.set_photo(Some(photo.clone()));
        form.set_photo(None);
        assert_eq!(form.record().photo(), Some(&photo));
        assert_eq!(form.revision(), 1);
    }

    #[test]
    fn set_named_rejects_unknown_fields() {
        let mut form = FormState::<OnboardingRecord>::new();
        let err = form.set_named("salary", "100").unwrap_err();
        assert!(matches!(err, Error::UnknownField { record: "onboarding", .. }));
        form.set_named("employee_name", "Ravi").unwrap();
        assert_eq!(form.record().primary(), "Ravi");
    }

    #[test]
    fn department_select_is_shared() {
        let staff_dept = StaffRecord::form()
            .into_iter()
            .find(|f| f.name == "dept")
            .unwrap();
        let onboarding_dept = OnboardingRecord::form()
            .into_iter()
            .find(|f| f.name == "department")
            .unwrap();
        assert_eq!(staff_dept.input, InputKind::Select(DEPARTMENTS));
        assert_eq!(staff_dept.input, onboarding_dept.input);
    }

    fn settable_names_parse<R: Record>() -> usize {
        let form = R::form();
        for spec in form.iter().filter(|f| f.settable()) {
            assert!(
                spec.name.parse::<R::Field>().is_ok(),
                "{} does not parse as a field",
                spec.name
            );
        }
        form.iter().filter(|f| !f.settable()).count()
    }

    #[test]
    fn every_settable_form_name_parses() {
        assert_eq!(settable_names_parse::<StaffRecord>(), 1);
        assert_eq!(settable_names_parse::<StudentRecord>(), 1);
        assert_eq!(settable_names_parse::<OnboardingRecord>(), 0);
        let photo = StudentRecord::form()
            .into_iter()
            .find(|f| f.name == "photo")
            .unwrap();
        assert!(!photo.settable());
        assert!("photo".parse::<StudentField>().is_err());
    }

    #[test]
    fn assignment_keeps_equals_in_value() {
        let (name, value) = parse_assignment("email=a=b@x.org").unwrap();
        assert_eq!(name, "email");
        assert_eq!(value, "a=b@x.org");
        assert!(parse_assignment("email").is_err());
    }
}
