/// Staff identity record

use super::{FieldSpec, InputKind, PhotoAsset, Record, DEPARTMENTS};
use crate::{DocumentKind, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffField {
    EmpId,
    Dept,
    Phone,
    Address,
    BloodGroup,
}

impl StaffField {
    pub const ALL: [StaffField; 5] = [
        StaffField::EmpId,
        StaffField::Dept,
        StaffField::Phone,
        StaffField::Address,
        StaffField::BloodGroup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StaffField::EmpId => "emp_id",
            StaffField::Dept => "dept",
            StaffField::Phone => "phone",
            StaffField::Address => "address",
            StaffField::BloodGroup => "blood_group",
        }
    }
}

impl FromStr for StaffField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emp_id" | "empId" => Ok(StaffField::EmpId),
            "dept" => Ok(StaffField::Dept),
            "phone" => Ok(StaffField::Phone),
            "address" => Ok(StaffField::Address),
            "blood_group" | "bloodGroup" => Ok(StaffField::BloodGroup),
            other => Err(Error::UnknownField {
                record: "staff",
                field: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffRecord {
    emp_id: String,
    dept: String,
    phone: String,
    address: String,
    blood_group: String,
    #[serde(skip)]
    photo: Option<PhotoAsset>,
}

impl Record for StaffRecord {
    type Field = StaffField;

    const KIND: DocumentKind = DocumentKind::StaffIdCard;

    fn get(&self, field: StaffField) -> &str {
        match field {
            StaffField::EmpId => &self.emp_id,
            StaffField::Dept => &self.dept,
            StaffField::Phone => &self.phone,
            StaffField::Address => &self.address,
            StaffField::BloodGroup => &self.blood_group,
        }
    }

    fn set(&self, field: StaffField, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        match field {
            StaffField::EmpId => next.emp_id = value,
            StaffField::Dept => next.dept = value,
            StaffField::Phone => next.phone = value,
            StaffField::Address => next.address = value,
            StaffField::BloodGroup => next.blood_group = value,
        }
        next
    }

    fn photo(&self) -> Option<&PhotoAsset> {
        self.photo.as_ref()
    }

    fn with_photo(&self, photo: PhotoAsset) -> Self {
        Self {
            photo: Some(photo),
            ..self.clone()
        }
    }

    fn form() -> Vec<FieldSpec> {
        vec![
            FieldSpec { name: "emp_id", label: "Emp ID", input: InputKind::Text, hint: "Enter employee ID" },
            FieldSpec { name: "dept", label: "Dept", input: InputKind::Select(DEPARTMENTS), hint: "Select Department" },
            FieldSpec { name: "phone", label: "Phone", input: InputKind::Tel, hint: "Enter phone number" },
            FieldSpec { name: "address", label: "Address", input: InputKind::MultiLine, hint: "Enter address" },
            FieldSpec { name: "blood_group", label: "Blood Group", input: InputKind::Text, hint: "Enter blood group (e.g., A+, B-, O+)" },
            FieldSpec { name: "photo", label: "Photo", input: InputKind::ImageFile, hint: "" },
        ]
    }

    fn primary(&self) -> &str {
        &self.emp_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_returns_new_record() {
        let base = StaffRecord::default();
        let next = base.set(StaffField::BloodGroup, "O+");
        assert_eq!(next.get(StaffField::BloodGroup), "O+");
        assert_eq!(base.get(StaffField::BloodGroup), "");
        for field in StaffField::ALL {
            assert_eq!(field.name().parse::<StaffField>().unwrap(), field);
        }
    }

    #[test]
    fn file_name_uses_emp_id() {
        let rec = StaffRecord::default();
        assert_eq!(rec.file_name(), "Staff_ID_Card.pdf");
        let rec = rec.set(StaffField::EmpId, "GU-2231");
        assert_eq!(rec.file_name(), "GU-2231_ID_Card.pdf");
    }

    #[test]
    fn deserializes_partial_toml() {
        let rec: StaffRecord = toml::from_str("emp_id = \"GU-7\"\nphone = \"98100\"").unwrap();
        assert_eq!(rec.get(StaffField::EmpId), "GU-7");
        assert_eq!(rec.get(StaffField::Dept), "");
    }
}
