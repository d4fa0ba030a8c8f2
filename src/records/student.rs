/// Student identity record

use super::{FieldSpec, InputKind, PhotoAsset, Record};
use crate::palette::SCHOOLS;
use crate::{DocumentKind, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    School,
    Name,
    RollNumber,
    Class,
    Section,
    Session,
    Address,
    EmergencyContact,
}

impl StudentField {
    pub const ALL: [StudentField; 8] = [
        StudentField::School,
        StudentField::Name,
        StudentField::RollNumber,
        StudentField::Class,
        StudentField::Section,
        StudentField::Session,
        StudentField::Address,
        StudentField::EmergencyContact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StudentField::School => "school",
            StudentField::Name => "name",
            StudentField::RollNumber => "roll_number",
            StudentField::Class => "class",
            StudentField::Section => "section",
            StudentField::Session => "session",
            StudentField::Address => "address",
            StudentField::EmergencyContact => "emergency_contact",
        }
    }
}

impl FromStr for StudentField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "school" => Ok(StudentField::School),
            "name" => Ok(StudentField::Name),
            "roll_number" | "rollNumber" => Ok(StudentField::RollNumber),
            "class" => Ok(StudentField::Class),
            "section" => Ok(StudentField::Section),
            "session" => Ok(StudentField::Session),
            "address" => Ok(StudentField::Address),
            "emergency_contact" | "emergencyContact" => Ok(StudentField::EmergencyContact),
            other => Err(Error::UnknownField {
                record: "student",
                field: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecord {
    school: String,
    name: String,
    roll_number: String,
    class: String,
    section: String,
    session: String,
    address: String,
    emergency_contact: String,
    #[serde(skip)]
    photo: Option<PhotoAsset>,
}

impl Record for StudentRecord {
    type Field = StudentField;

    const KIND: DocumentKind = DocumentKind::StudentIdCard;

    fn get(&self, field: StudentField) -> &str {
        match field {
            StudentField::School => &self.school,
            StudentField::Name => &self.name,
            StudentField::RollNumber => &self.roll_number,
            StudentField::Class => &self.class,
            StudentField::Section => &self.section,
            StudentField::Session => &self.session,
            StudentField::Address => &self.address,
            StudentField::EmergencyContact => &self.emergency_contact,
        }
    }

    fn set(&self, field: StudentField, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        let slot = match field {
            StudentField::School => &mut next.school,
            StudentField::Name => &mut next.name,
            StudentField::RollNumber => &mut next.roll_number,
            StudentField::Class => &mut next.class,
            StudentField::Section => &mut next.section,
            StudentField::Session => &mut next.session,
            StudentField::Address => &mut next.address,
            StudentField::EmergencyContact => &mut next.emergency_contact,
        };
        *slot = value;
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
            FieldSpec { name: "school", label: "School", input: InputKind::Select(SCHOOLS), hint: "Select School" },
            FieldSpec { name: "name", label: "Student Name", input: InputKind::Text, hint: "Enter student name" },
            FieldSpec { name: "roll_number", label: "Roll Number", input: InputKind::Text, hint: "Enter roll number" },
            FieldSpec { name: "class", label: "Class", input: InputKind::Text, hint: "Enter class" },
            FieldSpec { name: "section", label: "Section", input: InputKind::Text, hint: "Enter section" },
            FieldSpec { name: "session", label: "Session", input: InputKind::Text, hint: "e.g., 2024-25" },
            FieldSpec { name: "emergency_contact", label: "Emergency Contact", input: InputKind::Tel, hint: "Enter emergency contact" },
            FieldSpec { name: "address", label: "Address", input: InputKind::MultiLine, hint: "Enter address" },
            FieldSpec { name: "photo", label: "Photo", input: InputKind::ImageFile, hint: "" },
        ]
    }

    fn primary(&self) -> &str {
        &self.name
    }
}
