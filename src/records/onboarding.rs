/// Onboarding (welcome letter) record

use super::{FieldSpec, InputKind, Record, DEPARTMENTS};
use crate::{DocumentKind, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingField {
    EmployeeName,
    Position,
    Department,
    StartDate,
    ReportingManager,
    HrContact,
    Email,
    WorkLocation,
}

impl OnboardingField {
    pub const ALL: [OnboardingField; 8] = [
        OnboardingField::EmployeeName,
        OnboardingField::Position,
        OnboardingField::Department,
        OnboardingField::StartDate,
        OnboardingField::ReportingManager,
        OnboardingField::HrContact,
        OnboardingField::Email,
        OnboardingField::WorkLocation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OnboardingField::EmployeeName => "employee_name",
            OnboardingField::Position => "position",
            OnboardingField::Department => "department",
            OnboardingField::StartDate => "start_date",
            OnboardingField::ReportingManager => "reporting_manager",
            OnboardingField::HrContact => "hr_contact",
            OnboardingField::Email => "email",
            OnboardingField::WorkLocation => "work_location",
        }
    }
}

impl FromStr for OnboardingField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee_name" | "employeeName" => Ok(OnboardingField::EmployeeName),
            "position" => Ok(OnboardingField::Position),
            "department" => Ok(OnboardingField::Department),
            "start_date" | "startDate" => Ok(OnboardingField::StartDate),
            "reporting_manager" | "reportingManager" => Ok(OnboardingField::ReportingManager),
            "hr_contact" | "hrContact" => Ok(OnboardingField::HrContact),
            "email" => Ok(OnboardingField::Email),
            "work_location" | "workLocation" => Ok(OnboardingField::WorkLocation),
            other => Err(Error::UnknownField {
                record: "onboarding",
                field: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingRecord {
    employee_name: String,
    position: String,
    department: String,
    start_date: String,
    reporting_manager: String,
    hr_contact: String,
    email: String,
    work_location: String,
}

impl Record for OnboardingRecord {
    type Field = OnboardingField;

    const KIND: DocumentKind = DocumentKind::WelcomeLetter;

    fn get(&self, field: OnboardingField) -> &str {
        match field {
            OnboardingField::EmployeeName => &self.employee_name,
            OnboardingField::Position => &self.position,
            OnboardingField::Department => &self.department,
            OnboardingField::StartDate => &self.start_date,
            OnboardingField::ReportingManager => &self.reporting_manager,
            OnboardingField::HrContact => &self.hr_contact,
            OnboardingField::Email => &self.email,
            OnboardingField::WorkLocation => &self.work_location,
        }
    }

    fn set(&self, field: OnboardingField, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut next = self.clone();
        let slot = match field {
            OnboardingField::EmployeeName => &mut next.employee_name,
            OnboardingField::Position => &mut next.position,
            OnboardingField::Department => &mut next.department,
            OnboardingField::StartDate => &mut next.start_date,
            OnboardingField::ReportingManager => &mut next.reporting_manager,
            OnboardingField::HrContact => &mut next.hr_contact,
            OnboardingField::Email => &mut next.email,
            OnboardingField::WorkLocation => &mut next.work_location,
        };
        *slot = value;
        next
    }

    fn form() -> Vec<FieldSpec> {
        vec![
            FieldSpec { name: "employee_name", label: "Employee Name", input: InputKind::Text, hint: "Enter employee name" },
            FieldSpec { name: "position", label: "Position", input: InputKind::Text, hint: "Enter position" },
            FieldSpec { name: "department", label: "Department", input: InputKind::Select(DEPARTMENTS), hint: "Select Department" },
            FieldSpec { name: "start_date", label: "Start Date", input: InputKind::Date, hint: "" },
            FieldSpec { name: "reporting_manager", label: "Reporting Manager", input: InputKind::Text, hint: "Enter reporting manager name" },
            FieldSpec { name: "hr_contact", label: "HR Contact", input: InputKind::Text, hint: "Enter HR contact name" },
            FieldSpec { name: "email", label: "Email", input: InputKind::Email, hint: "Enter email address" },
            FieldSpec { name: "work_location", label: "Work Location", input: InputKind::Text, hint: "Enter work location" },
        ]
    }

    fn primary(&self) -> &str {
        &self.employee_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_letter_file_name() {
        let rec = OnboardingRecord::default();
        assert_eq!(rec.file_name(), "Employee_Welcome_Letter.pdf");
        let rec = rec.set(OnboardingField::EmployeeName, "Meera Iyer");
        assert_eq!(rec.file_name(), "Meera Iyer_Welcome_Letter.pdf");
    }

    #[test]
    fn dates_are_free_text() {
        let rec = OnboardingRecord::default().set(OnboardingField::StartDate, "next monday-ish");
        assert_eq!(rec.get(OnboardingField::StartDate), "next monday-ish");
    }
}
