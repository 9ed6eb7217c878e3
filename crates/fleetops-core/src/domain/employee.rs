//! Employee domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Staff classification, stored verbatim in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeType {
    Stuff,
    Driver,
    Mechanic,
}

impl EmployeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stuff => "STUFF",
            Self::Driver => "DRIVER",
            Self::Mechanic => "MECHANIC",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "STUFF" => Some(Self::Stuff),
            "DRIVER" => Some(Self::Driver),
            "MECHANIC" => Some(Self::Mechanic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub employee_type: EmployeeType,
    pub hire_date: Option<NaiveDate>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<Uuid>,
}

impl Employee {
    pub fn new(payload: CreateEmployee, created_by: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            employee_type: payload.employee_type,
            hire_date: payload.hire_date,
            created_at: now,
            created_by,
            updated_at: Some(now),
            updated_by: created_by,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Applies a partial update and stamps the acting principal.
    pub fn apply(&mut self, update: UpdateEmployee, updated_by: Uuid) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(employee_type) = update.employee_type {
            self.employee_type = employee_type;
        }
        if let Some(hire_date) = update.hire_date {
            self.hire_date = Some(hire_date);
        }
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }
}

/// New employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, max = 255, message = "first name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "last name is required"))]
    pub last_name: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 20, message = "phone is required"))]
    pub phone: String,

    #[serde(rename = "type")]
    pub employee_type: EmployeeType,

    pub hire_date: Option<NaiveDate>,
}

/// Partial employee update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 255, message = "first name must not be empty"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "last name must not be empty"))]
    pub last_name: Option<String>,

    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 20, message = "phone must not be empty"))]
    pub phone: Option<String>,

    #[serde(rename = "type")]
    pub employee_type: Option<EmployeeType>,

    pub hire_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload() -> CreateEmployee {
        CreateEmployee {
            first_name: "Ada".into(),
            last_name: "Driver".into(),
            email: "ada@example.com".into(),
            phone: "123".into(),
            employee_type: EmployeeType::Driver,
            hire_date: None,
        }
    }

    #[test]
    fn new_stamps_creator_and_updater() {
        let actor = Uuid::new_v4();
        let employee = Employee::new(create_payload(), Some(actor));
        assert_eq!(employee.created_by, Some(actor));
        assert_eq!(employee.updated_by, Some(actor));
    }

    #[test]
    fn apply_keeps_created_by() {
        let creator = Uuid::new_v4();
        let editor = Uuid::new_v4();
        let mut employee = Employee::new(create_payload(), Some(creator));

        employee.apply(
            UpdateEmployee {
                phone: Some("456".into()),
                ..Default::default()
            },
            editor,
        );

        assert_eq!(employee.phone, "456");
        assert_eq!(employee.created_by, Some(creator));
        assert_eq!(employee.updated_by, Some(editor));
    }

    #[test]
    fn type_round_trips_as_string() {
        assert_eq!(
            EmployeeType::from_str(EmployeeType::Mechanic.as_str()),
            Some(EmployeeType::Mechanic)
        );
        assert_eq!(EmployeeType::from_str("PILOT"), None);
    }
}
