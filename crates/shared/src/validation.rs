//! Client-side validation for the employee form.
//!
//! Every rule mirrors what the store itself will accept, so a draft that
//! passes here is expected to persist without a validation rejection. Whole
//! draft validation reports all failing fields, not just the first.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{EmployeeDraft, Gender};

/// International phone syntax: optional leading `+`, first digit 1-9,
/// 10-15 digits total.
fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[1-9][0-9]{9,14}$").expect("valid phone pattern"))
}

/// The editable fields of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Age,
    Gender,
    Occupation,
    Phone,
    Mail,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Age,
        Field::Gender,
        Field::Occupation,
        Field::Phone,
        Field::Mail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Occupation => "occupation",
            Self::Phone => "phone",
            Self::Mail => "mail",
        }
    }
}

/// A single field that failed validation, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: Field,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Raw form input before types are parsed. Numeric and enum fields stay in
/// their edit representation so an empty or malformed buffer can be reported
/// per field instead of failing wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftInput {
    pub name: String,
    pub age: String,
    pub gender: Option<Gender>,
    pub occupation: String,
    pub phone: String,
    pub mail: String,
}

impl DraftInput {
    /// Pre-populates the buffers from a persisted record, for edit mode.
    pub fn from_draft(draft: &EmployeeDraft) -> Self {
        Self {
            name: draft.name.clone(),
            age: draft.age.to_string(),
            gender: Some(draft.gender),
            occupation: draft.occupation.clone(),
            phone: draft.phone.clone(),
            mail: draft.mail.clone(),
        }
    }

    /// Validates one field in isolation. `Ok(())` means the field would not
    /// block submission.
    pub fn validate_field(&self, field: Field) -> Result<(), FieldValidationError> {
        match field {
            Field::Name => validate_name(&self.name),
            Field::Age => validate_age(&self.age).map(|_| ()),
            Field::Gender => validate_gender(self.gender).map(|_| ()),
            Field::Occupation => validate_occupation(&self.occupation),
            Field::Phone => validate_phone(&self.phone),
            Field::Mail => validate_mail(&self.mail),
        }
    }

    /// Validates the whole draft. Returns the typed draft on success, or every
    /// field failure on rejection.
    pub fn validate(&self) -> Result<EmployeeDraft, Vec<FieldValidationError>> {
        let mut errors = Vec::new();

        if let Err(err) = validate_name(&self.name) {
            errors.push(err);
        }
        let age = match validate_age(&self.age) {
            Ok(age) => Some(age),
            Err(err) => {
                errors.push(err);
                None
            }
        };
        let gender = match validate_gender(self.gender) {
            Ok(gender) => Some(gender),
            Err(err) => {
                errors.push(err);
                None
            }
        };
        if let Err(err) = validate_occupation(&self.occupation) {
            errors.push(err);
        }
        if let Err(err) = validate_phone(&self.phone) {
            errors.push(err);
        }
        if let Err(err) = validate_mail(&self.mail) {
            errors.push(err);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(EmployeeDraft {
            name: self.name.trim().to_string(),
            age: age.expect("validated above"),
            gender: gender.expect("validated above"),
            occupation: self.occupation.trim().to_string(),
            phone: self.phone.trim().to_string(),
            mail: self.mail.trim().to_string(),
        })
    }
}

pub fn validate_name(name: &str) -> Result<(), FieldValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FieldValidationError::new(Field::Name, "Name is required"));
    }
    if name.chars().count() < 2 {
        return Err(FieldValidationError::new(Field::Name, "Too short"));
    }
    Ok(())
}

pub fn validate_age(age: &str) -> Result<u32, FieldValidationError> {
    let age = age.trim();
    if age.is_empty() {
        return Err(FieldValidationError::new(Field::Age, "Age is required"));
    }
    match age.parse::<i64>() {
        Ok(value) if value > 0 => u32::try_from(value)
            .map_err(|_| FieldValidationError::new(Field::Age, "Age is out of range")),
        Ok(_) => Err(FieldValidationError::new(
            Field::Age,
            "Age must be a positive integer",
        )),
        Err(_) => Err(FieldValidationError::new(
            Field::Age,
            "Age must be a number",
        )),
    }
}

pub fn validate_gender(gender: Option<Gender>) -> Result<Gender, FieldValidationError> {
    gender.ok_or_else(|| FieldValidationError::new(Field::Gender, "Gender is required"))
}

pub fn validate_occupation(occupation: &str) -> Result<(), FieldValidationError> {
    if occupation.trim().is_empty() {
        return Err(FieldValidationError::new(
            Field::Occupation,
            "Occupation is required",
        ));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), FieldValidationError> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err(FieldValidationError::new(Field::Phone, "Phone is required"));
    }
    if !phone_pattern().is_match(phone) {
        return Err(FieldValidationError::new(
            Field::Phone,
            "Invalid phone number",
        ));
    }
    Ok(())
}

pub fn validate_mail(mail: &str) -> Result<(), FieldValidationError> {
    let mail = mail.trim();
    if mail.is_empty() {
        return Err(FieldValidationError::new(Field::Mail, "Email is required"));
    }
    if !email_address::EmailAddress::is_valid(mail) {
        return Err(FieldValidationError::new(Field::Mail, "Invalid email"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> DraftInput {
        DraftInput {
            name: "Alice".into(),
            age: "30".into(),
            gender: Some(Gender::Female),
            occupation: "Engineer".into(),
            phone: "+14155550123".into(),
            mail: "alice@example.com".into(),
        }
    }

    #[test]
    fn accepts_a_fully_valid_draft() {
        let draft = valid_input().validate().expect("valid draft");
        assert_eq!(draft.name, "Alice");
        assert_eq!(draft.age, 30);
        assert_eq!(draft.gender, Gender::Female);
    }

    #[test]
    fn rejects_single_character_names() {
        let mut input = valid_input();
        input.name = "A".into();
        let err = input.validate_field(Field::Name).unwrap_err();
        assert_eq!(err.field, Field::Name);
        assert_eq!(err.message, "Too short");
    }

    #[test]
    fn rejects_non_positive_and_non_numeric_ages() {
        assert!(validate_age("-1").is_err());
        assert!(validate_age("0").is_err());
        assert!(validate_age("thirty").is_err());
        assert_eq!(validate_age("42").unwrap(), 42);
    }

    #[test]
    fn phone_requires_ten_to_fifteen_digits_without_leading_zero() {
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("0123456789").is_err());
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("+441632960961").is_ok());
        assert!(validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn mail_must_be_an_email_address() {
        assert!(validate_mail("not-an-email").is_err());
        assert!(validate_mail("bob@example.org").is_ok());
    }

    #[test]
    fn whole_draft_validation_reports_every_failing_field() {
        let input = DraftInput {
            name: "".into(),
            age: "-1".into(),
            gender: None,
            occupation: "".into(),
            phone: "123".into(),
            mail: "not-an-email".into(),
        };
        let errors = input.validate().unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::Name,
                Field::Age,
                Field::Gender,
                Field::Occupation,
                Field::Phone,
                Field::Mail
            ]
        );
    }

    #[test]
    fn edit_buffers_round_trip_through_a_persisted_draft() {
        let draft = valid_input().validate().expect("valid draft");
        let buffers = DraftInput::from_draft(&draft);
        assert_eq!(buffers.validate().expect("still valid"), draft);
    }
}
