// 📐 Shape Layer - Form Validation
// Raw form input → validated Record (or every field error at once)

use crate::record::{Category, Developer, Intern, Language, Manager, Record, Role};
use serde::{Deserialize, Serialize};

pub const MIN_TEAM_SIZE: i64 = 1;
pub const MAX_TEAM_SIZE: i64 = u32::MAX as i64;
pub const MIN_DURATION_MONTHS: i64 = 1;
pub const MAX_DURATION_MONTHS: i64 = 12;
/// Form step for the salary control
pub const SALARY_STEP: i64 = 500;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

// ============================================================================
// RAW FORM INPUT
// ============================================================================

/// One form submission, before validation.
///
/// Only the field matching `category` is read; the others are ignored,
/// the same way the form only shows one variant control at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordForm {
    pub category: Category,
    pub name: String,
    pub salary: i64,
    #[serde(default)]
    pub team_size: Option<i64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration_months: Option<i64>,
}

impl RecordForm {
    pub fn manager(name: &str, salary: i64, team_size: i64) -> Self {
        RecordForm {
            team_size: Some(team_size),
            ..Self::blank(Category::Manager, name, salary)
        }
    }

    pub fn developer(name: &str, salary: i64, language: &str) -> Self {
        RecordForm {
            language: Some(language.to_string()),
            ..Self::blank(Category::Developer, name, salary)
        }
    }

    pub fn intern(name: &str, salary: i64, duration_months: i64) -> Self {
        RecordForm {
            duration_months: Some(duration_months),
            ..Self::blank(Category::Intern, name, salary)
        }
    }

    fn blank(category: Category, name: &str, salary: i64) -> Self {
        RecordForm {
            category,
            name: name.to_string(),
            salary,
            team_size: None,
            language: None,
            duration_months: None,
        }
    }

    /// Validate every field and construct the record.
    ///
    /// The name is trimmed; surrounding whitespace never becomes part of
    /// the identity key.
    pub fn build(&self) -> ValidationResult<Record> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::new("name", "Required field is empty"));
        }

        let salary = match u64::try_from(self.salary) {
            Ok(s) => Some(s),
            Err(_) => {
                errors.push(ValidationError::new(
                    "salary",
                    format!("Must be 0 or more, got {}", self.salary),
                ));
                None
            }
        };

        let role = match self.category {
            Category::Manager => self.manager_role(&mut errors),
            Category::Developer => self.developer_role(&mut errors),
            Category::Intern => self.intern_role(&mut errors),
        };

        match (salary, role) {
            (Some(salary), Some(role)) if errors.is_empty() => {
                Ok(Record::new(name.to_string(), salary, role))
            }
            _ => Err(errors),
        }
    }

    fn manager_role(&self, errors: &mut Vec<ValidationError>) -> Option<Role> {
        let Some(team_size) = self.team_size else {
            errors.push(ValidationError::new("team_size", "Required for Manager"));
            return None;
        };

        if team_size < MIN_TEAM_SIZE {
            errors.push(ValidationError::new(
                "team_size",
                format!("Must be at least {}, got {}", MIN_TEAM_SIZE, team_size),
            ));
            return None;
        }

        match u32::try_from(team_size) {
            Ok(n) => Some(Role::Manager(Manager { team_size: n })),
            Err(_) => {
                errors.push(ValidationError::new(
                    "team_size",
                    format!("Must be at most {}, got {}", MAX_TEAM_SIZE, team_size),
                ));
                None
            }
        }
    }

    fn developer_role(&self, errors: &mut Vec<ValidationError>) -> Option<Role> {
        let Some(language) = self.language.as_deref() else {
            errors.push(ValidationError::new("language", "Required for Developer"));
            return None;
        };

        match language.parse::<Language>() {
            Ok(language) => Some(Role::Developer(Developer { language })),
            Err(e) => {
                errors.push(ValidationError::new("language", e.to_string()));
                None
            }
        }
    }

    fn intern_role(&self, errors: &mut Vec<ValidationError>) -> Option<Role> {
        let Some(duration) = self.duration_months else {
            errors.push(ValidationError::new("duration_months", "Required for Intern"));
            return None;
        };

        match u8::try_from(duration) {
            Ok(months) if (MIN_DURATION_MONTHS..=MAX_DURATION_MONTHS).contains(&duration) => {
                Some(Role::Intern(Intern { duration_months: months }))
            }
            _ => {
                errors.push(ValidationError::new(
                    "duration_months",
                    format!(
                        "Must be between {} and {}, got {}",
                        MIN_DURATION_MONTHS, MAX_DURATION_MONTHS, duration
                    ),
                ));
                None
            }
        }
    }
}
