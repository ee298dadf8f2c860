// 👤 Employee Record - Closed set of variants under one contract
//
// Every record shares name + salary, each variant adds one attribute.
// Identity = (name, category). Everything else is a value.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CATEGORY (variant tag)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Manager,
    Developer,
    Intern,
}

impl Category {
    /// All categories, in form order
    pub const ALL: [Category; 3] = [Category::Manager, Category::Developer, Category::Intern];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Manager => "Manager",
            Category::Developer => "Developer",
            Category::Intern => "Intern",
        }
    }

    /// Icon shown next to the profile line
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Manager => "👩‍💼",
            Category::Developer => "💻",
            Category::Intern => "📘",
        }
    }

    /// Export column holding this category's own attribute
    pub fn extra_column(&self) -> &'static str {
        match self {
            Category::Manager => COL_TEAM_SIZE,
            Category::Developer => COL_LANGUAGE,
            Category::Intern => COL_DURATION,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Category::Manager => Category::Developer,
            Category::Developer => Category::Intern,
            Category::Intern => Category::Manager,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Category::Manager => Category::Intern,
            Category::Developer => Category::Manager,
            Category::Intern => Category::Developer,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// LANGUAGE (Developer attribute)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
    Java,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::JavaScript,
        Language::Java,
        Language::Cpp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Java => "Java",
            Language::Cpp => "C++",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let i = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allowed: Vec<&str> = Language::ALL.iter().map(|l| l.as_str()).collect();
        write!(f, "'{}' is not one of {}", self.0, allowed.join(", "))
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Exact label match only ("C++", not "cpp")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

// ============================================================================
// EXPORT COLUMNS
// ============================================================================

pub const COL_TYPE: &str = "Type";
pub const COL_NAME: &str = "Name";
pub const COL_SALARY: &str = "Salary";
pub const COL_TEAM_SIZE: &str = "Team Size";
pub const COL_LANGUAGE: &str = "Language";
pub const COL_DURATION: &str = "Duration (months)";

/// Column → value mapping for one record, in column order.
/// Inapplicable columns are simply absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<(&'static str, Value)>,
}

impl Row {
    fn new() -> Self {
        Row { cells: Vec::new() }
    }

    fn with(mut self, column: &'static str, value: Value) -> Self {
        self.cells.push((column, value));
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(c, _)| *c)
    }

    pub fn cells(&self) -> &[(&'static str, Value)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Serializes as a JSON object, keys in column order
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

// ============================================================================
// RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    pub name: String,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    pub team_size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Developer {
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intern {
    pub duration_months: u8,
}

/// Variant-specific payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Manager(Manager),
    Developer(Developer),
    Intern(Intern),
}

/// One employee entry.
///
/// Fields are private: a `Record` only comes out of
/// [`RecordForm::build`](crate::schema::RecordForm::build), so every
/// instance already satisfies the field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    salary: u64,
    role: Role,
}

impl Record {
    pub(crate) fn new(name: String, salary: u64, role: Role) -> Self {
        Record { name, salary, role }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn salary(&self) -> u64 {
        self.salary
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn category(&self) -> Category {
        match self.role {
            Role::Manager(_) => Category::Manager,
            Role::Developer(_) => Category::Developer,
            Role::Intern(_) => Category::Intern,
        }
    }

    /// Human-readable one-line profile
    pub fn describe(&self) -> String {
        match &self.role {
            Role::Manager(m) => format!(
                "Manager {} manages {} people and earns ${}",
                self.name, m.team_size, self.salary
            ),
            Role::Developer(d) => format!(
                "Developer {} codes in {} and earns ${}",
                self.name, d.language, self.salary
            ),
            Role::Intern(i) => format!(
                "Intern {} is here for {} months and earns ${}",
                self.name, i.duration_months, self.salary
            ),
        }
    }

    pub fn to_row(&self) -> Row {
        let row = Row::new()
            .with(COL_TYPE, Value::from(self.category().as_str()))
            .with(COL_NAME, Value::from(self.name.as_str()))
            .with(COL_SALARY, Value::from(self.salary));

        match &self.role {
            Role::Manager(m) => row.with(COL_TEAM_SIZE, Value::from(m.team_size)),
            Role::Developer(d) => row.with(COL_LANGUAGE, Value::from(d.language.as_str())),
            Role::Intern(i) => row.with(COL_DURATION, Value::from(i.duration_months)),
        }
    }

    /// Duplicate detection key: name + category, nothing else
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            name: self.name.clone(),
            category: self.category(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category().icon(), self.describe())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ann() -> Record {
        Record::new("Ann".to_string(), 5000, Role::Manager(Manager { team_size: 4 }))
    }

    #[test]
    fn test_manager_describe() {
        let record = ann();
        assert!(record.describe().contains("Manager Ann manages 4 people"));
        assert_eq!(
            record.describe(),
            "Manager Ann manages 4 people and earns $5000"
        );
    }

    #[test]
    fn test_manager_row() {
        let row = ann().to_row();

        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["Type", "Name", "Salary", "Team Size"]);
        assert_eq!(row.get("Type"), Some(&json!("Manager")));
        assert_eq!(row.get("Name"), Some(&json!("Ann")));
        assert_eq!(row.get("Salary"), Some(&json!(5000)));
        assert_eq!(row.get("Team Size"), Some(&json!(4)));
        assert_eq!(row.get("Language"), None);
    }

    #[test]
    fn test_developer_and_intern_rows() {
        let dev = Record::new(
            "Bo".to_string(),
            6000,
            Role::Developer(Developer { language: Language::Cpp }),
        );
        let intern = Record::new(
            "Cy".to_string(),
            1000,
            Role::Intern(Intern { duration_months: 6 }),
        );

        assert_eq!(dev.to_row().get("Language"), Some(&json!("C++")));
        assert_eq!(dev.describe(), "Developer Bo codes in C++ and earns $6000");
        assert_eq!(intern.to_row().get("Duration (months)"), Some(&json!(6)));
        assert_eq!(
            intern.describe(),
            "Intern Cy is here for 6 months and earns $1000"
        );
    }

    #[test]
    fn test_identity_key_ignores_attributes() {
        let a = ann();
        let b = Record::new("Ann".to_string(), 9000, Role::Manager(Manager { team_size: 12 }));
        let c = Record::new(
            "Ann".to_string(),
            5000,
            Role::Intern(Intern { duration_months: 3 }),
        );

        assert_eq!(a.identity_key(), a.identity_key());
        assert_eq!(a.identity_key(), b.identity_key());
        assert_ne!(a.identity_key(), c.identity_key());
        assert_eq!(
            a.identity_key(),
            IdentityKey { name: "Ann".to_string(), category: Category::Manager }
        );
    }

    #[test]
    fn test_row_serializes_as_object() {
        let value = serde_json::to_value(ann().to_row()).unwrap();
        assert_eq!(
            value,
            json!({"Type": "Manager", "Name": "Ann", "Salary": 5000, "Team Size": 4})
        );
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("C++".parse::<Language>(), Ok(Language::Cpp));
        assert_eq!("JavaScript".parse::<Language>(), Ok(Language::JavaScript));
        assert!("Rust-not-in-set".parse::<Language>().is_err());
        assert!("python".parse::<Language>().is_err());
    }

    #[test]
    fn test_selector_cycling() {
        assert_eq!(Category::Intern.next(), Category::Manager);
        assert_eq!(Category::Manager.previous(), Category::Intern);
        assert_eq!(Language::Cpp.next(), Language::Python);
        assert_eq!(Language::Python.previous(), Language::Cpp);
    }
}
