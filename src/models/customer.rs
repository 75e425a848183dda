//! Customer records shown in the data table.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::table::{EditableRow, SortKey, TableRow, ValidationErrors};

/// Account status of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
    Pending,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[Status::Active, Status::Inactive, Status::Pending]
    }

    /// Stored value (`"active"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Pending => "pending",
        }
    }

    /// Badge label (`"Active"`).
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Pending => "Pending",
        }
    }

    /// Next status in form cycling order.
    pub fn next(&self) -> Status {
        match self {
            Status::Active => Status::Inactive,
            Status::Inactive => Status::Pending,
            Status::Pending => Status::Active,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            "pending" => Ok(Status::Pending),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Columns of the customer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerField {
    Id,
    Name,
    Email,
    Status,
    Country,
    Created,
}

impl CustomerField {
    pub const ALL: [CustomerField; 6] = [
        CustomerField::Id,
        CustomerField::Name,
        CustomerField::Email,
        CustomerField::Status,
        CustomerField::Country,
        CustomerField::Created,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CustomerField::Id => "id",
            CustomerField::Name => "name",
            CustomerField::Email => "email",
            CustomerField::Status => "status",
            CustomerField::Country => "country",
            CustomerField::Created => "created",
        }
    }
}

impl FromStr for CustomerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerField::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown column '{}'", s))
    }
}

/// One customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub status: Status,
    pub country: String,
    pub created: NaiveDate,
}

/// Form input for a new customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub status: Status,
    pub country: String,
    /// Defaults to today.
    pub created: Option<NaiveDate>,
}

impl CustomerDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            status: Status::Active,
            country: String::new(),
            created: None,
        }
    }
}

/// Fields to merge into an existing customer. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<Status>,
    pub country: Option<String>,
}

impl CustomerPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl TableRow for Customer {
    type Field = CustomerField;

    fn id(&self) -> u64 {
        self.id
    }

    fn fields() -> &'static [CustomerField] {
        &CustomerField::ALL
    }

    fn field_name(field: CustomerField) -> &'static str {
        field.name()
    }

    fn is_numeric(field: CustomerField) -> bool {
        field == CustomerField::Id
    }

    fn cell(&self, field: CustomerField) -> String {
        match field {
            CustomerField::Id => self.id.to_string(),
            CustomerField::Name => self.name.clone(),
            CustomerField::Email => self.email.clone(),
            CustomerField::Status => self.status.as_str().to_string(),
            CustomerField::Country => self.country.clone(),
            CustomerField::Created => self.created.format("%Y-%m-%d").to_string(),
        }
    }

    fn sort_key(&self, field: CustomerField) -> SortKey {
        match field {
            CustomerField::Id => SortKey::Integer(i128::from(self.id)),
            CustomerField::Created => SortKey::Integer(i128::from(self.created.num_days_from_ce())),
            other => SortKey::text(&self.cell(other)),
        }
    }
}

impl EditableRow for Customer {
    type Draft = CustomerDraft;
    type Patch = CustomerPatch;
    type Status = Status;

    fn from_draft(id: u64, draft: CustomerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            status: draft.status,
            country: draft.country,
            created: draft.created.unwrap_or_else(|| Local::now().date_naive()),
        }
    }

    fn apply_patch(&mut self, patch: CustomerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(country) = patch.country {
            self.country = country;
        }
    }

    fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .require(CustomerField::Name.name(), &self.name)
            .require_email(CustomerField::Email.name(), &self.email);
        errors.finish()
    }
}

/// Error types that can occur while loading a seed file.
#[derive(Debug)]
pub enum SeedError {
    Io(String),
    Parse(String),
    /// Two records share an identifier.
    DuplicateId(u64),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io(msg) => write!(f, "I/O error: {}", msg),
            SeedError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SeedError::DuplicateId(id) => write!(f, "duplicate customer id {}", id),
        }
    }
}

impl std::error::Error for SeedError {}

/// Loads customers from a JSON array.
pub fn load_seed(path: &Path) -> Result<Vec<Customer>, SeedError> {
    let raw = fs::read_to_string(path).map_err(|e| SeedError::Io(e.to_string()))?;
    parse_seed(&raw)
}

/// Parses customers from JSON text, rejecting duplicate identifiers.
pub fn parse_seed(raw: &str) -> Result<Vec<Customer>, SeedError> {
    let customers: Vec<Customer> =
        serde_json::from_str(raw).map_err(|e| SeedError::Parse(e.to_string()))?;
    let mut seen = std::collections::HashSet::new();
    for c in &customers {
        if !seen.insert(c.id) {
            return Err(SeedError::DuplicateId(c.id));
        }
    }
    Ok(customers)
}

fn customer(
    id: u64,
    name: &str,
    email: &str,
    status: Status,
    country: &str,
    (y, m, d): (i32, u32, u32),
) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        email: email.to_string(),
        status,
        country: country.to_string(),
        created: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
    }
}

/// The fixed sample the table starts with.
pub fn sample_customers() -> Vec<Customer> {
    use Status::*;
    vec![
        customer(1, "John Doe", "john.doe@example.com", Active, "USA", (2025, 1, 15)),
        customer(2, "Jane Smith", "jane.smith@example.com", Inactive, "Canada", (2025, 1, 18)),
        customer(3, "Bob Johnson", "bob.johnson@example.com", Active, "UK", (2025, 1, 20)),
        customer(4, "Alice Williams", "alice.williams@example.com", Pending, "Germany", (2025, 1, 22)),
        customer(5, "Charlie Brown", "charlie.brown@example.com", Active, "France", (2025, 1, 25)),
        customer(6, "Diana Miller", "diana.miller@example.com", Inactive, "USA", (2025, 1, 27)),
        customer(7, "Edward Davis", "edward.davis@example.com", Active, "Canada", (2025, 1, 28)),
        customer(8, "Fiona Clark", "fiona.clark@example.com", Pending, "UK", (2025, 1, 30)),
        customer(9, "George Wilson", "george.wilson@example.com", Active, "Germany", (2025, 2, 1)),
        customer(10, "Hannah Moore", "hannah.moore@example.com", Inactive, "France", (2025, 2, 3)),
        customer(11, "Ian Taylor", "ian.taylor@example.com", Active, "Japan", (2025, 2, 5)),
        customer(12, "Julia Adams", "julia.adams@example.com", Pending, "Australia", (2025, 2, 7)),
        customer(13, "Kevin White", "kevin.white@example.com", Active, "Brazil", (2025, 2, 9)),
        customer(14, "Laura Harris", "laura.harris@example.com", Inactive, "India", (2025, 2, 11)),
        customer(15, "Mike Robinson", "mike.robinson@example.com", Active, "China", (2025, 2, 13)),
        customer(16, "Nancy Garcia", "nancy.garcia@example.com", Pending, "USA", (2025, 2, 15)),
        customer(17, "Oscar Lee", "oscar.lee@example.com", Active, "Canada", (2025, 2, 17)),
        customer(18, "Patricia King", "patricia.king@example.com", Inactive, "UK", (2025, 2, 19)),
        customer(19, "Quincy Martinez", "quincy.martinez@example.com", Active, "Germany", (2025, 2, 21)),
        customer(20, "Rachel Scott", "rachel.scott@example.com", Pending, "France", (2025, 2, 23)),
    ]
}
