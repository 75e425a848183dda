//! Add/edit record form.

use crate::models::{Customer, CustomerDraft, CustomerPatch, Status};
use crate::table::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Email,
    Status,
    Country,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Status,
        FormField::Country,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Status => "Status",
            FormField::Country => "Country",
        }
    }

    /// Key used in [`ValidationErrors`].
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Status => "status",
            FormField::Country => "country",
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Status,
            FormField::Status => FormField::Country,
            FormField::Country => FormField::Name,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Name => FormField::Country,
            FormField::Email => FormField::Name,
            FormField::Status => FormField::Email,
            FormField::Country => FormField::Status,
        }
    }
}

/// Editable form buffers plus the errors of the last submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub name: String,
    pub email: String,
    pub status: Status,
    pub country: String,
    pub focus: FormField,
    pub errors: ValidationErrors,
}

impl FormState {
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            email: String::new(),
            status: Status::Active,
            country: String::new(),
            focus: FormField::Name,
            errors: ValidationErrors::new(),
        }
    }

    pub fn edit(customer: &Customer) -> Self {
        Self {
            mode: FormMode::Edit(customer.id),
            name: customer.name.clone(),
            email: customer.email.clone(),
            status: customer.status,
            country: customer.country.clone(),
            focus: FormField::Name,
            errors: ValidationErrors::new(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Customer",
            FormMode::Edit(_) => "Edit Customer",
        }
    }

    /// Text buffer of the focused field, `None` for the status picker.
    pub fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Country => Some(&mut self.country),
            FormField::Status => None,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Status => self.status.label(),
            FormField::Country => &self.country,
        }
    }

    pub fn error(&self, field: FormField) -> Option<String> {
        self.errors.for_field(field.key()).map(|e| e.message())
    }

    pub fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            status: self.status,
            country: self.country.trim().to_string(),
            created: None,
        }
    }

    pub fn to_patch(&self) -> CustomerPatch {
        CustomerPatch {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            status: Some(self.status),
            country: Some(self.country.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_customers;

    #[test]
    fn test_edit_prefills_record() {
        let customer = &sample_customers()[0];
        let form = FormState::edit(customer);
        assert_eq!(form.mode, FormMode::Edit(customer.id));
        assert_eq!(form.value(FormField::Email), customer.email);
        assert_eq!(form.title(), "Edit Customer");
    }

    #[test]
    fn test_focus_cycles() {
        let mut form = FormState::add();
        for _ in 0..FormField::ALL.len() {
            form.focus = form.focus.next();
        }
        assert_eq!(form.focus, FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Country);

        form.focus = FormField::Status;
        assert!(form.focused_text().is_none());
    }

    #[test]
    fn test_draft_trims_input() {
        let mut form = FormState::add();
        form.name = "  Ada  ".into();
        form.email = " ada@example.com ".into();
        let draft = form.to_draft();
        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.email, "ada@example.com");
        assert!(draft.created.is_none());
    }
}
