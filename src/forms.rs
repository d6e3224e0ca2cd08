//! Field-level validation results shared by the auth, listing and contact forms.

use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationErrors};

/// Human-readable messages keyed by form field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages for one field, in the order the rules are declared
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();

        for (field, failures) in errors.field_errors() {
            let messages = failures
                .iter()
                .map(|failure| match &failure.message {
                    Some(message) => message.to_string(),
                    None => format!("invalid {}", field),
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }

        Self { fields }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Runs the derived rules of `form`
pub fn check<T: Validate>(form: &T) -> Result<(), FormErrors> {
    form.validate().map_err(FormErrors::from)
}
