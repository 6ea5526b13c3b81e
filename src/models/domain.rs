use serde::{Deserialize, Serialize};

use crate::models::ContactForm;

/// A validated contact message, ready for dispatch
///
/// Constructed from a `ContactForm` only after validation has passed;
/// `name`, `email` and `subject` are non-empty here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<ContactForm> for ContactRequest {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
        }
    }
}
