use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact form submission, as posted from the page
///
/// Fields absent from the body deserialize as empty strings; `name`,
/// `email` and `subject` must be non-empty to pass validation. The
/// message body is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}
