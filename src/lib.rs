//! Mailform - contact form web service
//!
//! Renders the contact page, validates submissions and forwards them to
//! SendGrid's transactional mail API as a templated message. Fully
//! stateless between requests; the only shared state is the immutable
//! configuration and the dispatcher client.

pub mod config;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use models::{ContactForm, ContactRequest, HealthResponse};
pub use routes::contact::{AppState, ContactPage};
pub use services::{SendGridClient, SendGridError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let page = ContactPage::confirmed("Ann");
        assert!(page.confirmation.contains("Ann"));
        assert!(!page.show_form);
    }
}
