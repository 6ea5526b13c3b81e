use actix_web::{error, http::StatusCode, web, HttpResponse, Responder};
use askama::Template;
use validator::Validate;

use crate::models::{ContactForm, ContactRequest, HealthResponse};
use crate::services::SendGridClient;
use std::sync::Arc;

/// Warning shown when a required field is missing
pub const REQUIRED_FIELDS_WARNING: &str = "Please verify required fields";

/// Warning shown when the provider rejects the message or the send fails
pub const SEND_FAILED_WARNING: &str = "Error sending message.";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub sendgrid: Arc<SendGridClient>,
}

/// Parameters for the contact page
///
/// At most one of `confirmation`/`warning` is non-empty; both are empty
/// on the initial GET.
#[derive(Template)]
#[template(path = "index.html")]
pub struct ContactPage {
    pub confirmation: String,
    pub warning: String,
    pub show_form: bool,
}

impl ContactPage {
    /// Empty form with no messages
    pub fn form() -> Self {
        Self {
            confirmation: String::new(),
            warning: String::new(),
            show_form: true,
        }
    }

    /// Submission accepted; the form is hidden
    pub fn confirmed(name: &str) -> Self {
        Self {
            confirmation: format!("Thanks for your message, {name}!"),
            warning: String::new(),
            show_form: false,
        }
    }

    /// Submission not accepted; the form stays visible for a resubmit
    pub fn warned(message: &str) -> Self {
        Self {
            confirmation: String::new(),
            warning: message.to_string(),
            show_form: true,
        }
    }
}

/// Render the contact page with the given status code
pub fn render(status: StatusCode, page: &ContactPage) -> HttpResponse {
    match page.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            tracing::error!("Failed to render contact page: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Handle undecodable form submissions with the standard warning page
pub fn handle_form_payload_error(
    err: error::UrlencodedError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);
    let response = render(
        StatusCode::BAD_REQUEST,
        &ContactPage::warned(REQUIRED_FIELDS_WARNING),
    );
    error::InternalError::from_response(err, response).into()
}

/// Configure all contact-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        // Unmatched methods on "/" get a 405 from the resource default
        web::resource("/")
            .route(web::get().to(page))
            .route(web::post().to(submit)),
    )
    .route("/health", web::get().to(health_check));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Contact page endpoint
///
/// GET /
async fn page() -> impl Responder {
    render(StatusCode::OK, &ContactPage::form())
}

/// Contact submission endpoint
///
/// POST /
///
/// Form fields: `name`, `email`, `subject` (required) and `message`
/// (optional). Fields missing from the body arrive as empty strings.
async fn submit(state: web::Data<AppState>, form: web::Form<ContactForm>) -> impl Responder {
    if let Err(errors) = form.validate() {
        tracing::info!("Contact form validation failed: {}", errors);
        return render(
            StatusCode::BAD_REQUEST,
            &ContactPage::warned(REQUIRED_FIELDS_WARNING),
        );
    }

    let contact = ContactRequest::from(form.into_inner());

    tracing::info!("Forwarding contact message from {}", contact.email);

    match state.sendgrid.send(&contact).await {
        Ok(response) if response.status().is_success() => {
            render(StatusCode::OK, &ContactPage::confirmed(&contact.name))
        }
        Ok(response) => {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("SendGrid rejected contact message: {} - {}", status, body);
            render(StatusCode::OK, &ContactPage::warned(SEND_FAILED_WARNING))
        }
        Err(e) => {
            tracing::error!("Failed to send contact message: {}", e);
            render(StatusCode::OK, &ContactPage::warned(SEND_FAILED_WARNING))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_states() {
        let page = ContactPage::form();
        assert!(page.confirmation.is_empty());
        assert!(page.warning.is_empty());
        assert!(page.show_form);

        let page = ContactPage::confirmed("Ann");
        assert_eq!(page.confirmation, "Thanks for your message, Ann!");
        assert!(page.warning.is_empty());
        assert!(!page.show_form);

        let page = ContactPage::warned(SEND_FAILED_WARNING);
        assert!(page.confirmation.is_empty());
        assert_eq!(page.warning, SEND_FAILED_WARNING);
        assert!(page.show_form);
    }

    #[test]
    fn test_empty_form_renders() {
        let html = ContactPage::form().render().unwrap();

        assert!(html.contains("<form"));
        assert!(!html.contains("Thanks for your message"));
        assert!(!html.contains(SEND_FAILED_WARNING));
    }

    #[test]
    fn test_confirmation_hides_form() {
        let html = ContactPage::confirmed("Ann").render().unwrap();

        assert!(html.contains("Thanks for your message, Ann!"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn test_warning_keeps_form_visible() {
        let html = ContactPage::warned(REQUIRED_FIELDS_WARNING).render().unwrap();

        assert!(html.contains(REQUIRED_FIELDS_WARNING));
        assert!(html.contains("<form"));
    }
}
