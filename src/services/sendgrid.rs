use crate::models::ContactRequest;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// Substitution keys interpolated by the provider-side template
const SUB_NAME: &str = "-contact_name-";
const SUB_EMAIL: &str = "-contact_email-";
const SUB_SUBJECT: &str = "-contact_subject-";
const SUB_MESSAGE: &str = "-contact_message-";

/// Top-level subject placeholder; the remote template carries the real one
const MAIL_SUBJECT: &str = "New contact form submission";

/// Errors that can occur when dispatching mail through SendGrid
#[derive(Debug, Error)]
pub enum SendGridError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

/// SendGrid v3 API client
///
/// Builds the transactional-template message for a contact submission and
/// submits it to the mail send endpoint. The response is returned
/// uninterpreted; callers classify it by status code.
pub struct SendGridClient {
    base_url: String,
    api_key: String,
    from_name: String,
    from_email: String,
    template_id: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

/// Recipient block carrying the template substitution variables
#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
    substitutions: HashMap<&'static str, &'a str>,
}

#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
    template_id: &'a str,
}

impl SendGridClient {
    /// Create a new SendGrid client
    ///
    /// The HTTP transport is supplied by the caller, so the hosting
    /// environment controls timeouts and TLS setup.
    pub fn new(
        base_url: String,
        api_key: String,
        from_name: String,
        from_email: String,
        template_id: String,
        client: Client,
    ) -> Self {
        Self {
            base_url,
            api_key,
            from_name,
            from_email,
            template_id,
            client,
        }
    }

    /// Submit a contact message to the mail send endpoint
    ///
    /// Returns the raw provider response. No retries, and no
    /// interpretation of the response body.
    pub async fn send(
        &self,
        contact: &ContactRequest,
    ) -> Result<reqwest::Response, SendGridError> {
        let url = format!("{}/v3/mail/send", self.base_url.trim_end_matches('/'));

        tracing::debug!("Dispatching contact message to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_payload(contact))
            .send()
            .await?;

        Ok(response)
    }

    fn build_payload<'a>(&'a self, contact: &'a ContactRequest) -> MailPayload<'a> {
        let substitutions = HashMap::from([
            (SUB_NAME, contact.name.as_str()),
            (SUB_EMAIL, contact.email.as_str()),
            (SUB_SUBJECT, contact.subject.as_str()),
            (SUB_MESSAGE, contact.message.as_str()),
        ]);

        MailPayload {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: &contact.email,
                    name: &contact.name,
                }],
                substitutions,
            }],
            from: EmailAddress {
                email: &self.from_email,
                name: &self.from_name,
            },
            subject: MAIL_SUBJECT,
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: &contact.subject,
                },
                Content {
                    content_type: "text/html",
                    value: &contact.subject,
                },
            ],
            template_id: &self.template_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> SendGridClient {
        SendGridClient::new(
            "https://api.sendgrid.test".to_string(),
            "test_key".to_string(),
            "Support".to_string(),
            "support@example.com".to_string(),
            "d-template".to_string(),
            Client::new(),
        )
    }

    fn test_contact() -> ContactRequest {
        ContactRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[test]
    fn test_sendgrid_client_creation() {
        let client = test_client();

        assert_eq!(client.base_url, "https://api.sendgrid.test");
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_payload_substitutions_round_trip() {
        let client = test_client();
        let contact = test_contact();

        let payload = serde_json::to_value(client.build_payload(&contact)).unwrap();

        let substitutions = &payload["personalizations"][0]["substitutions"];
        assert_eq!(substitutions["-contact_name-"], "Ann");
        assert_eq!(substitutions["-contact_email-"], "ann@x.com");
        assert_eq!(substitutions["-contact_subject-"], "Hi");
        assert_eq!(substitutions["-contact_message-"], "Hello");
    }

    #[test]
    fn test_payload_sender_and_recipient() {
        let client = test_client();
        let contact = test_contact();

        let payload = serde_json::to_value(client.build_payload(&contact)).unwrap();

        assert_eq!(payload["from"]["email"], "support@example.com");
        assert_eq!(payload["from"]["name"], "Support");
        assert_eq!(payload["template_id"], "d-template");

        let to = &payload["personalizations"][0]["to"][0];
        assert_eq!(to["email"], "ann@x.com");
        assert_eq!(to["name"], "Ann");

        // Both content parts carry the submitted subject
        assert_eq!(payload["content"][0]["type"], "text/plain");
        assert_eq!(payload["content"][0]["value"], "Hi");
        assert_eq!(payload["content"][1]["type"], "text/html");
        assert_eq!(payload["content"][1]["value"], "Hi");
    }
}
