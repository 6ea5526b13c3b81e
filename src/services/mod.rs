// Service exports
pub mod sendgrid;

pub use sendgrid::{SendGridClient, SendGridError};
