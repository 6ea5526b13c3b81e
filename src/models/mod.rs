// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::ContactRequest;
pub use requests::ContactForm;
pub use responses::HealthResponse;
