// Route exports
pub mod contact;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(contact::configure);
}
