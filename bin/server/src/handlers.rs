//! HTTP request handlers

pub mod drafts;
pub mod error;
pub mod health;
pub mod page;
pub mod register;
pub mod registration_form;

use actix_web::web;

/// Register every route on an app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(page::form_page)
        .service(page::submit_page)
        .service(register::register)
        .service(drafts::create_draft)
        .service(drafts::get_draft)
        .service(drafts::set_field)
        .service(drafts::toggle_course)
        .service(drafts::select_image)
        .service(drafts::clear_image)
        .service(drafts::submit_draft)
        .service(drafts::discard_draft);
}
