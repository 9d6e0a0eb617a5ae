pub mod admin;
pub mod auth;
pub mod classifieds;
pub mod contact;
pub mod directory;
pub mod me;
pub mod news;
pub mod signup;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/bootstrap", post(auth::bootstrap))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        // Signup wizard
        .route("/api/v1/signup", post(signup::start))
        .route("/api/v1/signup/quote", get(signup::quote))
        .route("/api/v1/signup/{id}", get(signup::get))
        .route("/api/v1/signup/{id}/plan", post(signup::submit_plan))
        .route("/api/v1/signup/{id}/details", post(signup::submit_details))
        .route("/api/v1/signup/{id}/contract", post(signup::upload_contract))
        .route(
            "/api/v1/signup/{id}/contract-document",
            get(signup::contract_document),
        )
        .route("/api/v1/signup/{id}/back", post(signup::back))
        .route("/api/v1/signup/{id}/confirm", post(signup::confirm))
        // Member area
        .route("/api/v1/me", get(me::profile).put(me::update_profile))
        .route("/api/v1/me/charges", get(me::charges))
        .route("/api/v1/me/charges/{id}/receipt", get(me::receipt))
        .route(
            "/api/v1/me/tag-follows",
            get(me::tag_follows).put(me::update_tag_follows),
        )
        .route("/api/v1/me/notifications", get(me::notifications))
        // Public directory
        .route("/api/v1/info", get(directory::org_profile))
        .route("/api/v1/benefits", get(directory::benefits))
        .route("/api/v1/services", get(directory::services))
        .route("/api/v1/agreements", get(directory::agreements))
        .route("/api/v1/agreements/featured", get(directory::featured_agreements))
        .route("/api/v1/agreements/{id}", get(directory::agreement_detail))
        .route("/api/v1/agreements/{id}/rating", post(directory::rate_agreement))
        .route("/api/v1/events", get(directory::events))
        .route("/api/v1/faq", get(directory::faq))
        // News feed
        .route("/api/v1/news", get(news::list))
        .route("/api/v1/news/{id}", get(news::detail))
        .route("/api/v1/news/{id}/comments", post(news::comment))
        .route(
            "/api/v1/news/{id}/like",
            post(news::like).delete(news::unlike),
        )
        // Classifieds board
        .route(
            "/api/v1/classifieds",
            get(classifieds::list).post(classifieds::create),
        )
        // Contact form
        .route("/api/v1/contact", post(contact::submit))
        // Admin: members
        .route(
            "/api/v1/admin/members",
            get(admin::members::list).post(admin::members::create),
        )
        .route(
            "/api/v1/admin/members/{id}",
            put(admin::members::update).delete(admin::members::delete),
        )
        .route("/api/v1/admin/members/{id}/approve", post(admin::members::approve))
        .route("/api/v1/admin/members/{id}/status", post(admin::members::set_status))
        // Admin: institutional profile
        .route("/api/v1/admin/org-profile", put(admin::catalog::update_org_profile))
        // Admin: services
        .route("/api/v1/admin/services", post(admin::catalog::create_service))
        .route(
            "/api/v1/admin/services/{id}",
            put(admin::catalog::update_service).delete(admin::catalog::delete_service),
        )
        // Admin: benefits
        .route("/api/v1/admin/benefits", post(admin::catalog::create_benefit))
        .route(
            "/api/v1/admin/benefits/{id}",
            put(admin::catalog::update_benefit).delete(admin::catalog::delete_benefit),
        )
        // Admin: FAQ
        .route(
            "/api/v1/admin/faq",
            get(admin::catalog::list_faq).post(admin::catalog::create_faq),
        )
        .route(
            "/api/v1/admin/faq/{id}",
            put(admin::catalog::update_faq).delete(admin::catalog::delete_faq),
        )
        // Admin: agreements & partners
        .route(
            "/api/v1/admin/agreements",
            get(admin::content::list_agreements).post(admin::content::create_agreement),
        )
        .route(
            "/api/v1/admin/agreements/{id}",
            put(admin::content::update_agreement).delete(admin::content::delete_agreement),
        )
        .route(
            "/api/v1/admin/partners",
            get(admin::content::list_partners).post(admin::content::create_partner),
        )
        .route(
            "/api/v1/admin/partners/{id}",
            put(admin::content::update_partner).delete(admin::content::delete_partner),
        )
        // Admin: news & events
        .route(
            "/api/v1/admin/news",
            get(admin::content::list_news).post(admin::content::create_news),
        )
        .route(
            "/api/v1/admin/news/{id}",
            put(admin::content::update_news).delete(admin::content::delete_news),
        )
        .route(
            "/api/v1/admin/events",
            get(admin::content::list_events).post(admin::content::create_event),
        )
        .route(
            "/api/v1/admin/events/{id}",
            put(admin::content::update_event).delete(admin::content::delete_event),
        )
        // Admin: billing
        .route(
            "/api/v1/admin/charges",
            get(admin::billing::list).post(admin::billing::create),
        )
        .route("/api/v1/admin/charges/summary", get(admin::billing::summary))
        .route(
            "/api/v1/admin/charges/{id}/status",
            post(admin::billing::update_status),
        )
        .route("/api/v1/admin/charges/{id}", delete(admin::billing::delete))
        // Admin: moderation
        .route("/api/v1/admin/comments", get(admin::moderation::list_comments))
        .route(
            "/api/v1/admin/comments/{id}/status",
            post(admin::moderation::set_comment_status),
        )
        .route(
            "/api/v1/admin/comments/{id}",
            delete(admin::moderation::delete_comment),
        )
        .route(
            "/api/v1/admin/classifieds",
            get(admin::moderation::list_classifieds),
        )
        .route(
            "/api/v1/admin/classifieds/{id}/status",
            post(admin::moderation::set_classified_status),
        )
        .route(
            "/api/v1/admin/classifieds/{id}/feature",
            post(admin::moderation::set_classified_featured),
        )
        .route(
            "/api/v1/admin/classifieds/{id}",
            delete(admin::moderation::delete_classified),
        )
        .route("/api/v1/admin/contacts", get(admin::moderation::list_contacts))
        .route(
            "/api/v1/admin/contacts/{id}/status",
            post(admin::moderation::set_contact_status),
        )
        .route(
            "/api/v1/admin/contacts/{id}",
            delete(admin::moderation::delete_contact),
        )
        // Admin: activity log
        .route("/api/v1/admin/audit", get(admin::moderation::list_audit))
}
