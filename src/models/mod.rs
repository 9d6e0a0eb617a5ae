mod agreement;
mod audit_event;
mod benefit;
mod charge;
mod classified;
mod contact_message;
mod event;
mod faq_entry;
mod member;
mod news;
mod org_profile;
mod partner;
mod password_reset_token;
mod service;
mod signup_session;

pub use agreement::{Agreement, AgreementRating};
pub use audit_event::AuditEvent;
pub use benefit::Benefit;
pub use charge::Charge;
pub use classified::{
    Classified, CLASSIFIED_CATEGORIES, CLASSIFIED_EXPIRY_DAYS, CLASSIFIED_LIMIT_PER_MEMBER,
};
pub use contact_message::ContactMessage;
pub use event::Event;
pub use faq_entry::FaqEntry;
pub use member::Member;
pub use news::{News, NewsComment, NewsLike, TagFollow};
pub use org_profile::OrgProfile;
pub use partner::Partner;
pub use password_reset_token::PasswordResetToken;
pub use service::Service;
pub use signup_session::SignupSession;
