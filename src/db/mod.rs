pub mod agreement_ratings;
pub mod agreements;
pub mod audit;
pub mod benefits;
pub mod charges;
pub mod classifieds;
pub mod contacts;
pub mod events;
pub mod faq;
pub mod members;
pub mod news;
pub mod news_comments;
pub mod news_likes;
pub mod org_profile;
pub mod partners;
pub mod password_reset_tokens;
pub mod services;
pub mod signup_sessions;
pub mod tag_follows;
