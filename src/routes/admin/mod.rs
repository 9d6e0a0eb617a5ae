pub mod billing;
pub mod catalog;
pub mod content;
pub mod members;
pub mod moderation;
