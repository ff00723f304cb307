//! Records persisted in the JSON document.

pub mod document;
pub mod lenient;

pub use document::{
    Analytics, Bundle, Document, Sim, Subscription, Transaction, User, UserProfile, WifiSource,
};
