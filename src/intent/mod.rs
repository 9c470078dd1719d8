pub mod classifier;
pub mod keywords;

pub use classifier::{IntentMatch, IntentRouter};
