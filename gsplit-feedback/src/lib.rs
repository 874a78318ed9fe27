//! Feedback selection for split-the-G scores and pub ratings.
//!
//! A [`FeedbackSelector`] maps a score to one of the validated tiers of a
//! [`FeedbackTable`] and returns either a pre-written template or, with a
//! small fixed probability, text from an injected
//! [`TextGenerator`](gsplit_core::TextGenerator). Generation failures are
//! absorbed; selection always yields text. Randomness comes from an injected
//! [`DrawSource`] so both branches are testable.

#![forbid(unsafe_code)]

mod bank;
mod draw;
mod error;
mod nonempty;
mod policy;
mod pub_roast;
mod selector;
mod table;
mod template;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bank::{default_table, pub_pool, pub_prompt, split_prompt};
pub use draw::{DrawSource, SeededDraw};
pub use error::FeedbackTableError;
pub use policy::{
    GenerationPolicy, PUB_MAX_TOKENS, SPLIT_GENERATION_PROBABILITY, SPLIT_MAX_TOKENS,
};
pub use pub_roast::{PubRating, PubRoast, PubRoastSelector, PubTier};
pub use selector::{Feedback, FeedbackSelector, FeedbackSource};
pub use table::{FeedbackTable, FeedbackTier};
pub use template::{DISTANCE_PLACEHOLDER, Template, ensure_terminal_punctuation};
