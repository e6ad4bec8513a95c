//! Tutor chat relay.
//!
//! Free-text questions from the learner are forwarded to an OpenAI-compatible
//! chat-completion API (Groq by default) primed with an English teacher
//! persona. Any failure along the way turns into a fixed apology so the
//! frontend always gets a reply to display.

pub mod client;
pub mod routes;

pub use client::{TutorClient, TutorError};
pub use routes::{FALLBACK_REPLY, RATE_LIMITED_REPLY, routes};
