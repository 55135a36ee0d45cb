//! # ck-ai
//!
//! Third-party AI glue and the assistant logic built on it:
//!
//! - [`avatar::AvatarClient`] talks to the hosted video-avatar service
//!   (video generation and live conversations).
//! - [`speech::SpeechClient`] renders text to audio.
//! - [`poll`] drives the video generation status loop.
//! - [`responder::Responder`] maps transcripts to assistant replies.
//! - [`script`] builds the narrated project summary.
//! - [`nudge`] renders nudge messages.
//! - [`transcript`] carries recognized speech into the responder.

pub mod avatar;
pub mod nudge;
pub mod poll;
pub mod responder;
pub mod script;
pub mod speech;
pub mod transcript;

pub use avatar::AvatarClient;
pub use poll::{VideoPollState, POLL_INTERVAL, MAX_POLL_ATTEMPTS};
pub use responder::Responder;
pub use speech::{SpeechClient, VoiceSettings};
