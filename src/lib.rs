//! Serverless-style gateway for OpenAI chat and image generation.
//!
//! Accepts an HTTP event (method, headers, body), validates it as a
//! chat/image/video generation request, forwards it to the OpenAI API, and
//! normalizes the outcome into a stable JSON response envelope.

pub mod ai;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod ingress;
pub mod models;
pub mod prompts;
pub mod router;

pub use error::{Error, Result};
