// Questionnaire-driven resume generation.
// Backends implement ContentGenerator; the default fills fixed templates.

pub mod generator;
pub mod handlers;

pub use generator::{ContentGenerator, TemplatedGenerator};
