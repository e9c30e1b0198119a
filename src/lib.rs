//! dialogue-forge: synthetic multi-turn depression-screening dialogues.
//!
//! The crate samples a seeded patient profile (archetype template,
//! symptom frequencies, voice style, life context) and a doctor persona
//! with microstyle deltas, then drives a doctor/patient conversation
//! through controller LLM roles until a nine-item checklist is covered.
//! Finished sessions are exported as JSON records keyed by a
//! configuration fingerprint.
//!
//! Layering, bottom up:
//! - [`catalog`]: static registries of templates, pools, personas, and
//!   the checklist.
//! - [`sampler`]: seeded weighted sampling with per-field seed streams.
//! - [`profile`]: patient/doctor profile generation and severity scoring.
//! - [`llm`], [`prompts`], [`manager`], [`background`]: collaborator
//!   plumbing around an OpenRouter-compatible provider.
//! - [`session`]: turn budget, disclosure pacing, and the turn loop.
//! - [`export`], [`cli`]: record output and the command-line surface.

pub mod background;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod llm;
pub mod manager;
pub mod profile;
pub mod prompts;
pub mod sampler;
pub mod session;
