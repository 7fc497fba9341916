//! # Portico Rules
//!
//! Named guard checks that run against a request context before injection
//! resolution starts. Rules gate the pipeline: the orchestrator runs every
//! rule declared for a handler to completion (or first failure) before any
//! resolver is invoked.
//!
//! Rule definitions are looked up by name through the [`RuleBook`]
//! collaborator; [`StaticRuleBook`] is the in-memory implementation used by
//! applications and tests.

#![doc(html_root_url = "https://docs.rs/portico-rules/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod rule;

pub use engine::run_rules;
pub use rule::{FnRule, Rule, RuleBook, StaticRuleBook};
