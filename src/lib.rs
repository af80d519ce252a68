// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # lumina
//!
//! A terminal document browser over a fixed document set, with category
//! filtering, text search, a detail viewer, and two features backed by a
//! generative-language service: single-document summaries and training
//! roadmaps synthesized from a topic and every document's summary.
//!
//! ## Architecture
//!
//! - **Store** (`store`): immutable, ordered documents loaded from a TOML fixture
//! - **Query** (`query`): category + case-insensitive title/tag filter, order-preserving
//! - **Gateway** (`gateway`): prompt building, declared response schema, decoding; Gemini over HTTP
//! - **Controller** (`controller`): explicit view state driven by events, emitting AI effects
//! - **TUI** (`tui`): ratatui front end running AI effects on worker threads
//!
//! ## Library usage
//!
//! ```no_run
//! use lumina::config::AiConfig;
//! use lumina::controller::{Browser, Event};
//! use lumina::gateway::AiGateway;
//! use lumina::store::DocumentStore;
//!
//! let gateway = AiGateway::gemini(&AiConfig::default());
//! let mut browser = Browser::new(DocumentStore::bundled().unwrap());
//! browser.dispatch(Event::SetSearch("security".into())).unwrap();
//! browser.dispatch(Event::Select("2".into())).unwrap();
//! if let Some(effect) = browser.dispatch(Event::Summarize).unwrap() {
//!     browser.dispatch(effect.run(&gateway)).unwrap();
//! }
//! println!("{:?}", browser.state().summary());
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod model;
pub mod paths;
pub mod query;
pub mod session;
pub mod store;
pub mod tui;
