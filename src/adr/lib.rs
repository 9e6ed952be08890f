//! # ADR Architecture
//!
//! A **UI-agnostic library** for managing Architecture Decision Records: markdown
//! documents paired with JSON metadata sidecars, kept in sync both ways. The CLI
//! in `main.rs` is just one client of the library.
//!
//! ## The Layered Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (string ids → u32 record ids)          │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract RecordStore trait                               │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Documents and Metadata
//!
//! Every record is a pair of files sharing a `{id:05}-{slug}` stem: a markdown
//! document the user edits freely, and a JSON sidecar the tool maintains. The
//! markdown is the source of truth; `sync` (and the lazy rebuild the commands
//! perform when a sidecar is missing) re-derives the metadata from the document
//! via [`sync::update_from_markdown`]. The Decision and Consequences sections
//! live only in the markdown and are never serialized.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Record`, `AdrStatus`, `Supersedes`)
//! - [`markdown`]: Line-oriented section extraction and editing
//! - [`sync`]: Metadata reconstruction from markdown documents
//! - [`template`]: Document rendering for new records
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod markdown;
pub mod model;
pub mod store;
pub mod sync;
pub mod template;
