//! # Rolodex Architecture
//!
//! Rolodex is a console contact manager. The interactive loop is a thin
//! client; the book, the commands and the persistence format are a library
//! that never assumes a terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs, render.rs, wired by main.rs)          │
//! │  - Reads one command per line, prints results               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Dispatcher (dispatch.rs)                                   │
//! │  - Command word → command, prompts for parameters           │
//! │  - Auto-save after every mutating command                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Operates on the book, returns `CmdResult`                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Book + Codec (book.rs, codec/)                             │
//! │  - AddressBook owns the contacts                            │
//! │  - Codec trait: JsonFileCodec (production), MemoryCodec     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From the dispatcher inward nothing writes to stdout; questions go through
//! the [`dispatch::Prompt`] trait, answers come back as [`commands::CmdResult`].
//! That keeps every layer testable with `MemoryCodec` and scripted input.
//!
//! The [`exchange`] module backs the separate `rates` binary and does not
//! depend on the contact code.
//!
//! ## Module Overview
//!
//! - [`model`]: `Contact`, editable fields and validation rules
//! - [`book`]: `AddressBook` and load/save through a codec
//! - [`codec`]: storage trait and the JSON document format
//! - [`commands`]: one module per command
//! - [`dispatch`]: command parsing, parameter prompts, auto-save hook
//! - [`session`]: the interactive loop
//! - [`render`]: colored messages and contact tables
//! - [`config`]: `config.json` in the data directory
//! - [`logging`]: stderr logging bootstrap
//! - [`exchange`]: exchange-rate fetching for `rates`
//! - [`error`]: error types

pub mod book;
pub mod codec;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exchange;
pub mod logging;
pub mod model;
pub mod render;
pub mod session;
