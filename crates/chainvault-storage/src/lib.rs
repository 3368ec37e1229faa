// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for chainvault: a local ledger and a content-addressed
//! blob store sharing one database.
//!
//! Provides WAL-mode SQLite storage with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`.

pub mod blob_store;
pub mod database;
pub mod ledger;
pub mod migrations;

pub use blob_store::SqliteBlobStore;
pub use database::Database;
pub use ledger::SqliteLedger;
