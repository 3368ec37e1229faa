// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for chainvault integration tests.
//!
//! Provides in-memory collaborators with fault injection and a harness
//! that wires them into a ready vault session, so tests run fast and
//! deterministically without a database or a real chain.
//!
//! # Components
//!
//! - [`MockLedger`] - Ordered in-memory ledger with switchable failures
//! - [`MockBlobStore`] - Content-addressed in-memory blob store
//! - [`TestHarness`] - Session plus mocks, with a cheap KDF

pub mod harness;
pub mod mock_blob_store;
pub mod mock_ledger;

pub use harness::TestHarness;
pub use mock_blob_store::MockBlobStore;
pub use mock_ledger::MockLedger;
