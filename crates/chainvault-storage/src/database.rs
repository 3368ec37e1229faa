// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background thread.
//! The ledger and the blob store share one [`Database`] handle.

use chainvault_core::VaultError;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into `VaultError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> VaultError {
    VaultError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the chainvault SQLite database.
///
/// Cloning shares the single background connection.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database at `path` and run migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, VaultError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| VaultError::Storage {
                source: Box::new(e),
            })?;
        }

        // Schema setup runs on a plain connection before the shared one opens.
        let migrate_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), VaultError> {
            let mut conn =
                rusqlite::Connection::open(&migrate_path).map_err(|e| VaultError::Storage {
                    source: Box::new(e),
                })?;
            if wal_mode {
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                    row.get::<_, String>(0)
                })
                .map_err(|e| VaultError::Storage {
                    source: Box::new(e),
                })?;
            }
            migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| VaultError::Internal(format!("migration task failed: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| VaultError::Storage {
                source: Box::new(e),
            })?;
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch(
                "PRAGMA foreign_keys = ON;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA synchronous = NORMAL;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path = %path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Cheap liveness probe.
    pub async fn ping(&self) -> Result<(), VaultError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint the WAL so the database file is self-contained.
    pub async fn checkpoint(&self) -> Result<(), VaultError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
