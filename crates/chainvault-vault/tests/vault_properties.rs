// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault session behavior against the in-memory collaborators.

use std::sync::Arc;

use chainvault_core::{
    BlobRef, BlobStoreAdapter, DecryptionError, ErrorKind, NetworkInfo, VaultError, WalletAdapter,
};
use chainvault_test_utils::{MockBlobStore, MockLedger, TestHarness};
use chainvault_vault::SessionState;
use chainvault_wallet::{DeviceKeypair, LocalWallet};
use secrecy::ExposeSecret;

#[tokio::test]
async fn duplicate_website_is_rejected_and_ledger_keeps_one_entry() {
    let h = TestHarness::ready().await.unwrap();
    h.add("example.com", "alice", "first").await.unwrap();

    let err = h.add("example.com", "bob", "second").await.unwrap_err();
    assert!(matches!(err, VaultError::DuplicateWebsite { ref website } if website == "example.com"));
    assert!(!err.is_transient());

    let entries = h.ledger.entries().await;
    assert_eq!(entries.len(), 1);
    let kept = h.session.get_credential("example.com").await.unwrap();
    assert_eq!(kept.username, "alice");
    assert_eq!(kept.password.expose_secret(), "first");
}

#[tokio::test]
async fn list_isolates_a_corrupted_reference() {
    let h = TestHarness::ready().await.unwrap();
    h.add("a.com", "ua", "pa").await.unwrap();
    h.ledger.insert_raw("b.com", "not a valid ref").await;
    h.add("c.com", "uc", "pc").await.unwrap();

    let report = h.session.list_credentials().await.unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 1);

    let entries = report.entries();
    assert_eq!(entries[0].as_ref().unwrap().website, "a.com");
    let failure = entries[1].as_ref().unwrap_err();
    assert_eq!(failure.website, "b.com");
    assert_eq!(failure.error.kind(), ErrorKind::Codec);
    assert_eq!(entries[2].as_ref().unwrap().website, "c.com");
}

#[tokio::test]
async fn list_distinguishes_missing_and_tampered_blobs() {
    let h = TestHarness::ready().await.unwrap();
    h.add("gone.com", "u", "p").await.unwrap();
    h.add("tampered.com", "u", "p2").await.unwrap();
    h.add("ok.com", "u", "p3").await.unwrap();

    let entries = h.ledger.entries().await;
    assert!(h.blobs.delete(&entries[0].blob_ref).await);

    // Flip one character inside the base64 body of the text frame.
    let reference = BlobRef::parse(&entries[1].blob_ref).unwrap();
    let mut frame = h.blobs.get(&reference)
        .await
        .unwrap();
    let last = frame.len() - 1;
    frame[last] = if frame[last] == b'A' { b'B' } else { b'A' };
    assert!(h.blobs.replace(&entries[1].blob_ref, frame).await);

    let report = h.session.list_credentials().await.unwrap();
    let kinds: Vec<Option<ErrorKind>> = report
        .entries()
        .iter()
        .map(|r| r.as_ref().err().map(|f| f.error.kind()))
        .collect();
    assert_eq!(kinds[0], Some(ErrorKind::BlobNotFound));
    assert!(matches!(
        kinds[1],
        Some(ErrorKind::Decryption) | Some(ErrorKind::Codec)
    ));
    assert_eq!(kinds[2], None);
}

#[tokio::test]
async fn add_then_get_returns_record_with_ledger_timestamp() {
    let h = TestHarness::ready().await.unwrap();
    h.add("a.com", "u", "p").await.unwrap();

    let credential = h.session.get_credential("a.com").await.unwrap();
    assert_eq!(credential.id, "a.com");
    assert_eq!(credential.website, "a.com");
    assert_eq!(credential.username, "u");
    assert_eq!(credential.password.expose_secret(), "p");

    let entry = &h.ledger.entries().await[0];
    assert_eq!(credential.created_at.timestamp() as u64, entry.timestamp);
    assert_eq!(Some(credential.created_at), entry.created_at());
}

#[tokio::test]
async fn remove_then_get_is_not_found() {
    let h = TestHarness::ready().await.unwrap();
    h.add("a.com", "u", "p").await.unwrap();
    h.session.remove_credential("a.com").await.unwrap();

    let err = h.session.get_credential("a.com").await.unwrap_err();
    assert!(matches!(err, VaultError::NotFound { ref website } if website == "a.com"));

    let err = h.session.remove_credential("a.com").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    // The blob stays behind; only the ledger entry goes.
    assert_eq!(h.blobs.len().await, 1);
}

#[tokio::test]
async fn website_can_be_re_added_after_removal() {
    let h = TestHarness::ready().await.unwrap();
    h.add("a.com", "old", "p").await.unwrap();
    h.session.remove_credential("a.com").await.unwrap();
    h.add("a.com", "new", "p").await.unwrap();
    assert_eq!(
        h.session.get_credential("a.com").await.unwrap().username,
        "new"
    );
}

#[tokio::test]
async fn ledger_write_failure_is_transient_and_orphans_the_blob() {
    let h = TestHarness::ready().await.unwrap();
    h.ledger.fail_writes(true);

    let err = h.add("a.com", "u", "p").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LedgerWriteFailed);
    assert!(err.is_transient());
    assert_eq!(h.blobs.len().await, 1);
    assert!(h.ledger.is_empty().await);

    h.ledger.fail_writes(false);
    h.add("a.com", "u", "p").await.unwrap();
    assert_eq!(h.ledger.len().await, 1);
}

#[tokio::test]
async fn blob_store_outage_never_touches_the_ledger() {
    let h = TestHarness::ready().await.unwrap();
    h.blobs.fail_puts(true);

    let err = h.add("a.com", "u", "p").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BlobStoreUnavailable);
    assert!(err.is_transient());
    assert!(h.ledger.is_empty().await);
}

#[tokio::test]
async fn ledger_read_outage_fails_the_whole_list() {
    let h = TestHarness::ready().await.unwrap();
    h.add("a.com", "u", "p").await.unwrap();
    h.ledger.fail_reads(true);

    let err = h.session.list_credentials().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LedgerUnavailable);
}

#[tokio::test]
async fn empty_vault_lists_nothing() {
    let h = TestHarness::ready().await.unwrap();
    let report = h.session.list_credentials().await.unwrap();
    assert!(report.is_empty());
}

#[tokio::test]
async fn concurrent_adds_of_one_website_leave_one_winner() {
    let h = Arc::new(TestHarness::ready().await.unwrap());
    let mut tasks = Vec::new();
    for i in 0..8 {
        let h = h.clone();
        tasks.push(tokio::spawn(async move {
            h.add("race.com", &format!("user{i}"), "p").await
        }));
    }

    let mut ok = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(()) => ok += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::DuplicateWebsite),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(h.ledger.len().await, 1);
}

#[tokio::test]
async fn sessions_for_the_same_identity_share_the_vault() {
    let ledger = Arc::new(MockLedger::new());
    let blobs = Arc::new(MockBlobStore::new());
    let first = TestHarness::builder()
        .with_ledger(ledger.clone())
        .with_blob_store(blobs.clone())
        .build()
        .await
        .unwrap();
    first.add("a.com", "u", "p").await.unwrap();

    let second = TestHarness::builder()
        .with_ledger(ledger)
        .with_blob_store(blobs)
        .build()
        .await
        .unwrap();
    let credential = second.session.get_credential("a.com").await.unwrap();
    assert_eq!(credential.password.expose_secret(), "p");
}

#[tokio::test]
async fn another_identity_cannot_read_the_payload() {
    let ledger = Arc::new(MockLedger::new());
    let blobs = Arc::new(MockBlobStore::new());
    let owner = TestHarness::builder()
        .with_ledger(ledger.clone())
        .with_blob_store(blobs.clone())
        .build()
        .await
        .unwrap();
    owner.add("a.com", "u", "p").await.unwrap();

    let intruder = TestHarness::builder()
        .with_identity("0x0000000000000000000000000000000000000001")
        .with_ledger(ledger)
        .with_blob_store(blobs)
        .build()
        .await
        .unwrap();
    let err = intruder.session.get_credential("a.com").await.unwrap_err();
    assert!(matches!(
        err,
        VaultError::Decryption(DecryptionError::AuthenticationFailed)
    ));
}

#[tokio::test]
async fn undeployed_ledger_fails_every_initialize() {
    let h = TestHarness::builder()
        .with_ledger(Arc::new(MockLedger::undeployed()))
        .uninitialized()
        .build()
        .await
        .unwrap();

    for _ in 0..2 {
        let err = h.session.initialize().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerUnavailable);
    }
    assert_eq!(h.session.state(), SessionState::Failed);
    assert_eq!(
        h.add("a.com", "u", "p").await.unwrap_err().kind(),
        ErrorKind::NotInitialized
    );
}

fn wallet() -> Arc<LocalWallet> {
    let networks = vec![NetworkInfo {
        name: "localhost".into(),
        chain_id: 31337,
    }];
    Arc::new(LocalWallet::new(DeviceKeypair::from_bytes(&[9u8; 32]), networks, 31337).unwrap())
}

#[tokio::test]
async fn wallet_signature_binding_round_trips() {
    let wallet = wallet();
    wallet.connect().await.unwrap();
    let h = TestHarness::builder()
        .with_identity(wallet.address())
        .with_wallet_signature(wallet.clone())
        .build()
        .await
        .unwrap();
    h.add("a.com", "u", "p").await.unwrap();
    assert_eq!(
        h.session.get_credential("a.com").await.unwrap().username,
        "u"
    );
}

#[tokio::test]
async fn wallet_signature_key_differs_from_address_key() {
    let wallet = wallet();
    wallet.connect().await.unwrap();
    let ledger = Arc::new(MockLedger::new());
    let blobs = Arc::new(MockBlobStore::new());

    let signed = TestHarness::builder()
        .with_identity(wallet.address())
        .with_wallet_signature(wallet.clone())
        .with_ledger(ledger.clone())
        .with_blob_store(blobs.clone())
        .build()
        .await
        .unwrap();
    signed.add("a.com", "u", "p").await.unwrap();

    let by_address = TestHarness::builder()
        .with_identity(wallet.address())
        .with_ledger(ledger)
        .with_blob_store(blobs)
        .build()
        .await
        .unwrap();
    assert_eq!(
        by_address
            .session
            .get_credential("a.com")
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::Decryption
    );
}

#[tokio::test]
async fn disconnected_wallet_cannot_bind_a_key() {
    let wallet = wallet();
    let h = TestHarness::builder()
        .with_identity(wallet.address())
        .with_wallet_signature(wallet)
        .uninitialized()
        .build()
        .await
        .unwrap();
    let err = h.session.initialize().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyDerivation);
    assert_eq!(h.session.state(), SessionState::Failed);
}
