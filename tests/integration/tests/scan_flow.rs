//! Integration test: scanner → verifier flow over loopback HTTP.
//!
//! Drives ticketgate-scanner against a live ticketgate-node and checks the
//! verify-once behavior end to end.

use ticketgate_core::{TicketCard, DEFAULT_LINK_BASE};
use ticketgate_integration_tests::{registration, scanner_for, spawn_builtin_node, spawn_node_with};
use ticketgate_scanner::{extract_reference_id, ExtractError, ScanOutcome};

// =========================================================================
// The documented gate scenario
// =========================================================================

#[tokio::test]
async fn test_scan_link_then_rescan() {
    let base = spawn_builtin_node().await;
    let scanner = scanner_for(&base);

    let first = scanner
        .scan("https://example.com/registration/4234567890")
        .await;
    assert_eq!(first.reference_id.as_deref(), Some("4234567890"));
    match &first.outcome {
        ScanOutcome::Verified(r) => {
            assert!(r.verified);
            assert_eq!(r.name, "Subham Karmakar");
        }
        other => panic!("expected Verified, got {:?}", other),
    }

    let second = scanner.scan("4234567890").await;
    assert_eq!(second.outcome.code(), "ALREADY_VERIFIED");
    assert!(second.outcome.record().unwrap().verified);

    let unknown = scanner.scan("000").await;
    assert_eq!(unknown.outcome, ScanOutcome::NotFound);
}

#[tokio::test]
async fn test_invalid_payload_leaves_registrations_untouched() {
    let base = spawn_builtin_node().await;
    let scanner = scanner_for(&base);

    let report = scanner.scan("").await;
    assert_eq!(report.outcome, ScanOutcome::InvalidFormat(ExtractError::Empty));

    let report = scanner.scan("https://example.com/").await;
    assert_eq!(
        report.outcome,
        ScanOutcome::InvalidFormat(ExtractError::NoPathSegment)
    );

    let status = scanner.client().status().await.unwrap();
    assert_eq!(status.verified, 0);
    assert_eq!(status.pending, 1);
}

// =========================================================================
// Seeds with several registrations
// =========================================================================

#[tokio::test]
async fn test_every_seeded_ticket_verifies_once() {
    let ids = ["1000000001", "1000000002", "1000000003"];
    let base = spawn_node_with(ids.iter().map(|id| registration(id, false)).collect()).await;
    let scanner = scanner_for(&base);

    for id in ids {
        let report = scanner.scan(id).await;
        assert!(
            matches!(report.outcome, ScanOutcome::Verified(ref r) if r.verified && r.reference_id == id),
            "first scan of {id}: {:?}",
            report.outcome
        );
    }
    for id in ids {
        let report = scanner.scan(id).await;
        assert_eq!(report.outcome.code(), "ALREADY_VERIFIED", "rescan of {id}");
    }

    let status = scanner.client().status().await.unwrap();
    assert_eq!(status.total, 3);
    assert_eq!(status.verified, 3);
}

#[tokio::test]
async fn test_preverified_seed_entry() {
    let base = spawn_node_with(vec![registration("77", true), registration("78", false)]).await;
    let scanner = scanner_for(&base);

    assert_eq!(scanner.scan("77").await.outcome.code(), "ALREADY_VERIFIED");
    assert_eq!(scanner.scan("78").await.outcome.code(), "VERIFIED");
}

#[tokio::test]
async fn test_concurrent_scans_admit_exactly_once() {
    let base = spawn_node_with(vec![registration("5550001", false)]).await;

    let mut handles = Vec::new();
    for _ in 0..32 {
        let scanner = scanner_for(&base);
        handles.push(tokio::spawn(async move {
            scanner
                .scan("https://example.com/registration/5550001")
                .await
                .outcome
        }));
    }

    let mut verified = 0;
    let mut already = 0;
    for handle in handles {
        match handle.await.unwrap() {
            ScanOutcome::Verified(_) => verified += 1,
            ScanOutcome::AlreadyVerified(_) => already += 1,
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    assert_eq!(verified, 1);
    assert_eq!(already, 31);
}

// =========================================================================
// Ticket cards and their QR payloads
// =========================================================================

#[tokio::test]
async fn test_ticket_link_scans_back_to_its_registration() {
    let base = spawn_builtin_node().await;
    let scanner = scanner_for(&base);

    let card: TicketCard = scanner.client().ticket("4234567890").await.unwrap();
    assert_eq!(card.link, format!("{}/4234567890", DEFAULT_LINK_BASE));
    assert_eq!(extract_reference_id(&card.link).unwrap(), card.reference_id);

    let report = scanner.scan(&card.link).await;
    assert_eq!(report.outcome.code(), "VERIFIED");

    let list = scanner.client().registrations().await.unwrap();
    assert_eq!(list.count, 1);
    assert!(list.registrations[0].verified);
}

#[tokio::test]
async fn test_unknown_ticket_card_is_404() {
    let base = spawn_builtin_node().await;
    let scanner = scanner_for(&base);

    let err = scanner.client().ticket("000").await.unwrap_err();
    assert!(matches!(
        err,
        ticketgate_scanner::ScannerError::Http { status: 404, .. }
    ));
}
