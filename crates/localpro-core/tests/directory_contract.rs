//! Contract Test: Directory Surface
//!
//! Constraints verified:
//! - The directory reads the same snapshot the admin console writes
//! - The home page search handoff is consumed exactly once
//! - Load failures render the error state
//! - "No results" is signalled when filters exclude everything

mod common;

use common::*;
use localpro_core::directory::{DirectoryBody, LoadState};
use localpro_core::{AdminConsole, Directory, RecordStore, SearchHandoff, SnapshotStore};
use std::sync::Arc;

#[tokio::test]
async fn directory_sees_admin_edits() {
    let snapshots: Arc<dyn SnapshotStore> = Arc::new(CountingSnapshotStore::new());

    let (mut console, _rx) = AdminConsole::new(store_with(snapshots.clone(), tom_and_ben()), &config());
    console.load().await.unwrap();
    *console.form_mut() = fields("Grace");
    let created = console.submit().await.unwrap().unwrap();

    let mut store = store_with(snapshots, Vec::new());
    let directory = Directory::load(&mut store).await;

    assert_eq!(directory.load_state(), &LoadState::Ready);
    let DirectoryBody::Results(cards) = directory.view().body else {
        panic!("expected results");
    };
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].id, created.id);
    assert_eq!(cards[0].name, "Grace");
}

#[tokio::test]
async fn handoff_prefills_search_once() {
    let snapshots: Arc<dyn SnapshotStore> = Arc::new(CountingSnapshotStore::new());
    let handoff = SearchHandoff::new(snapshots.clone(), "searchTerm");
    handoff.stash(" tom ").await.unwrap();

    let mut store = store_with(snapshots.clone(), tom_and_ben());
    let mut directory = Directory::load(&mut store).await;

    assert_eq!(
        directory.apply_handoff(&handoff).await.unwrap(),
        Some("tom".to_string())
    );
    assert_eq!(directory.filter().search_text, "tom");
    let ids: Vec<i64> = directory.matches().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(directory.view().summary, "Showing 1 electrician");

    // Second visit starts unfiltered
    let mut again = Directory::load(&mut store).await;
    assert_eq!(again.apply_handoff(&handoff).await.unwrap(), None);
    assert_eq!(again.view().summary, "Showing 2 electricians");
}

#[tokio::test]
async fn verified_only_without_matches_signals_no_results() {
    let mut store = store_with(Arc::new(CountingSnapshotStore::new()), tom_and_ben());
    let mut directory = Directory::load(&mut store).await;

    directory.set_verified_only(true);
    let view = directory.view();

    assert!(view.is_no_results());
    assert_eq!(view.summary, "No electricians found");
}

#[tokio::test]
async fn area_filter_and_clear() {
    let mut store = store_with(Arc::new(CountingSnapshotStore::new()), tom_and_ben());
    let mut directory = Directory::load(&mut store).await;

    directory.set_area(Some("Itu".to_string()));
    let ids: Vec<i64> = directory.matches().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2]);

    directory.clear_filters();
    assert_eq!(directory.matches().len(), 2);
}

#[tokio::test]
async fn load_failure_renders_error_state() {
    let mut store = RecordStore::new(
        Arc::new(CountingSnapshotStore::new()),
        Box::new(FailingBootstrap),
        &open_store_config(),
    );

    let directory = Directory::load(&mut store).await;
    let view = directory.view();

    assert!(matches!(directory.load_state(), LoadState::Failed(_)));
    assert!(matches!(view.body, DirectoryBody::LoadFailed(_)));
    assert_eq!(
        view.summary,
        "Error loading electricians. Please refresh the page."
    );
}

#[tokio::test]
async fn cards_carry_contact_links() {
    let mut store = store_with(Arc::new(CountingSnapshotStore::new()), tom_and_ben());
    let directory = Directory::load(&mut store).await;

    let DirectoryBody::Results(cards) = directory.view().body else {
        panic!("expected results");
    };
    assert_eq!(cards[0].call_link, "tel:0801 234 5678");
    assert_eq!(
        cards[0].whatsapp_link,
        "https://wa.me/2348012345678?text=Hi+Tom%2C+I+found+you+on+LocalPro+and+need+electrical+services."
    );
    assert_eq!(cards[1].location, "Itu, Uyo");
}
