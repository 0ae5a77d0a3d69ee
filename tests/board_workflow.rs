use chrono::{TimeZone, Utc};
use shiftboard::board::seed::demo_listings;
use shiftboard::board::{
    ApplicationStatus, BrowseSession, FilterState, JobBoard, ListingId, ListingStatus,
    NewApplication, NewListing, SortOrder,
};
use shiftboard::storage::{FileStore, KeyValueStore, StoreKey};
use tempfile::tempdir;

const OWNER: &str = "local-owner-1";

fn ids(listings: Vec<shiftboard::board::Listing>) -> Vec<String> {
    listings.into_iter().map(|listing| listing.id.0).collect()
}

fn seeded_board(root: &std::path::Path) -> JobBoard<FileStore> {
    let board = JobBoard::new(FileStore::new(root), OWNER);
    let now = Utc.with_ymd_and_hms(2025, 9, 24, 9, 0, 0).unwrap();
    assert_eq!(
        board
            .seed_if_empty(demo_listings(OWNER, now))
            .expect("demo listings written"),
        2
    );
    board
}

#[test]
fn board_state_survives_reopening_the_data_dir() {
    let dir = tempdir().expect("tempdir");
    let created = {
        let board = JobBoard::new(FileStore::new(dir.path()), OWNER);
        let listing = board
            .create_listing(NewListing {
                city: Some("İzmir".to_string()),
                district: Some("Karşıyaka".to_string()),
                hourly_rate: Some(190.0),
                ..NewListing::titled("Paketleme yardımcısı")
            })
            .expect("listing created");
        board
            .create_application(NewApplication::new(listing.id.clone(), "Deniz"))
            .expect("application created");
        board.toggle_favorite(&listing.id).expect("favorited");
        listing
    };

    let reopened = JobBoard::new(FileStore::new(dir.path()), OWNER);
    assert_eq!(reopened.listing(&created.id).expect("reloaded"), created);
    assert_eq!(reopened.applications_for(&created.id).len(), 1);
    assert_eq!(reopened.favorites(), vec![created.id.clone()]);
    assert_eq!(
        created.location.as_deref(),
        Some("İzmir, Karşıyaka"),
        "location is derived from city and district"
    );
}

#[test]
fn listings_are_stored_as_camel_case_json() {
    let dir = tempdir().expect("tempdir");
    let board = seeded_board(dir.path());

    let raw = std::fs::read_to_string(board.store().path_for(StoreKey::Listings))
        .expect("listings file written");
    assert!(raw.contains("\"hourlyRate\":220.0"));
    assert!(raw.contains("\"ownerId\":\"local-owner-1\""));
    assert!(raw.contains("\"status\":\"open\""));
    assert!(!raw.contains("companyName"), "absent optionals are omitted");
}

#[test]
fn browse_matches_accent_insensitive_location_and_query() {
    let dir = tempdir().expect("tempdir");
    let board = seeded_board(dir.path());

    let by_location = FilterState {
        location: Some("kadikoy".to_string()),
        ..FilterState::default()
    };
    assert_eq!(ids(board.browse(&by_location)), ["l1"]);

    let by_query = FilterState {
        query: Some("INGILIZCE".to_string()),
        ..FilterState::default()
    };
    assert_eq!(ids(board.browse(&by_query)), ["l2"]);

    let by_rate = FilterState {
        min_rate: Some(220.0),
        max_rate: Some(300.0),
        sort_order: SortOrder::Asc,
        ..FilterState::default()
    };
    assert_eq!(ids(board.browse(&by_rate)), ["l1", "l2"]);

    let too_rich = FilterState {
        min_rate: Some(301.0),
        ..FilterState::default()
    };
    assert!(board.browse(&too_rich).is_empty());
}

#[test]
fn deleting_a_listing_removes_its_applications_on_disk() {
    let dir = tempdir().expect("tempdir");
    let board = seeded_board(dir.path());
    let l1 = ListingId::from("l1");
    let l2 = ListingId::from("l2");

    let doomed = board
        .create_application(NewApplication::new(l1.clone(), "Ali"))
        .expect("application on l1");
    let kept = board
        .create_application(NewApplication::new(l2.clone(), "Ece"))
        .expect("application on l2");
    board
        .set_application_status(&kept.id, ApplicationStatus::Accepted)
        .expect("accepted");

    let outcome = board.delete_listing(&l1).expect("deleted");
    assert_eq!(outcome.removed_applications, 1);

    let reopened = JobBoard::new(FileStore::new(dir.path()), OWNER);
    assert!(reopened.listing(&l1).expect_err("gone").is_not_found());
    let remaining = reopened.applications();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
    assert_eq!(remaining[0].status, ApplicationStatus::Accepted);
    assert!(remaining.iter().all(|application| application.id != doomed.id));
}

#[test]
fn corrupt_collection_loads_empty_and_is_replaced_on_write() {
    let dir = tempdir().expect("tempdir");
    let store = FileStore::new(dir.path());
    store
        .set(StoreKey::Listings, "{not json".to_string())
        .expect("corrupt payload written");

    let board = JobBoard::new(store, OWNER);
    assert!(board.listings().is_empty());

    let created = board
        .create_listing(NewListing::titled("Garson"))
        .expect("write replaces corrupt payload");
    assert_eq!(ids(board.listings()), [created.id.0.clone()]);
}

#[test]
fn closed_listings_drop_out_of_explore_but_stay_in_mine() {
    let dir = tempdir().expect("tempdir");
    let board = seeded_board(dir.path());
    let l1 = ListingId::from("l1");

    let closed = board.toggle_listing_status(&l1).expect("closed");
    assert_eq!(closed.status, ListingStatus::Closed);

    assert_eq!(ids(board.browse(&FilterState::explore())), ["l2"]);
    assert_eq!(ids(board.my_listings()), ["l1"]);
}

#[test]
fn browse_session_ignores_stale_snapshots() {
    let dir = tempdir().expect("tempdir");
    let board = seeded_board(dir.path());
    let mut session = BrowseSession::new(FilterState::explore());

    let stale = session.begin_load();
    let stale_snapshot = board.snapshot();
    board
        .toggle_listing_status(&ListingId::from("l2"))
        .expect("closed");
    let fresh = session.begin_load();

    assert!(session.finish_load(fresh, board.snapshot()));
    assert!(!session.finish_load(stale, stale_snapshot));
    assert_eq!(ids(session.visible()), ["l1"]);

    session.toggle_sort();
    session.clear_filters();
    assert_eq!(ids(session.visible()), ["l2", "l1"]);
}
