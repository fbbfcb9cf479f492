//! Pagination and fan-out properties, run against both backends.
//!
//! Verifies:
//! - no-cursor, `max_id` and `since_id` pages over a five-entry row
//! - value-anchored boundaries when the cursor id is not in the row
//! - hashtag fan-out is case-folded and deduplicated
//! - the day line is capped at the 100 most recent entries
//! - the favorites toggle

use statusline_core::{
    open_rocks_store, IdGenerator, Line, MemoryStore, Page, Status, StatusId, Statusline,
    StatuslineConfig, StoreConfig, WideRowStore, DAYLINE_PAGE_SIZE,
};

use std::sync::Arc;
use tempfile::tempdir;

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Run `check` against a memory-backed and a RocksDB-backed instance.
fn with_backends(check: impl Fn(&Statusline)) {
    let memory = Statusline::new(Arc::new(MemoryStore::new()), StatuslineConfig::for_testing());
    check(&memory);

    let dir = tempdir().unwrap();
    let store = open_rocks_store(StoreConfig::for_testing(dir.path().join("db"))).unwrap();
    let rocks = Statusline::new(Arc::new(store), StatuslineConfig::for_testing());
    check(&rocks);
}

/// Create `n` statuses by `author` and append each to the author's line.
/// Returned oldest first, so `ids[0]` is "1" and `ids[4]` is "5".
fn userline_of(sl: &Statusline, author: &str, n: usize) -> Vec<StatusId> {
    (0..n)
        .map(|i| {
            let status = sl.create_status(author, &format!("post {i}")).unwrap();
            sl.add_to_userline(&status).unwrap();
            status.id
        })
        .collect()
}

// ─── Cursor Pagination ───────────────────────────────────────────────────────

#[test]
fn test_no_cursor_returns_newest() {
    with_backends(|sl| {
        let ids = userline_of(sl, "alice", 5);
        let page = sl.userline("alice", &Page::latest(2)).unwrap();
        assert_eq!(page, vec![ids[4], ids[3]]);
    });
}

#[test]
fn test_max_id_returns_strictly_older() {
    with_backends(|sl| {
        let ids = userline_of(sl, "alice", 5);
        let page = sl.userline("alice", &Page::before(ids[3], 2)).unwrap();
        assert_eq!(page, vec![ids[2], ids[1]]);
    });
}

#[test]
fn test_since_id_returns_strictly_newer() {
    with_backends(|sl| {
        let ids = userline_of(sl, "alice", 5);
        let page = sl.userline("alice", &Page::after(ids[1], 2)).unwrap();
        assert_eq!(page, vec![ids[3], ids[2]]);
    });
}

#[test]
fn test_paging_back_walks_the_whole_row() {
    with_backends(|sl| {
        let ids = userline_of(sl, "alice", 7);
        let mut seen = Vec::new();
        let mut page = Page::latest(3);
        loop {
            let batch = sl.userline("alice", &page).unwrap();
            let Some(last) = batch.last().copied() else {
                break;
            };
            seen.extend(batch);
            page = Page::before(last, 3);
        }
        let expected: Vec<StatusId> = ids.into_iter().rev().collect();
        assert_eq!(seen, expected);
    });
}

#[test]
fn test_absent_boundary_drops_nothing() {
    with_backends(|sl| {
        // Six statuses, the fourth never reaches bob's timeline
        let statuses: Vec<Status> = (0..6)
            .map(|i| sl.create_status("alice", &format!("post {i}")).unwrap())
            .collect();
        for (i, status) in statuses.iter().enumerate() {
            if i != 3 {
                sl.add_to_timeline("bob", status).unwrap();
            }
        }
        let absent = statuses[3].id;
        let ids: Vec<StatusId> = statuses.iter().map(|s| s.id).collect();

        let older = sl.timeline("bob", &Page::before(absent, 2)).unwrap();
        assert_eq!(older, vec![ids[2], ids[1]]);

        let newer = sl.timeline("bob", &Page::after(absent, 2)).unwrap();
        assert_eq!(newer, vec![ids[5], ids[4]]);
    });
}

#[test]
fn test_cursor_from_string_form() {
    with_backends(|sl| {
        let ids = userline_of(sl, "alice", 5);
        let max = ids[3].to_string();
        let page = Page::parse(2, None, Some(&max)).unwrap();
        assert_eq!(sl.userline("alice", &page).unwrap(), vec![ids[2], ids[1]]);
    });
}

// ─── Fan-out ─────────────────────────────────────────────────────────────────

#[test]
fn test_fan_out_completeness() {
    with_backends(|sl| {
        let status = sl.create_status("alice", "hello #Foo and #foo").unwrap();
        let report = sl.fan_out(&status, ["bob", "carol"]);
        assert!(report.is_complete());

        assert_eq!(sl.userline("alice", &Page::latest(10)).unwrap(), vec![status.id]);
        assert_eq!(sl.tagline("foo", &Page::latest(10)).unwrap(), vec![status.id]);
        assert_eq!(sl.tagline("FOO", &Page::latest(10)).unwrap(), vec![status.id]);
        assert_eq!(sl.timeline("bob", &Page::latest(10)).unwrap(), vec![status.id]);
        assert_eq!(sl.timeline("carol", &Page::latest(10)).unwrap(), vec![status.id]);
        assert_eq!(sl.dayline(&status.day_key()).unwrap(), vec![status.id]);
        assert!(sl.timeline("alice", &Page::latest(10)).unwrap().is_empty());
    });
}

#[test]
fn test_repeated_tag_yields_single_entry() {
    let store = Arc::new(MemoryStore::new());
    let sl = Statusline::new(store.clone(), StatuslineConfig::for_testing());

    let status = sl.create_status("alice", "#rust #Rust #RUST").unwrap();
    sl.add_to_taglines(&status).unwrap();
    sl.add_to_taglines(&status).unwrap();

    assert_eq!(store.row_len(Line::Tagline.family(), "rust").unwrap(), 1);
}

// ─── Day Line ────────────────────────────────────────────────────────────────

#[test]
fn test_dayline_returns_latest_hundred() {
    with_backends(|sl| {
        let day = "2026-10-18";
        let ids: Vec<StatusId> = (0..150)
            .map(|i| {
                let status = sl.create_status("alice", &format!("status {i}")).unwrap();
                sl.add_to_dayline(&status, day).unwrap();
                status.id
            })
            .collect();

        let page = sl.dayline(day).unwrap();
        assert_eq!(page.len(), DAYLINE_PAGE_SIZE);
        assert_eq!(page[0], ids[149]);
        assert_eq!(page[99], ids[50]);
        assert!(sl.dayline("2026-10-19").unwrap().is_empty());
    });
}

// ─── Favorites ───────────────────────────────────────────────────────────────

#[test]
fn test_favorites_toggle_roundtrip() {
    with_backends(|sl| {
        let status = sl.create_status("alice", "favorite me").unwrap();

        sl.add_favorite(&status, "bob").unwrap();
        assert!(sl.favorites("bob").unwrap().contains(&status.id));

        sl.remove_favorite(&status, "bob").unwrap();
        assert!(!sl.favorites("bob").unwrap().contains(&status.id));

        // Already gone: still fine
        sl.remove_favorite(&status, "bob").unwrap();
    });
}

#[test]
fn test_ids_from_separate_generators_still_order_by_time() {
    let early = IdGenerator::with_clock(|| 1_000).next_id();
    let late = IdGenerator::with_clock(|| 2_000).next_id();
    assert!(early < late);
    assert!(early.as_bytes() < late.as_bytes());
}
