//! End-to-end behavior of the incremental list controller

use super::test_utils::{controller, page, user};
use crate::support::ScriptedFetcher;
use listkit::error::FetchError;
use listkit::list::{ListOptions, LoadOutcome, SortOrder};
use std::sync::Arc;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn test_search_debounce_fetches_once_for_final_text() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push_page(page(&["1", "2"], Some("2")))
        .push_page(page(&["7"], None));
    let list = controller(&fetcher, ListOptions::default());
    let refresh = list.spawn_auto_refresh();
    tokio::time::sleep(ms(10)).await;
    assert_eq!(fetcher.call_count(), 1);

    list.set_search(Some("a"));
    tokio::time::sleep(ms(100)).await;
    list.set_search(Some("ab"));
    assert_eq!(list.search_query(), "ab");
    assert_eq!(list.debounced_search(), "");
    assert!(list.search_pending());

    // 299ms after the last keystroke nothing has committed yet
    tokio::time::sleep(ms(299)).await;
    assert_eq!(list.debounced_search(), "");
    assert_eq!(fetcher.call_count(), 1);

    tokio::time::sleep(ms(50)).await;
    assert_eq!(list.debounced_search(), "ab");
    assert!(!list.search_pending());

    let calls = fetcher.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].name, None);
    assert_eq!(calls[1].name.as_deref(), Some("ab"));
    assert_eq!(calls[1].after_id, None);
    assert_eq!(list.items(), vec![user("7")]);

    refresh.abort();
}

#[tokio::test(start_paused = true)]
async fn test_clearing_search_omits_name() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push_page(page(&["1"], None))
        .push_page(page(&["2"], None));
    let list = controller(
        &fetcher,
        ListOptions {
            search: "bob".to_string(),
            ..ListOptions::default()
        },
    );
    list.load_first_page().await.unwrap();
    assert_eq!(fetcher.calls()[0].name.as_deref(), Some("bob"));

    list.set_search(None);
    tokio::time::sleep(ms(301)).await;
    assert_eq!(list.debounced_search(), "");
    assert!(list.items().is_empty(), "key change resets the chain");

    list.load_first_page().await.unwrap();
    assert_eq!(fetcher.calls()[1].name, None);
}

#[tokio::test(start_paused = true)]
async fn test_stale_first_page_is_discarded() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push(Ok(page(&["old"], Some("old"))), ms(200))
        .push(Ok(page(&["new"], None)), ms(10));
    let list = controller(&fetcher, ListOptions::default());

    let stale = {
        let list = list.clone();
        tokio::spawn(async move { list.load_first_page().await })
    };
    tokio::time::sleep(ms(50)).await;
    assert!(list.is_loading());

    list.set_sort("created_at");
    assert!(!list.is_loading(), "loading flag tracks the current key only");
    assert_eq!(list.load_first_page().await.unwrap(), LoadOutcome::Loaded(1));
    assert_eq!(stale.await.unwrap().unwrap(), LoadOutcome::Discarded);

    assert_eq!(list.items(), vec![user("new")]);
    assert!(!list.has_more());
    assert_eq!(fetcher.calls()[1].sort_by, "created_at");
}

#[tokio::test(start_paused = true)]
async fn test_stale_next_page_is_discarded() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push_page(page(&["1", "2"], Some("2")))
        .push(Ok(page(&["3"], None)), ms(100));
    let list = controller(&fetcher, ListOptions::default());
    list.load_first_page().await.unwrap();

    let pending = {
        let list = list.clone();
        tokio::spawn(async move { list.load_more().await })
    };
    tokio::time::sleep(ms(10)).await;
    list.set_order(SortOrder::Desc);

    assert_eq!(pending.await.unwrap().unwrap(), LoadOutcome::Discarded);
    assert!(list.items().is_empty());
    assert!(!list.has_more());
    assert!(!list.is_fetching_next_page());
}

#[tokio::test(start_paused = true)]
async fn test_load_more_in_flight_is_not_duplicated() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push_page(page(&["1", "2"], Some("2")))
        .push(Ok(page(&["3", "4"], Some("4"))), ms(100));
    let list = controller(&fetcher, ListOptions::default());
    list.load_first_page().await.unwrap();

    let first = {
        let list = list.clone();
        tokio::spawn(async move { list.load_more().await })
    };
    tokio::time::sleep(ms(10)).await;
    assert!(list.is_fetching_next_page());
    assert_eq!(list.load_more().await.unwrap(), LoadOutcome::Skipped);

    assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Loaded(2));
    assert_eq!(fetcher.call_count(), 2);
    assert_eq!(list.item_ids(), vec!["1", "2", "3", "4"]);
    assert!(list.has_more());
}

#[tokio::test]
async fn test_has_more_requires_cursor() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let mut odd = page(&["1"], None);
    odd.has_more = true;
    fetcher.push_page(odd);
    let list = controller(&fetcher, ListOptions::default());

    list.load_first_page().await.unwrap();
    assert!(!list.has_more());
    assert_eq!(list.load_more().await.unwrap(), LoadOutcome::Skipped);
}

#[tokio::test]
async fn test_error_state_and_recovery() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push_error(FetchError::new("Network error"))
        .push_page(page(&["1"], None));
    let list = controller(&fetcher, ListOptions::default());

    let err = list.load_first_page().await.unwrap_err();
    assert_eq!(err.message, "Network error");
    let state = list.error_state();
    assert!(state.show_error);
    assert_eq!(state.message(), Some("Network error"));
    assert!(!list.is_loading());

    list.load_first_page().await.unwrap();
    assert!(!list.error_state().show_error);
    assert_eq!(list.items(), vec![user("1")]);
}

#[tokio::test]
async fn test_blank_error_message_falls_back() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_error(FetchError::new(""));
    let list = controller(&fetcher, ListOptions::default());

    let err = list.load_first_page().await.unwrap_err();
    assert_eq!(err.message, "Failed to load");
    let state = list.error_state();
    assert!(state.show_error);
    assert_eq!(state.error_message, "Failed to load");
}

#[tokio::test(start_paused = true)]
async fn test_auto_refresh_never_retries_a_failure() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push_error(FetchError::new("Network error"))
        .push_page(page(&["1"], None));
    let list = controller(&fetcher, ListOptions::default());
    let refresh = list.spawn_auto_refresh();

    tokio::time::sleep(ms(10)).await;
    assert_eq!(list.error_state().message(), Some("Network error"));

    // Time passing alone issues no further request
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(fetcher.call_count(), 1);
    assert!(list.items().is_empty());
    assert!(!list.is_loading());

    list.set_sort("created_at");
    tokio::time::sleep(ms(10)).await;
    assert_eq!(fetcher.call_count(), 2);
    assert_eq!(list.items(), vec![user("1")]);
    assert!(!list.error_state().show_error);

    refresh.abort();
}

#[tokio::test(start_paused = true)]
async fn test_auto_refresh_follows_sort_changes() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher
        .push_page(page(&["a"], None))
        .push_page(page(&["b"], None))
        .push_page(page(&["c"], None));
    let list = controller(&fetcher, ListOptions::default());
    let refresh = list.spawn_auto_refresh();
    tokio::time::sleep(ms(10)).await;
    assert_eq!(list.items(), vec![user("a")]);

    list.set_sort("created_at");
    tokio::time::sleep(ms(10)).await;
    assert_eq!(list.items(), vec![user("b")]);

    // Same value again: no new request
    list.set_sort("created_at");
    tokio::time::sleep(ms(10)).await;
    assert_eq!(fetcher.call_count(), 2);

    list.set_order(SortOrder::Desc);
    tokio::time::sleep(ms(10)).await;
    assert_eq!(list.items(), vec![user("c")]);
    let calls = fetcher.calls();
    assert_eq!(calls[2].order, SortOrder::Desc);
    assert_eq!(calls[2].sort_by, "created_at");

    refresh.abort();
}

#[tokio::test(start_paused = true)]
async fn test_auto_refresh_stops_when_controller_dropped() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_page(page(&["a"], None));
    let list = controller(&fetcher, ListOptions::default());
    let refresh = list.spawn_auto_refresh();
    tokio::time::sleep(ms(10)).await;

    drop(list);
    tokio::time::timeout(ms(100), refresh)
        .await
        .expect("refresh task should end")
        .unwrap();
}

#[tokio::test]
async fn test_snapshot_reflects_state() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.push_page(page(&["1", "2"], Some("2")));
    let list = controller(
        &fetcher,
        ListOptions {
            limit: 2,
            sort_by: "email".to_string(),
            ..ListOptions::default()
        },
    );
    list.load_first_page().await.unwrap();

    let snapshot = list.snapshot();
    assert_eq!(snapshot.items.len(), 2);
    assert!(snapshot.has_more);
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.sort_by, "email");
    assert_eq!(snapshot.order, SortOrder::Asc);
    assert_eq!(fetcher.calls()[0].limit, 2);
}
