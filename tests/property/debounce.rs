//! Debounced search settles on the last input, however it was typed

use crate::support::ScriptedFetcher;
use listkit::list::{IncrementalListController, ListOptions};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

#[test]
fn test_debounced_search_settles_on_last_input_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(("[a-z]{0,6}", 0u64..600), 1..10),
            |keystrokes| {
                let list: IncrementalListController<u32> = IncrementalListController::with_fetcher(
                    Arc::new(ScriptedFetcher::<u32>::new()),
                    Arc::new(|id: &u32| id.to_string()),
                    ListOptions::default(),
                );

                let settled = paused_runtime().block_on(async {
                    let mut committed = Vec::new();
                    for (text, gap_ms) in &keystrokes {
                        list.set_search(Some(text.as_str()));
                        tokio::time::sleep(Duration::from_millis(*gap_ms)).await;
                        committed.push(list.debounced_search());
                    }
                    tokio::time::sleep(Duration::from_millis(301)).await;
                    (committed, list.debounced_search())
                });
                let (committed, last) = settled;

                prop_assert_eq!(&last, &keystrokes.last().unwrap().0);

                // A value only commits when its quiet period elapsed before the next keystroke
                for (index, (text, gap_ms)) in keystrokes.iter().enumerate() {
                    if *gap_ms > 300 {
                        prop_assert_eq!(&committed[index], text);
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}
