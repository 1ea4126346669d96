//! Whole-collection resource list with server-side search

use async_trait::async_trait;
use listkit::error::FetchError;
use listkit::list::{ResourceList, ResourceListOptions, ResourceSource};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
struct Control {
    id: String,
    name: String,
}

fn control(id: &str, name: &str) -> Control {
    Control {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Filters a fixed collection by name; records every request.
struct Controls {
    all: Vec<Control>,
    requests: Mutex<Vec<String>>,
}

#[async_trait]
impl ResourceSource<Control> for Arc<Controls> {
    async fn list(&self) -> Result<Vec<Control>, FetchError> {
        self.requests.lock().push("list".to_string());
        Ok(self.all.clone())
    }

    async fn search(&self, query: &str) -> Option<Result<Vec<Control>, FetchError>> {
        self.requests.lock().push(format!("search:{}", query));
        Some(Ok(self
            .all
            .iter()
            .filter(|c| c.name.contains(query))
            .cloned()
            .collect()))
    }
}

fn controls() -> Arc<Controls> {
    Arc::new(Controls {
        all: vec![control("1", "alpha"), control("2", "beta"), control("3", "alphabet")],
        requests: Mutex::new(Vec::new()),
    })
}

fn options(searchable: bool) -> ResourceListOptions {
    ResourceListOptions {
        query_key: vec!["controls".to_string()],
        navigate_path: "/controls".to_string(),
        searchable,
        debounce: Duration::from_millis(300),
    }
}

#[tokio::test(start_paused = true)]
async fn test_search_narrows_after_debounce() {
    let source = controls();
    let list = ResourceList::new(Arc::clone(&source), |c: &Control| c.id.clone(), options(true));

    assert!(list.refresh().await.unwrap());
    assert_eq!(list.items().unwrap().len(), 3);

    list.set_search(Some("alp"));
    assert_eq!(list.query_key(), vec!["controls"]);
    tokio::time::sleep(Duration::from_millis(301)).await;
    assert_eq!(list.query_key(), vec!["controls", "alp"]);

    list.refresh().await.unwrap();
    let names: Vec<String> = list.items().unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["alpha", "alphabet"]);
    assert_eq!(*source.requests.lock(), vec!["list", "search:alp"]);
}

#[tokio::test(start_paused = true)]
async fn test_not_searchable_ignores_search() {
    let source = controls();
    let list = ResourceList::new(Arc::clone(&source), |c: &Control| c.id.clone(), options(false));

    list.set_search(Some("beta"));
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(list.search_query(), "");
    assert_eq!(list.query_key(), vec!["controls"]);

    list.refresh().await.unwrap();
    assert_eq!(*source.requests.lock(), vec!["list"]);
}

#[tokio::test]
async fn test_item_path() {
    let list = ResourceList::new(controls(), |c: &Control| c.id.clone(), options(true));
    assert!(list.items().is_none());
    assert_eq!(list.item_path(&control("42", "x")), "/controls/42");
}
