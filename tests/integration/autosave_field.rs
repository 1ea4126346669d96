//! Auto-save field driven through the closure adapter

use futures::FutureExt;
use listkit::autosave::{save_fn, AutoSaveField};
use listkit::error::FetchError;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Active,
    Archived,
}

#[tokio::test]
async fn test_select_style_field_saves_choice() {
    let saved: Arc<Mutex<Vec<Status>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&saved);
    let field = AutoSaveField::new(
        "Status",
        Status::Active,
        save_fn(move |value: Status| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().push(value);
                Ok(())
            }
            .boxed()
        }),
    );

    field.handle_input(Status::Archived);
    assert!(field.handle_blur().await.unwrap());
    assert!(field.is_saved());
    assert_eq!(*saved.lock(), vec![Status::Archived]);

    // Blurring again with nothing new does not save twice
    assert!(!field.handle_blur().await.unwrap());
    assert_eq!(saved.lock().len(), 1);
}

#[tokio::test]
async fn test_failed_save_keeps_model_and_input() {
    let field = AutoSaveField::new(
        "Name",
        "old".to_string(),
        save_fn(|_value: String| async { Err::<(), _>(FetchError::new("Name taken")) }.boxed()),
    );

    field.handle_input("new".to_string());
    let err = field.handle_blur().await.unwrap_err();
    assert_eq!(err.message, "Name taken");
    assert_eq!(field.model_value(), "old");
    assert_eq!(field.current_value(), "new");
    assert!(!field.is_saving());

    field.handle_input("newer".to_string());
    assert_eq!(field.error(), None);
}
