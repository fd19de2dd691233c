use async_trait::async_trait;
use kariyer_pdf_server::cv::model::{GenerationRecord, GenerationStatus, RecordUpdate};
use kariyer_pdf_server::cv::{
    GenerationStore, GenerationTracker, InMemoryGenerationStore, TrackerError,
};
use kariyer_pdf_server::db::StoreError;
use kariyer_pdf_server::generation::{
    DocumentComposer, FontCache, TemplateDispatcher, TemplateRegistry,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use uuid::Uuid;

fn dispatcher() -> TemplateDispatcher {
    let composer = Arc::new(DocumentComposer::new(Arc::new(FontCache::new(vec![]))));
    TemplateDispatcher::new(TemplateRegistry::with_defaults(composer))
}

fn tracker_with(store: Arc<dyn GenerationStore>) -> GenerationTracker {
    GenerationTracker::new(store, dispatcher())
}

fn cv(name: &str) -> Value {
    json!({
        "personalInfo": { "fullName": name, "email": "someone@example.com" },
        "skills": ["Rust", "SQL"]
    })
}

/// Delegates to memory but can be told to fail every status write.
struct FlakyStore {
    inner: InMemoryGenerationStore,
    fail_updates: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: InMemoryGenerationStore::new(),
            fail_updates: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl GenerationStore for FlakyStore {
    async fn create(&self, record: GenerationRecord) -> Result<GenerationRecord, StoreError> {
        self.inner.create(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GenerationRecord>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, id: Uuid, update: RecordUpdate) -> Result<GenerationRecord, StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupt("write rejected".to_string()));
        }
        self.inner.update(id, update).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<GenerationRecord>, StoreError> {
        self.inner.list_all().await
    }
}

/// Holds one `list_all` call open after its snapshot was taken.
struct GatedListStore {
    inner: InMemoryGenerationStore,
    hold_next_list: AtomicBool,
    snapshot_taken: Notify,
    release: Notify,
}

impl GatedListStore {
    fn new() -> Self {
        Self {
            inner: InMemoryGenerationStore::new(),
            hold_next_list: AtomicBool::new(false),
            snapshot_taken: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl GenerationStore for GatedListStore {
    async fn create(&self, record: GenerationRecord) -> Result<GenerationRecord, StoreError> {
        self.inner.create(record).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GenerationRecord>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn update(&self, id: Uuid, update: RecordUpdate) -> Result<GenerationRecord, StoreError> {
        self.inner.update(id, update).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<GenerationRecord>, StoreError> {
        let records = self.inner.list_all().await?;
        if self.hold_next_list.swap(false, Ordering::SeqCst) {
            self.snapshot_taken.notify_one();
            self.release.notified().await;
        }
        Ok(records)
    }
}

#[tokio::test]
async fn test_generate_completes_with_output() {
    let store = Arc::new(InMemoryGenerationStore::new());
    let tracker = tracker_with(store.clone());

    let record = tracker.generate("basic-hr", cv("Jane Doe"), None, None).await.unwrap();
    assert_eq!(record.generation_status, GenerationStatus::Completed);
    assert!(record.has_output());

    let stored = store.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.generation_status, GenerationStatus::Completed);
    assert_eq!(stored.pdf_data, record.pdf_data);
}

#[tokio::test]
async fn test_unknown_template_leaves_failed_record() {
    let store = Arc::new(InMemoryGenerationStore::new());
    let tracker = tracker_with(store.clone());

    let err = tracker.generate("modern-blue", cv("Jane Doe"), None, None).await.unwrap_err();
    assert!(matches!(err, TrackerError::UnsupportedTemplate(_)));

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].generation_status, GenerationStatus::Failed);
    assert!(records[0].pdf_data.is_none());
}

#[tokio::test]
async fn test_turkey_without_language_creates_nothing() {
    let store = Arc::new(InMemoryGenerationStore::new());
    let tracker = tracker_with(store.clone());

    let err = tracker
        .generate("basic-hr", cv("Jane Doe"), Some("turkey"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Validation(_)));
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_no_record_is_left_processing() {
    let store = Arc::new(InMemoryGenerationStore::new());
    let tracker = tracker_with(store.clone());

    let _ = tracker.generate("simple-classic", cv("A"), None, None).await;
    let _ = tracker.generate("simple-classic", json!({ "nope": true }), None, None).await;
    let _ = tracker.generate("unknown", cv("B"), None, None).await;

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 3);
    for record in records {
        assert_ne!(record.generation_status, GenerationStatus::Processing);
        assert_eq!(
            record.has_output(),
            record.generation_status == GenerationStatus::Completed
        );
    }
}

#[tokio::test]
async fn test_regenerate_reuses_the_record() {
    let store = Arc::new(InMemoryGenerationStore::new());
    let tracker = tracker_with(store.clone());

    let first = tracker.generate("office-manager", cv("Jane Doe"), None, None).await.unwrap();
    let second = tracker
        .regenerate(first.id, cv("Jane Smith"), None, None)
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.generation_status, GenerationStatus::Completed);
    assert_eq!(second.template_data["personalInfo"]["fullName"], "Jane Smith");
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_regenerate_failure_clears_output() {
    let store = Arc::new(InMemoryGenerationStore::new());
    let tracker = tracker_with(store.clone());

    let record = tracker.generate("basic-hr", cv("Jane Doe"), None, None).await.unwrap();
    let err = tracker
        .regenerate(record.id, json!({ "personalInfo": { "fullName": " " } }), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, TrackerError::Generation(_)));

    let stored = store.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.generation_status, GenerationStatus::Failed);
    assert!(stored.pdf_data.is_none());
    assert!(matches!(
        tracker.download(record.id).await,
        Err(TrackerError::NotReady(_))
    ));
}

#[tokio::test]
async fn test_regenerate_processing_record_is_rejected() {
    let store = Arc::new(InMemoryGenerationStore::new());
    let record = store
        .create(GenerationRecord::processing("basic-hr", cv("Jane Doe")))
        .await
        .unwrap();
    let tracker = tracker_with(store);

    let err = tracker.regenerate(record.id, cv("Jane Doe"), None, None).await.unwrap_err();
    assert!(matches!(
        err,
        TrackerError::InvalidState { status: GenerationStatus::Processing, .. }
    ));
}

#[tokio::test]
async fn test_regenerate_missing_record() {
    let tracker = tracker_with(Arc::new(InMemoryGenerationStore::new()));
    let id = Uuid::new_v4();
    let err = tracker.regenerate(id, cv("Jane Doe"), None, None).await.unwrap_err();
    assert!(matches!(err, TrackerError::NotFound(missing) if missing == id));
}

#[tokio::test]
async fn test_dispatch_error_survives_failed_status_write() {
    let store = Arc::new(FlakyStore::new());
    store.fail_updates.store(true, Ordering::SeqCst);
    let tracker = tracker_with(store.clone());

    let err = tracker.generate("modern-blue", cv("Jane Doe"), None, None).await.unwrap_err();
    assert!(matches!(err, TrackerError::UnsupportedTemplate(_)));
}

#[tokio::test]
async fn test_completed_write_failure_is_reported() {
    let store = Arc::new(FlakyStore::new());
    store.fail_updates.store(true, Ordering::SeqCst);
    let tracker = tracker_with(store.clone());

    let err = tracker.generate("basic-hr", cv("Jane Doe"), None, None).await.unwrap_err();
    assert!(matches!(err, TrackerError::Store(_)));
}

#[tokio::test]
async fn test_list_reflects_writes_and_is_newest_first() {
    let tracker = tracker_with(Arc::new(InMemoryGenerationStore::new()));
    assert!(tracker.list().await.unwrap().is_empty());

    let older = tracker.generate("basic-hr", cv("Old"), None, None).await.unwrap();
    let newer = tracker.generate("simple-classic", cv("New"), None, None).await.unwrap();

    let ids: Vec<Uuid> = tracker.list().await.unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    tracker.delete(older.id).await.unwrap();
    let ids: Vec<Uuid> = tracker.list().await.unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![newer.id]);
}

#[tokio::test]
async fn test_download_and_delete() {
    let tracker = tracker_with(Arc::new(InMemoryGenerationStore::new()));
    let record = tracker.generate("stylish-accounting", cv("Jane"), None, None).await.unwrap();

    let pdf = tracker.download(record.id).await.unwrap();
    assert!(pdf.starts_with(b"%PDF-"));

    tracker.delete(record.id).await.unwrap();
    assert!(matches!(tracker.get(record.id).await, Err(TrackerError::NotFound(_))));
    assert!(matches!(tracker.delete(record.id).await, Err(TrackerError::NotFound(_))));
}

#[tokio::test]
async fn test_list_read_during_a_write_is_not_kept() {
    let store = Arc::new(GatedListStore::new());
    let tracker = Arc::new(tracker_with(store.clone()));

    let first = tracker.generate("basic-hr", cv("First"), None, None).await.unwrap();

    store.hold_next_list.store(true, Ordering::SeqCst);
    let reader = tokio::spawn({
        let tracker = tracker.clone();
        async move { tracker.list().await }
    });
    store.snapshot_taken.notified().await;

    let second = tracker.generate("basic-hr", cv("Second"), None, None).await.unwrap();
    store.release.notify_one();

    let during: Vec<Uuid> = reader.await.unwrap().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(during, vec![first.id]);

    let after = tracker.list().await.unwrap();
    let ids: Vec<Uuid> = after.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(after
        .iter()
        .all(|s| s.generation_status == GenerationStatus::Completed));
}
