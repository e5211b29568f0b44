use shared::{
    domain::{Step, StepId},
    protocol::{default_seed, StepRecord},
};
use storage::{ByteStore, FileByteStore, LoadSource, PersistenceGateway};

#[test]
fn file_backed_save_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gateway = PersistenceGateway::new(FileByteStore::in_dir(dir.path().join("profile")));

    let first = gateway.load();
    assert_eq!(first.source, LoadSource::Missing);
    assert_eq!(first.records, default_seed());

    let steps = vec![
        Step::new(StepId(1), "Initial Move", 10.0),
        Step::new(StepId(2), "Rotate", 45.0),
        Step::new(StepId(3), "New Action", 0.0),
    ];
    gateway.save(&steps).expect("save");

    let second = gateway.load();
    assert_eq!(second.source, LoadSource::Persisted);
    assert_eq!(
        second.records,
        vec![
            StepRecord::new("Initial Move", 10.0),
            StepRecord::new("Rotate", 45.0),
            StepRecord::new("New Action", 0.0),
        ]
    );
}

#[test]
fn saving_a_loaded_document_reproduces_it() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileByteStore::in_dir(dir.path());
    let original = r#"{
  "steps": [
    {
      "name": "Wait",
      "value": 2.5
    },
    {
      "name": "Wait",
      "value": 2.5
    }
  ]
}"#;
    store.write(original.as_bytes()).expect("seed file");

    let gateway = PersistenceGateway::new(store.clone());
    let loaded = gateway.load();
    gateway.save_records(loaded.records).expect("save");

    let rewritten = String::from_utf8(store.read().expect("read").expect("bytes")).expect("utf8");
    let before: serde_json::Value = serde_json::from_str(original).expect("original json");
    let after: serde_json::Value = serde_json::from_str(&rewritten).expect("rewritten json");
    assert_eq!(before, after);
}

#[test]
fn corrupt_file_is_left_untouched_by_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileByteStore::in_dir(dir.path());
    store.write(b"\"steps\": oops").expect("seed corrupt file");

    let gateway = PersistenceGateway::new(store.clone());
    let outcome = gateway.load();
    assert!(matches!(outcome.source, LoadSource::Corrupt(_)));
    assert_eq!(outcome.records, default_seed());
    assert_eq!(
        store.read().expect("read").expect("bytes"),
        b"\"steps\": oops".to_vec()
    );
}
