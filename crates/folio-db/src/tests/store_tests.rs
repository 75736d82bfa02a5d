//! Reconciliation and read-model tests against a live database.

use folio_core::{
    decode_inline, encode_inline, Education, ImageMode, PortfolioDocument, PortfolioStore, Project,
    Tool,
};

use super::fixtures::TestDatabase;

const PNG_HEADER: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn tool(id: Option<i64>, name: &str, icon: &str) -> Tool {
    Tool {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn document_with_tools(tools: Vec<Tool>) -> PortfolioDocument {
    PortfolioDocument {
        tools,
        ..PortfolioDocument::default()
    }
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn freshly_seeded_database_reads_empty_document() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    let doc = store.load().await.unwrap();
    assert_eq!(doc.about_me, "");
    assert_eq!(doc.education, Education::default());
    assert!(doc.tools.is_empty());
    assert!(doc.projects.is_empty());
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn missing_settings_keys_read_as_empty_strings() {
    let test_db = TestDatabase::new().await;
    sqlx::query("DELETE FROM settings")
        .execute(&test_db.db.pool)
        .await
        .unwrap();

    let store = test_db.store(ImageMode::FilesystemPath);
    let doc = store.load().await.unwrap();
    assert_eq!(doc.about_me, "");
    assert_eq!(doc.education.university, "");
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn save_assigns_server_ids_in_submission_order() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    store
        .save(document_with_tools(vec![
            tool(None, "Git", "/assets/icon/git.png"),
            tool(None, "Docker", "/assets/icon/docker.png"),
        ]))
        .await
        .unwrap();

    let doc = store.load().await.unwrap();
    let names: Vec<&str> = doc.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Git", "Docker"]);
    assert!(doc.tools.iter().all(|t| t.id.is_some()));
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn reconcile_deletes_ids_absent_from_submission() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    store
        .save(document_with_tools(vec![
            tool(None, "Git", "/assets/icon/git.png"),
            tool(None, "Docker", "/assets/icon/docker.png"),
        ]))
        .await
        .unwrap();
    let seeded = store.load().await.unwrap();
    let git_id = seeded.tools[0].id;

    // Resubmit only Git: Docker's row must go, projects stay empty.
    store
        .save(document_with_tools(vec![tool(
            git_id,
            "Git",
            "/assets/icon/git.png",
        )]))
        .await
        .unwrap();

    let doc = store.load().await.unwrap();
    assert_eq!(doc.tools.len(), 1);
    assert_eq!(doc.tools[0].id, git_id);
    assert_eq!(doc.tools[0].name, "Git");
    assert_eq!(doc.tools[0].icon, "/assets/icon/git.png");
    assert!(doc.projects.is_empty());
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn empty_submission_deletes_everything() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    store
        .save(document_with_tools(vec![tool(None, "Git", "")]))
        .await
        .unwrap();
    store.save(PortfolioDocument::default()).await.unwrap();

    let doc = store.load().await.unwrap();
    assert!(doc.tools.is_empty());
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn duplicate_submitted_ids_last_write_wins() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    store
        .save(document_with_tools(vec![tool(None, "Git", "")]))
        .await
        .unwrap();
    let id = store.load().await.unwrap().tools[0].id;

    store
        .save(document_with_tools(vec![
            tool(id, "First", ""),
            tool(id, "Second", ""),
        ]))
        .await
        .unwrap();

    let doc = store.load().await.unwrap();
    assert_eq!(doc.tools.len(), 1);
    assert_eq!(doc.tools[0].name, "Second");
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn settings_writes_are_update_only() {
    let test_db = TestDatabase::new().await;
    sqlx::query("DELETE FROM settings WHERE key = 'aboutMe'")
        .execute(&test_db.db.pool)
        .await
        .unwrap();

    let store = test_db.store(ImageMode::FilesystemPath);
    let mut doc = PortfolioDocument::default();
    doc.about_me = "should not be created".to_string();
    doc.education.university = "ITB".to_string();
    store.save(doc).await.unwrap();

    // The missing key was not auto-created; present keys updated fine.
    let loaded = store.load().await.unwrap();
    assert_eq!(loaded.about_me, "");
    assert_eq!(loaded.education.university, "ITB");
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn tech_list_round_trips_through_storage() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    let mut doc = PortfolioDocument::default();
    doc.projects = vec![Project {
        id: None,
        title: "Folio".to_string(),
        tech: vec!["Go".to_string(), "Rust".to_string()],
        img_src: String::new(),
    }];
    store.save(doc).await.unwrap();

    let loaded = store.load().await.unwrap();
    assert_eq!(
        loaded.projects[0].tech,
        vec!["Go".to_string(), "Rust".to_string()]
    );
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn path_mode_persists_inline_icon_as_file() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    store
        .save(document_with_tools(vec![tool(
            None,
            "Git",
            &encode_inline(PNG_HEADER).unwrap(),
        )]))
        .await
        .unwrap();

    let doc = store.load().await.unwrap();
    let icon = &doc.tools[0].icon;
    assert!(icon.starts_with("/uploads/tools/"), "got {}", icon);

    let on_disk = test_db
        .public_dir
        .path()
        .join(icon.trim_start_matches('/'));
    assert_eq!(tokio::fs::read(on_disk).await.unwrap(), PNG_HEADER);
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn deleting_an_item_removes_its_uploaded_file() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    store
        .save(document_with_tools(vec![tool(
            None,
            "Git",
            &encode_inline(PNG_HEADER).unwrap(),
        )]))
        .await
        .unwrap();
    let doc = store.load().await.unwrap();
    let on_disk = test_db
        .public_dir
        .path()
        .join(doc.tools[0].icon.trim_start_matches('/'));
    assert!(on_disk.exists());

    store.save(PortfolioDocument::default()).await.unwrap();
    assert!(!on_disk.exists());
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn blob_mode_round_trips_inline_images() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::InlineBlob);

    let mut doc = PortfolioDocument::default();
    doc.projects = vec![Project {
        id: None,
        title: "Folio".to_string(),
        tech: vec![],
        img_src: encode_inline(PNG_HEADER).unwrap(),
    }];
    store.save(doc).await.unwrap();

    let loaded = store.load().await.unwrap();
    let img_src = &loaded.projects[0].img_src;
    assert!(img_src.starts_with("data:image/png;base64,"));
    assert_eq!(decode_inline(img_src).unwrap(), PNG_HEADER);

    // Blob payloads leave no files behind when the row goes away.
    store.save(PortfolioDocument::default()).await.unwrap();
    let uploads = test_db.public_dir.path().join("uploads");
    assert!(!uploads.exists() || uploads.read_dir().unwrap().next().is_none());
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn blob_mode_passes_picker_paths_through() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::InlineBlob);

    store
        .save(document_with_tools(vec![tool(
            None,
            "Git",
            "/assets/icon/git.png",
        )]))
        .await
        .unwrap();

    let doc = store.load().await.unwrap();
    assert_eq!(doc.tools[0].icon, "/assets/icon/git.png");
}

#[tokio::test]
#[ignore = "requires a test database"]
async fn read_model_is_idempotent() {
    let test_db = TestDatabase::new().await;
    let store = test_db.store(ImageMode::FilesystemPath);

    let mut doc = PortfolioDocument::default();
    doc.about_me = "hello".to_string();
    doc.tools = vec![tool(None, "Git", "/assets/icon/git.png")];
    store.save(doc).await.unwrap();

    assert_eq!(store.load().await.unwrap(), store.load().await.unwrap());
}
