//! Dataset loader tests against temporary fixture directories

use lab_common::chart::ChartView;
use lab_common::datasets::{load, load_or_empty, DataSource};
use lab_common::{ChartKind, LabError};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn write_fixtures(dir: &Path) {
    std::fs::write(
        dir.join("reagents.json"),
        r#"[{"name":"Reagent A","stock":1950,"usage":150}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("operations.json"),
        r#"[{"date":"2025-11-01","tests":1180,"tat":47},{"date":"2025-11-02","tests":1220,"tat":49}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("results.json"),
        r#"[{"test":"Hemoglobin","flag":"Normal"},{"test":"Glucose FBS","flag":"High"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("inventory.json"),
        r#"[{"item":"Gloves","stock":400,"threshold":500}]"#,
    )
    .unwrap();
}

#[tokio::test]
async fn test_load_all_four() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let bundle = load(&DataSource::Dir(dir.path().to_path_buf())).await.unwrap();
    assert_eq!(bundle.counts(), [1, 2, 2, 1]);
    assert!(ChartView::build(ChartKind::Inventory, &bundle).is_some());
}

#[tokio::test]
async fn test_missing_file_empties_everything() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    std::fs::remove_file(dir.path().join("inventory.json")).unwrap();

    let source = DataSource::Dir(dir.path().to_path_buf());
    assert!(matches!(load(&source).await, Err(LabError::Io(_))));

    let bundle = load_or_empty(&source).await;
    assert!(bundle.is_empty());
    for kind in ChartKind::ALL {
        assert!(ChartView::build(kind, &bundle).is_none());
    }
}

#[tokio::test]
async fn test_malformed_json_empties_everything() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    std::fs::write(dir.path().join("results.json"), "{not json").unwrap();

    let source = DataSource::Dir(dir.path().to_path_buf());
    assert!(matches!(load(&source).await, Err(LabError::Json(_))));
    assert!(load_or_empty(&source).await.is_empty());
}

#[tokio::test]
async fn test_object_instead_of_array_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    std::fs::write(dir.path().join("reagents.json"), r#"{"name":"Reagent A"}"#).unwrap();

    let err = load(&DataSource::Dir(dir.path().to_path_buf())).await.unwrap_err();
    match err {
        LabError::NotAnArray { file } => assert_eq!(file, "reagents.json"),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_bundled_fixtures_load() {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let bundle = load(&DataSource::Dir(data)).await.unwrap();
    for kind in ChartKind::ALL {
        assert!(!bundle.get(kind).is_empty(), "{} fixture is empty", kind);
        assert!(ChartView::build(kind, &bundle).is_some());
    }
}

fn bundled_files() -> Vec<(String, String)> {
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    ChartKind::ALL
        .iter()
        .map(|kind| {
            let name = format!("{}.json", kind.key());
            let body = std::fs::read_to_string(data.join(&name)).unwrap();
            (name, body)
        })
        .collect()
}

/// Serve `files` under `/data/` over plain HTTP/1.1; anything else is a 404.
/// Returns the base URL.
async fn serve(files: Vec<(String, String)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let files = files.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let found = path
                    .strip_prefix("/data/")
                    .and_then(|name| files.iter().find(|(file, _)| file.as_str() == name));

                let response = match found {
                    Some((_, body)) => format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    ),
                    None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string(),
                };
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}/data", addr)
}

#[tokio::test]
async fn test_load_from_url() {
    let base = serve(bundled_files()).await;
    let source = DataSource::parse(&format!("{}/", base));
    assert_eq!(source, DataSource::Url(base));

    let from_url = load(&source).await.unwrap();
    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let from_dir = load(&DataSource::Dir(data)).await.unwrap();
    assert_eq!(from_url.counts(), from_dir.counts());
    assert!(ChartView::build(ChartKind::Results, &from_url).is_some());
}

#[tokio::test]
async fn test_url_not_found_empties_everything() {
    let mut files = bundled_files();
    files.retain(|(name, _)| name.as_str() != "inventory.json");
    let source = DataSource::Url(serve(files).await);

    assert!(matches!(load(&source).await, Err(LabError::Http(_))));
    assert!(load_or_empty(&source).await.is_empty());
}

#[tokio::test]
async fn test_url_object_body_is_rejected() {
    let mut files = bundled_files();
    for (name, body) in files.iter_mut() {
        if name.as_str() == "results.json" {
            *body = r#"{"test":"Hemoglobin"}"#.to_string();
        }
    }
    let source = DataSource::Url(serve(files).await);

    match load(&source).await.unwrap_err() {
        LabError::NotAnArray { file } => assert_eq!(file, "results.json"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(load_or_empty(&source).await.is_empty());
}
