use crate::utils::config::app_config::AppConfig;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Creates a sqlite file at `dir/name` and runs the given statements against it.
pub async fn create_sqlite_db(dir: &Path, name: &str, statements: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await
        .unwrap();
    for statement in statements {
        sqlx::query(statement).execute(&mut conn).await.unwrap();
    }
    conn.close().await.unwrap();
    path
}

/// App configuration pointing at a sqlite file and a scratch export directory.
pub fn sqlite_app_config(db_path: &Path, export_dir: &Path) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("DB_DRIVER", "sqlite".to_string()),
        ("DB_NAME", db_path.display().to_string()),
        ("EXPORT_DIR", export_dir.display().to_string()),
        ("BIND_ADDR", "127.0.0.1:5000".to_string()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// Names of the files currently in `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Reads one XML part (e.g. `xl/worksheets/sheet1.xml`) out of a written workbook.
pub fn read_xlsx_part(path: &Path, part: &str) -> String {
    use std::io::Read;

    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    xml
}

/// Number of `<row>` elements in the first worksheet.
pub fn xlsx_row_count(path: &Path) -> usize {
    read_xlsx_part(path, "xl/worksheets/sheet1.xml")
        .matches("<row ")
        .count()
}

/// Router over a sqlite database built from `statements`, with a scratch export
/// directory. Keep the returned `TempDir` alive for the duration of the test.
pub async fn test_server(
    statements: &[&str],
) -> (axum_test::TestServer, tempfile::TempDir, PathBuf) {
    use crate::utils::appstate::appstate::{AppState, create_app};

    let dir = tempfile::tempdir().unwrap();
    let db = create_sqlite_db(dir.path(), "test.db", statements).await;
    let exports = dir.path().join("exports");
    let config = sqlite_app_config(&db, &exports);
    config.ensure_export_dir().unwrap();

    let server = axum_test::TestServer::new(create_app(AppState::new(config))).unwrap();
    (server, dir, exports)
}

/// File name at the end of a download link.
pub fn filename_from_url(url: &str) -> String {
    url.rsplit('/').next().unwrap_or_default().to_string()
}
