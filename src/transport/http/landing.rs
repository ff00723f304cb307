//! The static landing page served at `/`.

use std::path::Path;

pub const LANDING_PAGE: &str = concat!(
    "<!doctype html><html><head><meta charset=\"utf-8\">",
    "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">",
    "<title>FreeNetHub</title></head>",
    "<body><h1>FreeNetHub Backend v3</h1><p>Visit /api/status</p></body></html>"
);

/// Creates `dir` if needed and (re)writes `index.html` into it.
pub async fn write_landing_page(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join("index.html"), LANDING_PAGE).await
}
