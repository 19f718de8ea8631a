//! Network fetch for remote font programs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("font fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("font parse failed: {0}")]
    Parse(String),
    #[error("font {0:?} does not cover the requested text")]
    Coverage(String),
}

/// Fetch raw font bytes from `url`.
///
/// Non-2xx responses are errors; callers treat any failure as a signal to
/// degrade to a built-in font.
pub async fn fetch_font_bytes(url: &str) -> Result<Vec<u8>, FontError> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
