//! Write the service's OpenAPI document as YAML.
//!
//! Usage: `generate-openapi [OUTPUT]`, defaulting to `openapi.yaml`.

use anyhow::Context;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.yaml".to_string());

    let document = fakecloud::handlers::ApiDoc::openapi();
    let yaml = serde_yaml::to_string(&document).context("Failed to render OpenAPI document")?;
    std::fs::write(&output_path, yaml)
        .with_context(|| format!("Failed to write {output_path}"))?;

    println!("Wrote {} paths to {output_path}", document.paths.paths.len());
    Ok(())
}
