//! Writes the OpenAPI specification for the MockVerse API to disk, for
//! frontend codegen and CI diffing.

use mockverse_api::router::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    std::fs::write(&path, ApiDoc::openapi().to_pretty_json()?)?;
    println!("OpenAPI specification written to {path}");
    Ok(())
}
