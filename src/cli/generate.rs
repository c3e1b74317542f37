use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::generators::TestGenerator;
use crate::reflection::ReflectedClass;
use crate::render::{OutlineRenderer, PhpRenderer};

/// Read a class description, generate its tests and write them out.
pub fn run(
    class_path: String,
    config_path: Option<String>,
    output: Option<String>,
    outline: bool,
) -> Result<()> {
    let class = read_class(Path::new(&class_path))?;
    info!("Class: {}", class.full_name());

    let config = Config::load_with_path(config_path.as_deref().map(Path::new))?;
    let generator = TestGenerator::new(config)?;

    let test_class = generator
        .generate(&class)
        .with_context(|| format!("Failed to generate tests for {}", class.full_name()))?;

    let rendered = if outline {
        OutlineRenderer::render(&test_class)
    } else {
        PhpRenderer::render(&test_class)
    };

    match output {
        Some(path) => {
            fs::write(&path, &rendered).with_context(|| format!("Failed to write {}", path))?;
            info!("Wrote {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Parse a JSON class description.
pub fn read_class(path: &Path) -> Result<ReflectedClass> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read class description {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid class description in {}", path.display()))
}
