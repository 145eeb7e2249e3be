//! The `classbook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("classbook.toml").exists() {
        println!("classbook.toml already exists, skipping.");
    } else {
        std::fs::write("classbook.toml", SAMPLE_CONFIG)?;
        println!("Created classbook.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point base_url in classbook.toml at your student store");
    println!("  2. Run: classbook list");
    println!("  3. Run: classbook shell");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# classbook configuration

# Endpoint root for /list, /create, /update and /delete.
# ${VAR} references are expanded; CLASSBOOK_BASE_URL overrides this value.
base_url = "http://localhost:8000"

# Per-request timeout in seconds.
timeout_secs = 30
"#;
