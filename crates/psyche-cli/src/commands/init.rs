//! The `psyche init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("psyche.toml").exists() {
        println!("psyche.toml already exists, skipping.");
    } else {
        std::fs::write("psyche.toml", SAMPLE_CONFIG)?;
        println!("Created psyche.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit psyche.toml (port, CORS origins, session expiry)");
    println!("  2. Run: psyche serve");
    println!("  3. Try it: psyche take --server http://localhost:8000");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# psyche server configuration

bind = "0.0.0.0"
port = 8000

# Reject ratings outside 1-5 before they reach the session engine.
strict_ratings = true

# "*" allows any origin.
allowed_origins = ["*"]

# Drop sessions idle for this long. 0 keeps them until the process exits.
session_ttl_secs = 3600
sweep_interval_secs = 60
"#;
