use anyhow::{Result, anyhow};

pub fn validate_webhook_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(anyhow!("Webhook path cannot be empty"));
    }

    if !path.starts_with('/') {
        return Err(anyhow!("Webhook path must start with '/'"));
    }

    if path.chars().any(char::is_whitespace) {
        return Err(anyhow!("Webhook path contains whitespace"));
    }

    Ok(())
}
