use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Crates whose debug output drowns the site's own logs.
const QUIET_TARGETS: [&str; 4] = ["hyper_util=warn", "reqwest=warn", "lettre=warn", "rustls=warn"];

pub(crate) fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    let mut directives = vec![level.trim().to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|target| target.to_string()));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::default_directives;

    #[test]
    fn quiet_targets_follow_the_base_level() {
        let directives = default_directives(" debug ");
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("reqwest=warn"));
    }
}
