//! Lowest-priority jj config layer. `UserSettings` refuses to load without an
//! operation identity, and a fresh machine may have no user config at all.

pub const DEFAULT_FALLBACK_CONFIG: &str = r#"
[user]
name = ""
email = ""

[operation]
hostname = "localhost"
username = "braid"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_config_parses() {
        let layer = jj_lib::config::ConfigLayer::parse(
            jj_lib::config::ConfigSource::Default,
            DEFAULT_FALLBACK_CONFIG,
        );
        assert!(layer.is_ok());
    }
}
