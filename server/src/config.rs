use std::path::PathBuf;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "client/dist";
pub const DEFAULT_FIXTURE_SEED: u64 = 123_456_789;

/// Fixtures are regenerated on restart, so browsers must revalidate.
pub const FIXTURE_CACHE_CONTROL: &str = "no-cache";

pub fn server_port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

pub fn static_dir() -> PathBuf {
    std::env::var("STATIC_DIR")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR))
}

/// Directory holding hand-written fixture documents, if any.
pub fn fixture_dir() -> Option<PathBuf> {
    std::env::var("FIXTURE_DIR")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn fixture_seed() -> u64 {
    std::env::var("FIXTURE_SEED")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_FIXTURE_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset_or_invalid() {
        temp_env::with_var_unset("PORT", || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("PORT", Some("0"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("PORT", Some("eighty"), || {
            assert_eq!(server_port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("PORT", Some("8080"), || {
            assert_eq!(server_port(), 8080);
        });
    }

    #[test]
    fn static_dir_ignores_blank_values() {
        temp_env::with_var("STATIC_DIR", Some("   "), || {
            assert_eq!(static_dir(), PathBuf::from(DEFAULT_STATIC_DIR));
        });
        temp_env::with_var("STATIC_DIR", Some("/srv/radindex"), || {
            assert_eq!(static_dir(), PathBuf::from("/srv/radindex"));
        });
    }

    #[test]
    fn fixture_dir_is_optional() {
        temp_env::with_var_unset("FIXTURE_DIR", || {
            assert_eq!(fixture_dir(), None);
        });
        temp_env::with_var("FIXTURE_DIR", Some("fixtures"), || {
            assert_eq!(fixture_dir(), Some(PathBuf::from("fixtures")));
        });
    }

    #[test]
    fn fixture_seed_parses_or_defaults() {
        temp_env::with_var("FIXTURE_SEED", Some(" 42 "), || {
            assert_eq!(fixture_seed(), 42);
        });
        temp_env::with_var("FIXTURE_SEED", Some("-1"), || {
            assert_eq!(fixture_seed(), DEFAULT_FIXTURE_SEED);
        });
    }
}
