use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthLocker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/HealthLocker/ on all platforms (user-visible by design)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("HealthLocker")
}

/// Path of the durable session slot (single keyed slot, one serialized record)
pub fn session_file() -> PathBuf {
    app_data_dir().join("session.json")
}

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> &'static str {
    "info,healthlocker=debug"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("HealthLocker"));
    }

    #[test]
    fn session_file_under_app_data() {
        let file = session_file();
        assert!(file.starts_with(app_data_dir()));
        assert!(file.ends_with("session.json"));
    }

    #[test]
    fn app_name_is_healthlocker() {
        assert_eq!(APP_NAME, "HealthLocker");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
