use std::path::PathBuf;

/// Returns the backoffice settings directory.
///
/// Resolution order:
/// 1. `BACKOFFICE_ROOT` environment variable (if set)
/// 2. Current working directory + `.backoffice`
pub fn backoffice_root() -> PathBuf {
    match std::env::var("BACKOFFICE_ROOT") {
        Ok(root) if !root.is_empty() => PathBuf::from(root),
        _ => PathBuf::from(".backoffice"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_backoffice_root_default() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::remove_var("BACKOFFICE_ROOT") };
        assert_eq!(backoffice_root(), PathBuf::from(".backoffice"));
    }

    #[test]
    #[serial]
    fn test_backoffice_root_with_env_var() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { std::env::set_var("BACKOFFICE_ROOT", "/srv/agency/.backoffice") };
        assert_eq!(backoffice_root(), PathBuf::from("/srv/agency/.backoffice"));
        unsafe { std::env::remove_var("BACKOFFICE_ROOT") };
    }
}
