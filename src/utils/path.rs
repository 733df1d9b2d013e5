//! Path utilities: expand ~ in configured database paths.

use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/staff.sqlite"), PathBuf::from("/tmp/staff.sqlite"));
        assert_eq!(expand_tilde("staff.sqlite"), PathBuf::from("staff.sqlite"));
    }

    #[test]
    fn tilde_is_expanded_when_home_is_known() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/db/x.sqlite"), home.join("db/x.sqlite"));
        }
    }
}
