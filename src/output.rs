use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Quiet mode drops banners and section titles, keeping data and errors
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("MENUSTAT_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
