use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "slo-navigator.yaml";

pub const OPENSLO_FILE: &str = "openslo.yaml";
pub const SLOTH_FILE: &str = "sloth.yaml";
pub const MARKDOWN_FILE: &str = "slo-report.md";
pub const PDF_FILE: &str = "slo-report.pdf";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

static NON_SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn non_slug_re() -> &'static Regex {
    NON_SLUG_RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").unwrap())
}

/// Lowercase, hyphen-separated form of `text`, e.g. `"User Journey Success"`
/// -> `"user-journey-success"`. Falls back to `"slo"` when nothing survives.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let slug = non_slug_re().replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "slo".to_string()
    } else {
        slug.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_record_names() {
        assert_eq!(slugify("Availability"), "availability");
        assert_eq!(slugify("Error Rate"), "error-rate");
        assert_eq!(slugify("User Journey Success"), "user-journey-success");
        assert_eq!(slugify("  Job Success Rate (batch) "), "job-success-rate-batch");
        assert_eq!(slugify("***"), "slo");
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/slo-navigator.yaml")
        );
    }
}
