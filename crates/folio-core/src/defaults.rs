//! Centralized default constants for the folio backend.
//!
//! **This module is the single source of truth** for all shared default
//! values and environment variable names. Crates reference these constants
//! instead of defining their own magic values.

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum upload size in bytes (50 MB), enforced on the upload route.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 50 * 1024 * 1024;

// =============================================================================
// STORAGE
// =============================================================================

/// Environment variable selecting the persistence mode (`file` or `database`).
pub const ENV_STORAGE_MODE: &str = "STORAGE_MODE";

/// Environment variable selecting the image storage form (`path` or `inline`).
pub const ENV_IMAGE_MODE: &str = "IMAGE_MODE";

/// Environment variable for the file-mode document path.
pub const ENV_DATA_FILE: &str = "DATA_FILE";

/// Default file-mode document path, relative to the working directory.
pub const DATA_FILE: &str = "data.json";

/// Environment variable for the public assets root.
pub const ENV_PUBLIC_DIR: &str = "PUBLIC_DIR";

/// Default public assets root.
pub const PUBLIC_DIR: &str = "public";

/// Uploads directory under the public root; also the URL path prefix
/// upload responses are expressed in.
pub const UPLOADS_SUBDIR: &str = "uploads";

/// Subdirectory (under uploads) for project images persisted during a save.
pub const PROJECT_IMAGES_SUBDIR: &str = "projects";

/// Subdirectory (under uploads) for tool icons persisted during a save.
pub const TOOL_IMAGES_SUBDIR: &str = "tools";

/// Icon picker directory under the public root.
pub const ICONS_SUBDIR: &str = "assets/icon";

/// Default Postgres connection URL for database mode.
pub const DATABASE_URL: &str = "postgres://localhost/folio";

// =============================================================================
// SETTINGS KEYS
// =============================================================================

/// Settings key for the about-me text.
pub const SETTING_ABOUT_ME: &str = "aboutMe";

/// Settings key for the education university field.
pub const SETTING_EDUCATION_UNIVERSITY: &str = "education_university";

/// Settings key for the education major field.
pub const SETTING_EDUCATION_MAJOR: &str = "education_major";

/// Settings key for the education period field.
pub const SETTING_EDUCATION_PERIOD: &str = "education_period";

/// The full, fixed set of settings keys. Keys are never created or removed
/// at runtime, only updated.
pub const SETTINGS_KEYS: &[&str] = &[
    SETTING_ABOUT_ME,
    SETTING_EDUCATION_UNIVERSITY,
    SETTING_EDUCATION_MAJOR,
    SETTING_EDUCATION_PERIOD,
];

// =============================================================================
// IMAGES
// =============================================================================

/// Marker prefix identifying an inline image reference (a new upload).
pub const INLINE_IMAGE_MARKER: &str = "data:image";

/// Image file extensions recognized by the icon listing endpoint.
pub const IMAGE_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "gif", "webp"];

// =============================================================================
// GITHUB STATS
// =============================================================================

/// GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Environment variable for the GitHub account the stats describe.
pub const ENV_GITHUB_USERNAME: &str = "GITHUB_USERNAME";

/// Environment variable for an optional GitHub API token (raises rate limits).
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";

/// Upstream request timeout in seconds.
pub const GITHUB_TIMEOUT_SECS: u64 = 10;

/// Fallback public repository count when the upstream lookup fails.
pub const GITHUB_FALLBACK_PUBLIC_REPOS: i64 = 0;

/// Fallback commit count when the upstream lookup fails.
pub const GITHUB_FALLBACK_COMMITS: i64 = 0;

/// Static pull request count (not fetched live).
pub const GITHUB_FALLBACK_PULL_REQUESTS: i64 = 71;

/// Static issue count (not fetched live).
pub const GITHUB_FALLBACK_ISSUES: i64 = 3;

/// Static contributed-to count (not fetched live).
pub const GITHUB_FALLBACK_CONTRIBUTED_TO: i64 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_keys_are_fixed_and_unique() {
        assert_eq!(SETTINGS_KEYS.len(), 4);
        let mut seen = std::collections::HashSet::new();
        for key in SETTINGS_KEYS {
            assert!(seen.insert(key), "duplicate settings key {}", key);
        }
    }

    #[test]
    fn image_extensions_are_lowercase() {
        for ext in IMAGE_EXTENSIONS {
            assert_eq!(*ext, ext.to_lowercase());
        }
    }
}
