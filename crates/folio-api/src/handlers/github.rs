//! GitHub stats handler.
//!
//! The landing page shows a small stats card. Repo and commit counts are
//! fetched live from the GitHub REST API; pull request, issue, and
//! contributed-to counts are static. Any upstream failure is recovered
//! locally with fallback values; this endpoint never surfaces an
//! upstream error to the caller.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::AppState;
use folio_core::defaults::{
    GITHUB_API_URL, GITHUB_FALLBACK_COMMITS, GITHUB_FALLBACK_CONTRIBUTED_TO,
    GITHUB_FALLBACK_ISSUES, GITHUB_FALLBACK_PUBLIC_REPOS, GITHUB_FALLBACK_PULL_REQUESTS,
};
use folio_core::{Error, GithubStats, Result};

#[derive(Debug, Deserialize)]
struct GithubUser {
    #[serde(default)]
    public_repos: i64,
}

#[derive(Debug, Deserialize)]
struct SearchCount {
    #[serde(default)]
    total_count: i64,
}

/// Return the GitHub stats card, falling back to static values when the
/// upstream lookup fails.
pub async fn github_stats(State(state): State<AppState>) -> Json<GithubStats> {
    let stats = match fetch_stats(&state).await {
        Ok(stats) => stats,
        Err(e) => {
            warn!(error = %e, "GitHub lookup failed, serving fallback stats");
            fallback_stats()
        }
    };
    Json(stats)
}

async fn fetch_stats(state: &AppState) -> Result<GithubStats> {
    let username = state
        .config
        .github_username
        .as_deref()
        .ok_or_else(|| Error::Config("GITHUB_USERNAME is not set".to_string()))?;

    let user: GithubUser = get_json(state, &format!("{}/users/{}", GITHUB_API_URL, username))
        .await?;

    // The commit count is secondary: keep the live repo count even if
    // the search lookup fails.
    let commits = match get_json::<SearchCount>(
        state,
        &format!(
            "{}/search/commits?q=author:{}",
            GITHUB_API_URL, username
        ),
    )
    .await
    {
        Ok(result) => result.total_count,
        Err(e) => {
            warn!(error = %e, "GitHub commit search failed, using fallback count");
            GITHUB_FALLBACK_COMMITS
        }
    };

    Ok(GithubStats {
        public_repos: user.public_repos,
        commits,
        pull_requests: GITHUB_FALLBACK_PULL_REQUESTS,
        issues: GITHUB_FALLBACK_ISSUES,
        contributed_to: GITHUB_FALLBACK_CONTRIBUTED_TO,
    })
}

async fn get_json<T: serde::de::DeserializeOwned>(state: &AppState, url: &str) -> Result<T> {
    let mut request = state
        .http
        .get(url)
        .header(reqwest::header::USER_AGENT, "folio-api")
        .header(reqwest::header::ACCEPT, "application/vnd.github+json");
    if let Some(token) = &state.config.github_token {
        request = request.bearer_auth(token);
    }
    Ok(request
        .send()
        .await?
        .error_for_status()?
        .json::<T>()
        .await?)
}

fn fallback_stats() -> GithubStats {
    GithubStats {
        public_repos: GITHUB_FALLBACK_PUBLIC_REPOS,
        commits: GITHUB_FALLBACK_COMMITS,
        pull_requests: GITHUB_FALLBACK_PULL_REQUESTS,
        issues: GITHUB_FALLBACK_ISSUES,
        contributed_to: GITHUB_FALLBACK_CONTRIBUTED_TO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_stats_keep_the_static_counts() {
        let stats = fallback_stats();
        assert_eq!(stats.pull_requests, GITHUB_FALLBACK_PULL_REQUESTS);
        assert_eq!(stats.issues, GITHUB_FALLBACK_ISSUES);
        assert_eq!(stats.contributed_to, GITHUB_FALLBACK_CONTRIBUTED_TO);
    }

    #[test]
    fn upstream_shapes_tolerate_missing_fields() {
        let user: GithubUser = serde_json::from_str("{}").unwrap();
        assert_eq!(user.public_repos, 0);
        let count: SearchCount = serde_json::from_str("{}").unwrap();
        assert_eq!(count.total_count, 0);
    }
}
