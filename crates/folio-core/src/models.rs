//! Portfolio document model.
//!
//! The document is the read/write unit exchanged with the presentation
//! layer: it is assembled from the store on every read and decomposed
//! back into settings/tool/project rows (or the JSON file) on every save.
//! Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Scalar education fields, stored as individual settings rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub period: String,
}

/// A tool entry (name + icon image reference).
///
/// `id` is absent until the row is persisted; a tool without an id is a
/// pending insert. The icon is either a public path or an inline
/// `data:image/...` reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// A project entry.
///
/// `tech` keeps its submission order (display order); duplicates are not
/// rejected. `img_src` follows the same reference rules as `Tool::icon`
/// and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub img_src: String,
}

/// The full portfolio document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDocument {
    #[serde(default)]
    pub about_me: String,
    #[serde(default)]
    pub education: Education,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// GitHub statistics served to the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStats {
    pub public_repos: i64,
    pub commits: i64,
    pub pull_requests: i64,
    pub issues: i64,
    pub contributed_to: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_serializes_camel_case() {
        let doc = PortfolioDocument {
            about_me: "hello".to_string(),
            education: Education {
                university: "ITB".to_string(),
                major: "CS".to_string(),
                period: "2021-2025".to_string(),
            },
            tools: vec![Tool {
                id: Some(1),
                name: "Git".to_string(),
                icon: "/assets/icon/git.png".to_string(),
            }],
            projects: vec![Project {
                id: None,
                title: "Folio".to_string(),
                tech: vec!["Rust".to_string()],
                img_src: String::new(),
            }],
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["aboutMe"], "hello");
        assert_eq!(value["education"]["university"], "ITB");
        assert_eq!(value["tools"][0]["icon"], "/assets/icon/git.png");
        assert_eq!(value["projects"][0]["imgSrc"], "");
        // Unpersisted items carry no id on the wire.
        assert!(value["projects"][0].get("id").is_none());
    }

    #[test]
    fn document_deserializes_with_missing_fields() {
        let doc: PortfolioDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc.about_me, "");
        assert_eq!(doc.education, Education::default());
        assert!(doc.tools.is_empty());
        assert!(doc.projects.is_empty());
    }

    #[test]
    fn github_stats_shape() {
        let stats = GithubStats {
            public_repos: 12,
            commits: 340,
            pull_requests: 71,
            issues: 3,
            contributed_to: 7,
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["publicRepos"], 12);
        assert_eq!(value["contributedTo"], 7);
    }
}
