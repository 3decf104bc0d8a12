//! Travis-CI API v3 DTOs

use serde::{Deserialize, Serialize};

/// Standard representation of a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravisRepository {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// One page of a repository's build history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPage {
    pub builds: Vec<TravisBuild>,
    #[serde(rename = "@pagination")]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravisBuild {
    pub id: u64,
    #[serde(default)]
    pub number: Option<String>,
    /// Build state, e.g. "passed", "failed", "errored", "canceled"
    pub state: String,
    /// Absent when the build is not linked to a commit
    #[serde(default)]
    pub commit: Option<TravisCommit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravisCommit {
    pub sha: String,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
    #[serde(default)]
    pub count: u32,
    pub is_last: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_page() {
        let json = r#"{
            "@type": "builds",
            "@pagination": {
                "limit": 2, "offset": 0, "count": 3, "is_first": true, "is_last": false,
                "next": {"@href": "/repo/org%2Frepo/builds?limit=2&offset=2", "offset": 2, "limit": 2}
            },
            "builds": [
                {"id": 11, "number": "2", "state": "passed",
                 "commit": {"id": 5, "sha": "abc123", "ref": "refs/heads/master"}},
                {"id": 10, "number": "1", "state": "errored", "commit": null}
            ]
        }"#;

        let page: BuildPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.builds.len(), 2);
        assert!(!page.pagination.is_last);
        assert_eq!(page.pagination.count, 3);

        let first = &page.builds[0];
        assert_eq!(first.state, "passed");
        assert_eq!(first.commit.as_ref().map(|c| c.sha.as_str()), Some("abc123"));
        assert!(page.builds[1].commit.is_none());
    }

    #[test]
    fn test_repository() {
        let json = r#"{"@type": "repository", "id": 42, "name": "repo", "slug": "org/repo", "active": true}"#;
        let repo: TravisRepository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.slug, "org/repo");
        assert_eq!(repo.active, Some(true));
    }
}
