use serde::{Deserialize, Serialize};

use crate::Result;

/// Value of `status` in a successful provider response.
pub const SUCCESS_STATUS: &str = "success";

const NO_TITLE: &str = "Sin título";
const NO_DESCRIPTION: &str = "Sin descripción";

/// One news item as returned by the provider. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "creator")]
    pub authors: Option<Vec<String>>,
    #[serde(default, rename = "pubDate")]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Article {
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(NO_TITLE)
    }

    pub fn display_description(&self) -> &str {
        non_blank(self.description.as_deref()).unwrap_or(NO_DESCRIPTION)
    }

    pub fn first_author(&self) -> Option<&str> {
        self.authors
            .as_ref()
            .and_then(|authors| authors.iter().map(String::as_str).find(|a| !a.trim().is_empty()))
    }

    pub fn published(&self) -> Option<&str> {
        non_blank(self.published_at.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Envelope of `GET /api/1/latest`.
///
/// `results` stays raw until [`NewsResponse::articles`] because the provider
/// puts an error object there when `status` is not `success`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "totalResults", skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub results: Option<serde_json::Value>,
}

impl NewsResponse {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Decodes `results` as a list of articles.
    ///
    /// Returns `Ok(None)` when `results` is absent, null or not an array.
    pub fn articles(&self) -> Result<Option<Vec<Article>>> {
        match &self.results {
            Some(value @ serde_json::Value::Array(_)) => {
                Ok(Some(Vec::<Article>::deserialize(value)?))
            }
            _ => Ok(None),
        }
    }
}

/// What the result region of the screen shows. Exactly one at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SearchResult {
    Results(Vec<Article>),
    Empty,
    Error(String),
    Loading,
    NoConnection,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_decodes_provider_fields() {
        let article: Article = serde_json::from_value(json!({
            "article_id": "abc",
            "title": "Elecciones",
            "link": "https://example.com/a",
            "creator": ["Ana", "Luis"],
            "description": null,
            "pubDate": "2024-05-01 10:00:00",
            "source_id": "eltiempo"
        }))
        .unwrap();

        assert_eq!(article.display_title(), "Elecciones");
        assert_eq!(article.display_description(), "Sin descripción");
        assert_eq!(article.first_author(), Some("Ana"));
        assert_eq!(article.published(), Some("2024-05-01 10:00:00"));
        assert_eq!(article.source_id.as_deref(), Some("eltiempo"));
    }

    #[test]
    fn test_empty_article_uses_placeholders() {
        let article: Article = serde_json::from_value(json!({})).unwrap();
        assert_eq!(article.display_title(), "Sin título");
        assert_eq!(article.display_description(), "Sin descripción");
        assert_eq!(article.first_author(), None);
        assert_eq!(article.published(), None);

        let blank = Article {
            title: Some("  ".to_string()),
            authors: Some(vec![String::new()]),
            ..Article::default()
        };
        assert_eq!(blank.display_title(), "Sin título");
        assert_eq!(blank.first_author(), None);
    }

    #[test]
    fn test_response_articles() {
        let response: NewsResponse = serde_json::from_value(json!({
            "status": "success",
            "totalResults": 2,
            "results": [{"title": "a"}, {"title": "b"}]
        }))
        .unwrap();
        assert!(response.is_success());
        let articles = response.articles().unwrap().unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].title.as_deref(), Some("b"));
    }

    #[test]
    fn test_error_envelope_has_no_articles() {
        let response: NewsResponse = serde_json::from_value(json!({
            "status": "error",
            "results": {"message": "API key invalid", "code": "Unauthorized"}
        }))
        .unwrap();
        assert!(!response.is_success());
        assert_eq!(response.articles().unwrap(), None);

        let missing: NewsResponse = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert_eq!(missing.articles().unwrap(), None);
    }

    #[test]
    fn test_malformed_article_list_is_an_error() {
        let response: NewsResponse = serde_json::from_value(json!({
            "status": "success",
            "results": [{"title": 42}]
        }))
        .unwrap();
        assert!(response.articles().is_err());
    }
}
