//! NewsData.io headline retriever

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{check_status, host_of, present, RetrieverError, SignalSource, USER_AGENT};
use crate::model::NewsItem;

/// Maximum headlines kept per company
pub const MAX_NEWS_ITEMS: usize = 5;

const DESCRIPTION_FALLBACK_CHARS: usize = 200;
const UNKNOWN_SOURCE: &str = "Unknown Source";

#[derive(Debug, Deserialize)]
struct NewsDataResponse {
    #[serde(default)]
    results: Option<Vec<NewsDataArticle>>,
}

#[derive(Debug, Default, Deserialize)]
struct NewsDataArticle {
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
    source_icon: Option<String>,
}

impl NewsDataArticle {
    fn into_news_item(self) -> NewsItem {
        let url = self.link.unwrap_or_default();

        let description = present(self.description)
            .or_else(|| {
                present(self.content)
                    .map(|c| c.chars().take(DESCRIPTION_FALLBACK_CHARS).collect())
            })
            .unwrap_or_default();

        let favicon = present(self.source_icon).or_else(|| {
            host_of(&url)
                .map(|host| format!("https://www.google.com/s2/favicons?domain={}&sz=32", host))
        });

        NewsItem {
            title: self.title.unwrap_or_default(),
            description,
            url,
            published_at: self.pub_date.unwrap_or_default(),
            source: present(self.source_id).unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            favicon,
        }
    }
}

/// Retriever for business and technology headlines mentioning a company
pub struct NewsDataRetriever {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NewsDataRetriever {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SignalSource for NewsDataRetriever {
    type Signal = NewsItem;

    fn name(&self) -> &'static str {
        "newsdata"
    }

    async fn fetch(&self, company_name: &str) -> Result<Vec<NewsItem>, RetrieverError> {
        let url = format!("{}/news", self.base_url);
        let query = format!("\"{}\"", company_name);

        tracing::debug!(company = %company_name, url = %url, "Fetching news headlines");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("q", query.as_str()),
                ("language", "en"),
                ("size", "10"),
                ("category", "business,technology"),
            ])
            .send()
            .await?;

        let response = check_status(response).await?;

        let body: NewsDataResponse = response
            .json()
            .await
            .map_err(|e| RetrieverError::ParseError(format!("Invalid NewsData response: {}", e)))?;

        let news: Vec<NewsItem> = body
            .results
            .unwrap_or_default()
            .into_iter()
            .take(MAX_NEWS_ITEMS)
            .map(NewsDataArticle::into_news_item)
            .collect();

        tracing::debug!(company = %company_name, count = news.len(), "Fetched news headlines");

        Ok(news)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn article(i: usize) -> serde_json::Value {
        json!({
            "title": format!("Acme headline {}", i),
            "description": format!("Story {}", i),
            "link": format!("https://news.example.com/{}", i),
            "pubDate": "2024-05-02 09:15:00",
            "source_id": "examplewire",
            "source_icon": "https://news.example.com/icon.png"
        })
    }

    #[test]
    fn test_article_fallbacks() {
        let item = NewsDataArticle {
            title: Some("Acme raises Series B".to_string()),
            description: Some(String::new()),
            content: Some("x".repeat(300)),
            link: Some("https://www.reuters.com/acme".to_string()),
            pub_date: Some("2024-05-02 09:15:00".to_string()),
            source_id: None,
            source_icon: None,
        }
        .into_news_item();

        assert_eq!(item.description.chars().count(), 200);
        assert_eq!(item.source, "Unknown Source");
        assert_eq!(
            item.favicon.as_deref(),
            Some("https://www.google.com/s2/favicons?domain=www.reuters.com&sz=32")
        );
    }

    #[test]
    fn test_article_without_link_has_no_favicon() {
        let item = NewsDataArticle::default().into_news_item();
        assert_eq!(item.url, "");
        assert_eq!(item.description, "");
        assert!(item.favicon.is_none());
    }

    #[tokio::test]
    async fn test_fetch_caps_results_and_sends_query() {
        let server = MockServer::start().await;
        let results: Vec<_> = (0..7).map(article).collect();

        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("apikey", "news-key"))
            .and(query_param("q", "\"Acme\""))
            .and(query_param("category", "business,technology"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "results": results
            })))
            .expect(1)
            .mount(&server)
            .await;

        let retriever = NewsDataRetriever::new("news-key".to_string(), &server.uri());
        let news = retriever.fetch("Acme").await.unwrap();

        assert_eq!(news.len(), MAX_NEWS_ITEMS);
        assert_eq!(news[0].title, "Acme headline 0");
        assert_eq!(news[0].source, "examplewire");
        assert_eq!(news[0].favicon.as_deref(), Some("https://news.example.com/icon.png"));
    }

    #[tokio::test]
    async fn test_fetch_null_results_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": null })))
            .mount(&server)
            .await;

        let retriever = NewsDataRetriever::new("news-key".to_string(), &server.uri());
        assert!(retriever.fetch("Acme").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_reports_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let retriever = NewsDataRetriever::new("wrong".to_string(), &server.uri());
        let result = retriever.fetch("Acme").await;

        assert!(matches!(
            result,
            Err(RetrieverError::UnexpectedStatus { status: 401, .. })
        ));
    }
}
