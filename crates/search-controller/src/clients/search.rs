use crate::health::Checker;
use crate::prelude::*;
use search_controller_core::model::Response;
use search_controller_core::query::QueryParams;

/// Client for the search API
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run a search with an already augmented API query
    pub async fn get_search(&self, api_query: &QueryParams) -> Result<Response, Error> {
        let url = f!("{}/search", self.base_url);

        log::debug!("calling search API: {}?{}", url, api_query.to_query_string());

        let response = self
            .http
            .get(&url)
            .query(api_query.pairs())
            .send()
            .await
            .map_err(|e| Error::SearchApi(f!("failed to call {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::SearchApi(f!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .json::<Response>()
            .await
            .map_err(|e| Error::SearchApi(f!("failed to parse search response: {}", e)))
    }

    pub fn checker(&self) -> Checker {
        Checker::new(self.http.clone(), &self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_response() -> serde_json::Value {
        serde_json::from_str(include_str!("../../../core/test_data/mock_response.json")).unwrap()
    }

    #[tokio::test]
    async fn test_get_search_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "housing"))
            .and(query_param("content_type", "article,article_download"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_response()))
            .expect(1)
            .mount(&server)
            .await;

        let client = SearchClient::new(&server.uri());
        let api_query: QueryParams = [
            ("q", "housing"),
            ("content_type", "article,article_download"),
        ]
        .into_iter()
        .collect();

        let response = client.get_search(&api_query).await.unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.items[0].uri, "/uri1/housing/articles/uri2/2015-02-17");
    }

    #[tokio::test]
    async fn test_get_search_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SearchClient::new(&server.uri());
        let err = client.get_search(&QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, Error::SearchApi(_)));
    }

    #[tokio::test]
    async fn test_get_search_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = SearchClient::new(&server.uri());
        let err = client.get_search(&QueryParams::new()).await.unwrap_err();
        assert!(err.to_string().contains("failed to parse search response"));
    }

    #[test]
    fn test_checker_targets_health_endpoint() {
        let client = SearchClient::new("http://localhost:23900/");
        assert_eq!(client.checker().url(), "http://localhost:23900/health");
    }
}
