use crate::health::Checker;
use crate::prelude::*;
use serde::Serialize;

/// Client for the page renderer
///
/// Page models are posted as JSON to `{base_url}/{page}` and the rendered HTML
/// comes back as the response body.
#[derive(Debug, Clone)]
pub struct RendererClient {
    http: reqwest::Client,
    base_url: String,
}

impl RendererClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn render<T: Serialize>(&self, page: &str, model: &T) -> Result<String, Error> {
        let url = f!("{}/{}", self.base_url, page);

        let response = self
            .http
            .post(&url)
            .json(model)
            .send()
            .await
            .map_err(|e| Error::Renderer(f!("failed to call {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Renderer(f!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Renderer(f!("failed to read rendered page: {}", e)))
    }

    pub fn checker(&self) -> Checker {
        Checker::new(self.http.clone(), &self.base_url)
    }
}
