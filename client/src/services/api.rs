// HTTP access to the moving-averages service
use std::future::Future;

use crate::config::ClientSettings;
use crate::error::{ClientError, Result};
use crate::query::MovingAverageQuery;

/// The single call the dashboard makes. Implementations return the raw body of a
/// 2xx answer and `ClientError::Status` for anything else.
pub trait MovingAverageApi: Send + Sync {
    fn get_moving_averages(
        &self,
        query: &MovingAverageQuery,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Clone)]
pub struct HttpMovingAverageApi {
    endpoint_url: String,
    http: reqwest::Client,
}

impl HttpMovingAverageApi {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let endpoint_url = settings.endpoint_url()?;
        let mut builder = reqwest::Client::builder().user_agent(settings.user_agent.clone());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        tracing::info!(
            endpoint = %endpoint_url,
            timeout = ?settings.request_timeout(),
            "Created moving averages client"
        );
        Ok(Self { endpoint_url, http })
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

impl MovingAverageApi for HttpMovingAverageApi {
    async fn get_moving_averages(&self, query: &MovingAverageQuery) -> Result<String> {
        let params = query.params();
        tracing::debug!(url = %self.endpoint_url, ?params, "Requesting moving averages");

        let response = self.http.get(&self.endpoint_url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            // The body is discarded, callers only see the status code.
            tracing::warn!(status = status.as_u16(), "Moving averages request failed");
            return Err(ClientError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
