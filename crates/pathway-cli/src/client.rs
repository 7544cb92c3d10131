use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use pathway_common::{
    Envelope, HealthStatus, ProcessRequest, ProcessResult, QueryRequest, QueryResult,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to connect to pathway service at {url}; check that it is running and PATHWAY_API_URL is correct")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Pathway API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub struct PathwayClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl PathwayClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            http,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = self
            .auth(builder)
            .send()
            .await
            .map_err(|source| {
                if source.is_connect() || source.is_timeout() {
                    ClientError::Connect {
                        url: self.base_url.clone(),
                        source,
                    }
                } else {
                    ClientError::Http(source)
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.json().await?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.send(self.http.get(self.url("/health"))).await
    }

    pub async fn process(&self, req: &ProcessRequest) -> Result<ProcessResult, ClientError> {
        let env: Envelope<ProcessResult> = self.post("/process", req).await?;
        Ok(env.result)
    }

    pub async fn query(&self, req: &QueryRequest) -> Result<QueryResult, ClientError> {
        let env: Envelope<QueryResult> = self.post("/query", req).await?;
        Ok(env.result)
    }
}
