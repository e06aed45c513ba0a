//! [`PaymentTarget`]: the service under test, and its HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use common::protocol::{Account, Transaction};
use common::TargetError;
use http_body_util::{BodyExt, Full};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method, Request, StatusCode, Uri,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

const APPLICATION_JSON: &str = "application/json";

/// The payment service endpoints exercised by the simulation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentTarget: Send + Sync {
    /// `POST /account/{account}/create/{balance}`.
    async fn create_account(&self, account: &Account) -> Result<(), TargetError>;

    /// `POST /transaction/{id}/process` with the transaction as JSON body.
    async fn process_transaction(&self, tx: &Transaction) -> Result<(), TargetError>;
}

/// [`PaymentTarget`] over plain HTTP/1.1.
///
/// A request succeeds only on `200 OK`. The response body is drained so the
/// pooled connection can be reused.
pub struct HttpTarget {
    client: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
    timeout: Duration,
}

impl HttpTarget {
    /// Build a client for the service rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        }
    }

    async fn post(&self, path: &str, body: Bytes) -> Result<(), TargetError> {
        let uri = format!("{}{}", self.base_url, path)
            .parse::<Uri>()
            .map_err(|e| TargetError::InvalidRequest(e.to_string()))?;
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(Full::new(body))
            .map_err(|e| TargetError::InvalidRequest(e.to_string()))?;

        let status = tokio::time::timeout(self.timeout, self.exchange(req))
            .await
            .map_err(|_| TargetError::Transport("request timed out".into()))??;

        if status != StatusCode::OK {
            return Err(TargetError::UnexpectedStatus(status.as_u16()));
        }
        Ok(())
    }

    async fn exchange(&self, req: Request<Full<Bytes>>) -> Result<StatusCode, TargetError> {
        let resp = self
            .client
            .request(req)
            .await
            .map_err(|e| TargetError::Transport(e.to_string()))?;
        let status = resp.status();
        resp.into_body()
            .collect()
            .await
            .map_err(|e| TargetError::Transport(e.to_string()))?;
        Ok(status)
    }
}

#[async_trait]
impl PaymentTarget for HttpTarget {
    async fn create_account(&self, account: &Account) -> Result<(), TargetError> {
        self.post(&account.create_path(), Bytes::new()).await
    }

    async fn process_transaction(&self, tx: &Transaction) -> Result<(), TargetError> {
        let body = serde_json::to_vec(&tx.to_request())
            .map_err(|e| TargetError::InvalidRequest(e.to_string()))?;
        self.post(&tx.process_path(), Bytes::from(body)).await
    }
}
