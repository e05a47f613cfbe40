use reqwest::Method;
use serde_json::Value;

use super::{BackendClient, BackendError};

impl BackendClient {
    /// Invokes a named serverless function. A body-less success yields
    /// `Value::Null`.
    pub async fn invoke(
        &self,
        name: &str,
        method: Method,
        body: Option<&Value>,
        access_token: Option<&str>,
    ) -> Result<Value, BackendError> {
        let mut request = self.request(method, &format!("/functions/v1/{name}"), access_token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::parse_json(response).await
    }
}
