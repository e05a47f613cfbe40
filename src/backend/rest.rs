use reqwest::Method;
use serde_json::Value;

use super::{BackendClient, BackendError};

impl BackendClient {
    /// Reads rows from a table through the query surface.
    ///
    /// `params` are passed through untouched (`select`, filters such as
    /// `active=eq.true`, `order`). Rows come back as raw JSON; callers run
    /// them through their own parse boundary.
    pub async fn select(
        &self,
        table: &str,
        params: &[(&str, String)],
        access_token: Option<&str>,
    ) -> Result<Vec<Value>, BackendError> {
        let response = self
            .request(Method::GET, &format!("/rest/v1/{table}"), access_token)
            .query(params)
            .send()
            .await?;

        match Self::parse_json::<Value>(response).await? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(BackendError::Decode(format!(
                "expected an array of rows from {table}, got {other}"
            ))),
        }
    }
}
