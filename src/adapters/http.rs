use crate::config::toml_config::RepositoryConfig;
use crate::domain::model::{CustomerDraft, SavedCustomer};
use crate::domain::ports::CustomerRepository;
use crate::utils::error::{Result, SaveError};
use crate::utils::validation;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

/// Customer repository backed by the platform's REST API.
///
/// Each draft is sent as `POST <endpoint>` with a
/// `{"customer": {"firstname", "lastname", "email"}}` body.
pub struct HttpCustomerRepository {
    client: Client,
    endpoint: String,
    token: Option<String>,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl HttpCustomerRepository {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            token: None,
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn from_config(config: &RepositoryConfig) -> Result<Self> {
        let endpoint = validation::required("repository.endpoint", &config.endpoint)?;

        let mut repository = Self::new(endpoint.as_str());
        repository.token = config.token.clone();
        repository.headers = config.headers.clone().unwrap_or_default();
        repository.timeout = config.timeout_seconds.map(Duration::from_secs);
        Ok(repository)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CustomerRepository for HttpCustomerRepository {
    async fn save(&self, draft: &CustomerDraft) -> std::result::Result<SavedCustomer, SaveError> {
        let body = json!({
            "customer": {
                "firstname": draft.first_name,
                "lastname": draft.last_name,
                "email": draft.email,
            }
        });

        // 構建請求
        let mut request = self.client.post(&self.endpoint).json(&body);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        // 添加自定義標頭
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("POST {} for {}", self.endpoint, draft.email);
        let response = request.send().await.map_err(|e| SaveError::Other(e.into()))?;
        let status = response.status();
        tracing::debug!("Repository response status: {}", status);

        // 回應內容不一定是 JSON
        let text = response.text().await.map_err(|e| SaveError::Other(e.into()))?;
        let payload: Option<Value> = serde_json::from_str(&text).ok();

        if status.is_success() {
            let id = payload
                .as_ref()
                .and_then(|p| p.get("id"))
                .and_then(Value::as_u64);
            return Ok(SavedCustomer {
                id,
                email: draft.email.clone(),
            });
        }

        let message = payload
            .as_ref()
            .and_then(render_message)
            .unwrap_or_else(|| status_line(status));
        Err(classify(status, message))
    }
}

fn status_line(status: StatusCode) -> String {
    format!(
        "Repository responded with {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

fn classify(status: StatusCode, message: String) -> SaveError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => SaveError::Input(message),
        StatusCode::CONFLICT => SaveError::State(message),
        s if s.is_client_error() => SaveError::Localized(message),
        s => SaveError::Other(format!("{} ({})", message, s.as_u16()).into()),
    }
}

/// Error text from a `{"message": ..., "parameters": ...}` body, with `%1` /
/// `%name` placeholders filled in.
fn render_message(payload: &Value) -> Option<String> {
    let mut message = payload.get("message")?.as_str()?.to_string();

    match payload.get("parameters") {
        Some(Value::Array(values)) => {
            // 從後往前替換，避免 %1 吃掉 %10
            for (index, value) in values.iter().enumerate().rev() {
                message = message.replace(&format!("%{}", index + 1), &plain(value));
            }
        }
        Some(Value::Object(values)) => {
            for (name, value) in values {
                message = message.replace(&format!("%{}", name), &plain(value));
            }
        }
        _ => {}
    }

    Some(message)
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
