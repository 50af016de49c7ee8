// notifier/serverchan/sender.rs

use crate::model::NotifyError;
use crate::notifier::serverchan::ServerChanNotifier;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{info, warn};

/// Reply body of the webhook. Older deployments answer without JSON, so every field is optional.
#[derive(Debug, Deserialize)]
struct WebhookReply {
    code: Option<i64>,
    #[serde(default)]
    message: String,
}

/// Posts `title` and the Markdown `body` to the webhook.
pub async fn send_message(
    notifier: &ServerChanNotifier,
    title: &str,
    body: &str,
) -> Result<(), NotifyError> {
    info!("📤 Sending webhook message: {}", title);
    let params = [("title", title), ("desp", body)];
    let response = match timeout(
        notifier.timeout,
        notifier.client.post(notifier.send_url()).form(&params).send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            // reqwest errors carry the URL, which contains the key.
            let e = e.without_url();
            warn!("❌ Webhook send() failed: {}", e);
            return Err(NotifyError::ApiError(format!("Send failed: {}", e)));
        }
        Err(_) => {
            warn!("⏳ Webhook send() timed out");
            return Err(NotifyError::Unreachable);
        }
    };

    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Webhook responded [{}]: {}", status, body);
        return Err(NotifyError::Unreachable);
    }

    if let Ok(WebhookReply { code: Some(code), message }) = serde_json::from_str::<WebhookReply>(&body) {
        if code != 0 {
            warn!("❌ Webhook rejected message [{}]: {}", code, message);
            return Err(NotifyError::Rejected { code, message });
        }
    }

    info!("✅ Webhook response [{}]", status);
    Ok(())
}
