pub mod sender;

use crate::model::NotifyError;
use crate::notifier::Notifier;
use reqwest::Client;
use std::time::Duration;

/// Pushes messages through a ServerChan-style webhook (`{base_url}/{key}.send`).
pub struct ServerChanNotifier {
    base_url: String,
    key: String,
    client: Client,
    timeout: Duration,
}

impl ServerChanNotifier {
    pub fn new(base_url: impl Into<String>, key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            key: key.into(),
            client: Client::new(),
            timeout,
        }
    }

    fn send_url(&self) -> String {
        format!("{}/{}.send", self.base_url.trim_end_matches('/'), self.key)
    }
}

#[async_trait::async_trait]
impl Notifier for ServerChanNotifier {
    async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        sender::send_message(self, title, body).await
    }
}
