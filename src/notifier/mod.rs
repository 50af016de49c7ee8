pub mod message;
pub mod serverchan;

use crate::model::NotifyError;

pub use message::build_message;
pub use serverchan::ServerChanNotifier;

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}
