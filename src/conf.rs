//! Defines configuration as read from the environment, and the
//! shared AWS client configuration loader.

use aws_config::from_env;
use serde::Deserialize;
use std::env;

/// The example handler forwards accepted order events to a queue. Its
/// configuration must be given as environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The URL of the queue that receives accepted order events, to
    /// trigger user notification emails.
    pub user_email_queue_url: String,
}

/// Load the AWS service configuration, honoring an endpoint override
/// for local emulators.
pub async fn aws_sdk_config() -> aws_config::SdkConfig {
    let endpoint_url_var = env::var("AWS_ENDPOINT_URL");
    if let Ok(endpoint_url) = endpoint_url_var {
        from_env()
            .endpoint_url(
                if endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://") {
                    endpoint_url
                } else {
                    format!("https://{}", endpoint_url)
                },
            )
            .region("us-east-1") // should be OK since the endpoint was overridden
            .load()
    } else {
        from_env().load()
    }
    .await
}
