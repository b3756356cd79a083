//! Service-wide language catalogue.

use serde_json::Value;
use tracing::instrument;

use crate::client::TmsClient;
use crate::error::ApiError;
use crate::request::Params;

impl TmsClient {
    /// Lists every language the service supports. Not project-scoped.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on service, transport or decode failure.
    #[instrument(skip_all)]
    pub async fn supported_languages(&self) -> Result<Value, ApiError> {
        self.get_json("supported-languages", &Params::new()).await
    }
}
