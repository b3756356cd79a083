//! User-Agent string sent with every request.

/// Product token for User-Agent identification.
const PRODUCT: &str = "tms-client";

/// Default User-Agent identifying the client library and its version.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (rust; reqwest)")
}
