//! Mock servers for sandboxes that may forbid binding localhost.
//!
//! When binding fails the test is skipped, unless `TMS_REQUIRE_SOCKET_TESTS`
//! is set to a truthy value, in which case it fails.

use std::net::{Ipv4Addr, TcpListener};

use wiremock::MockServer;

const REQUIRE_ENV: &str = "TMS_REQUIRE_SOCKET_TESTS";

fn sockets_required() -> bool {
    std::env::var(REQUIRE_ENV).is_ok_and(|value| {
        ["1", "true", "yes"]
            .iter()
            .any(|truthy| value.eq_ignore_ascii_case(truthy))
    })
}

fn localhost_bindable() -> Result<(), std::io::Error> {
    TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).map(drop)
}

fn skip_or_panic(e: &std::io::Error) {
    if sockets_required() {
        panic!("[mock-server] cannot bind 127.0.0.1 ({e}) and {REQUIRE_ENV} is set");
    }
    eprintln!("[mock-server] cannot bind 127.0.0.1 ({e}); skipping. Set {REQUIRE_ENV}=1 to fail instead.");
}

/// Starts a wiremock server, or returns `None` when the sandbox forbids it.
///
/// # Panics
///
/// Panics instead of skipping when `TMS_REQUIRE_SOCKET_TESTS` is truthy.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    match localhost_bindable() {
        Ok(()) => Some(MockServer::start().await),
        Err(e) => {
            skip_or_panic(&e);
            None
        }
    }
}

/// Binds a raw listener for hand-written HTTP responses, with the same skip
/// rules as [`start_mock_server_or_skip`].
#[allow(dead_code)]
pub async fn bind_listener_or_skip() -> Option<tokio::net::TcpListener> {
    match tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await {
        Ok(listener) => Some(listener),
        Err(e) => {
            skip_or_panic(&e);
            None
        }
    }
}
