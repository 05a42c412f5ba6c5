//! Loopback HTTP server that receives the OAuth redirect

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use daybook_domain::{DaybookError, Result};
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, error};

const CALLBACK_PATH: &str = "/callback";

/// Authorization response captured from the browser redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: String,
    pub state: String,
}

type CallbackResult = std::result::Result<CallbackParams, String>;
type CallbackSlot = Arc<Mutex<Option<oneshot::Sender<CallbackResult>>>>;

/// Serves `/callback` on an ephemeral 127.0.0.1 port until the first
/// redirect arrives or the server is dropped.
pub struct CallbackServer {
    port: u16,
    receiver: Option<oneshot::Receiver<CallbackResult>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl CallbackServer {
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|err| DaybookError::Transport(format!("failed to bind OAuth loopback server: {err}")))?;

        let port = listener
            .local_addr()
            .map_err(|err| DaybookError::Transport(format!("failed to determine port: {err}")))?
            .port();

        let (result_tx, result_rx) = oneshot::channel();
        let slot: CallbackSlot = Arc::new(Mutex::new(Some(result_tx)));

        let app = Router::new().route(
            CALLBACK_PATH,
            get(move |query: Query<HashMap<String, String>>| handle_callback(query, slot.clone())),
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                error!("OAuth callback server error: {}", err);
            }
        });

        debug!(port, "OAuth loopback server listening");

        Ok(Self { port, receiver: Some(result_rx), shutdown_tx: Some(shutdown_tx) })
    }

    /// Redirect URI registered with the authorization request.
    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}{}", self.port, CALLBACK_PATH)
    }

    /// Wait for the browser redirect.
    ///
    /// # Errors
    /// `Auth` when the provider reported an error or the wait timed out.
    pub async fn wait(&mut self, timeout: Duration) -> Result<CallbackParams> {
        let receiver = self
            .receiver
            .take()
            .ok_or_else(|| DaybookError::Internal("OAuth callback already consumed".into()))?;

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(Ok(params))) => Ok(params),
            Ok(Ok(Err(reason))) => Err(DaybookError::Auth(format!("authorization failed: {reason}"))),
            Ok(Err(_)) => Err(DaybookError::Internal("OAuth callback server stopped unexpectedly".into())),
            Err(_) => Err(DaybookError::Auth("timed out waiting for the authorization callback".into())),
        }
    }
}

/// In-flight responses (the confirmation page) still complete after drop.
impl Drop for CallbackServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle_callback(Query(params): Query<HashMap<String, String>>, slot: CallbackSlot) -> Html<&'static str> {
    let outcome = match (params.get("code"), params.get("state"), params.get("error")) {
        (_, _, Some(error)) => Err(error.clone()),
        (Some(code), Some(state), None) => Ok(CallbackParams { code: code.clone(), state: state.clone() }),
        _ => Err("callback is missing code or state".to_string()),
    };
    let succeeded = outcome.is_ok();

    if let Some(tx) = slot.lock().take() {
        let _ = tx.send(outcome);
    }

    if succeeded {
        Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Signed in to Daybook</title></head>
<body><h1>Sign-in complete</h1><p>You can close this window and return to Daybook.</p></body>
</html>"#,
        )
    } else {
        Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Sign-in failed</title></head>
<body><h1>Sign-in failed</h1><p>Return to Daybook and try again.</p></body>
</html>"#,
        )
    }
}
