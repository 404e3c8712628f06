//! A live signup server bound to a random port.
//!
//! [`LiveServer`] runs a [`SignupApp`] in a background task so that real HTTP
//! clients (such as [`HttpTransport`](signup_rs_client::HttpTransport)) can
//! reach it.
//!
//! ```rust,no_run
//! use signup_rs_core::Settings;
//! use signup_rs_http::SignupApp;
//! use signup_rs_test::live_server::LiveServer;
//!
//! async fn example() {
//!     let server = LiveServer::start(SignupApp::new(Settings::default())).await;
//!     println!("Server running at {}", server.url());
//!     server.stop().await;
//! }
//! ```

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use signup_rs_http::SignupApp;

/// A running server. Dropping it without [`stop`](Self::stop) aborts the task.
pub struct LiveServer {
    addr: SocketAddr,
    path: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<JoinHandle<()>>,
}

impl LiveServer {
    /// Starts `app` on `127.0.0.1` with an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(app: SignupApp) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().expect("Failed to get local address");
        let path = app.settings().submit_path.clone();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server_handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = app.serve(listener, shutdown).await {
                eprintln!("live server error: {e}");
            }
        });

        Self {
            addr,
            path,
            shutdown_tx: Some(shutdown_tx),
            server_handle: Some(server_handle),
        }
    }

    /// Returns the bound address.
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the URL of the form page and submission action.
    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, self.path)
    }

    /// Shuts the server down and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for LiveServer {
    fn drop(&mut self) {
        if let Some(handle) = self.server_handle.take() {
            handle.abort();
        }
    }
}
