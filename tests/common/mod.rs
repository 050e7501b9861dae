use std::net::SocketAddr;

use tokio::net::TcpListener;

/// In-process test server: binds an OS-assigned port and serves the real
/// router. The suites in tests/ only exercise paths that terminate before
/// any store access, so no database is required.
pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start() -> Self {
        // Give the identity verifier a project id so malformed tokens are
        // rejected as invalid instead of tripping the not-configured path
        std::env::set_var("IDENTITY_PROJECT_ID", "educircle-test");

        let app = educircle_api::routes::app();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server");
        });

        Self {
            base_url: format!("http://{}", addr),
            addr,
        }
    }
}
