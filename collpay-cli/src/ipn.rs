//! Local IPN listener for development.
//!
//! Prints every callback it receives. Nothing is verified: the payload is
//! decoded only to show what the SDK would make of it.

use std::net::SocketAddr;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use collpay_types::Transaction;

pub async fn listen(port: u16) -> anyhow::Result<()> {
    let app = axum::Router::new().route("/ipn", post(handle_ipn));
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    tracing::info!("Listening for IPN callbacks on http://{}/ipn", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_ipn(headers: HeaderMap, body: String) -> StatusCode {
    println!("POST /ipn HTTP/1.1");
    for (name, value) in &headers {
        println!("{}: {:?}", name, value);
    }
    println!();
    println!("{}", body);

    match Transaction::from_notification(body.as_bytes()) {
        Ok(tx) => {
            let status = tx
                .status
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            tracing::info!(
                transaction_id = %tx.id,
                event = %tx.webhook_event,
                %status,
                payment = tx.is_payment_event(),
                "Decoded notification"
            );
        }
        Err(e) => tracing::warn!(error = %e, "Notification body is not a transaction"),
    }
    println!("----------------------------------------");
    StatusCode::OK
}
