// Chunked NDJSON streaming of notifications
use crate::application::notifier::Notification;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::{BufMut, Bytes, BytesMut};
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

/// Create a chunked response with one JSON document per line.
pub fn ndjson_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = Notification> + Send + 'static,
{
    let byte_stream = stream.map(serialize_line);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(byte_stream))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn serialize_line(notification: Notification) -> Result<Bytes, serde_json::Error> {
    let json = serde_json::to_vec(&notification)?;
    let mut line = BytesMut::with_capacity(json.len() + 1);
    line.put_slice(&json);
    line.put_u8(b'\n');
    Ok(line.freeze())
}

/// Adapt a broadcast subscription into a stream, skipping messages a slow
/// client lagged behind on.
pub fn notifications_from_receiver(
    rx: broadcast::Receiver<Notification>,
) -> impl Stream<Item = Notification> + Send + 'static {
    let mut inner = BroadcastStream::new(rx);

    async_stream::stream! {
        while let Some(item) = inner.next().await {
            match item {
                Ok(notification) => yield notification,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!("Notification subscriber lagged, skipped {} messages", skipped);
                }
            }
        }
    }
}

pub fn stream_from_receiver(rx: broadcast::Receiver<Notification>) -> impl IntoResponse {
    match ndjson_stream(notifications_from_receiver(rx)) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_line() {
        let line = serialize_line(Notification::info("Analysis Complete", "done")).unwrap();
        assert_eq!(
            &line[..],
            b"{\"title\":\"Analysis Complete\",\"description\":\"done\",\"variant\":\"default\"}\n"
        );
    }

    #[tokio::test]
    async fn test_stream_skips_lagged_messages() {
        let (tx, rx) = broadcast::channel(2);
        let stream = notifications_from_receiver(rx);

        for i in 0..4 {
            tx.send(Notification::info("n", i.to_string())).unwrap();
        }
        drop(tx);

        let received: Vec<String> = stream.map(|n| n.description).collect().await;
        assert_eq!(received, vec!["2".to_string(), "3".to_string()]);
    }
}
