//! Bounded body capture.
//!
//! Reads chunks until the cap is reached or the stream ends, whichever comes
//! first. Bytes past the cap are never buffered.

use axum::body::Body;
use bytes::Bytes;
use futures_util::StreamExt;
use usagehook_core::{
    error::{Result, UsageHookError},
    payload::PayloadBuffer,
};

pub async fn read_bounded(body: Body, limit: usize) -> Result<Bytes> {
    let mut stream = body.into_data_stream();
    let mut buf = PayloadBuffer::new(limit);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| UsageHookError::PayloadRead(e.to_string()))?;
        if buf.push(&chunk) {
            break;
        }
    }

    buf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stops_at_limit() {
        let body = Body::from(vec![b'a'; 5000]);
        let got = read_bounded(body, 2048).await.unwrap();
        assert_eq!(got.len(), 2048);
    }

    #[tokio::test]
    async fn collects_chunked_body() {
        let chunks = futures_util::stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"{\"model\":")),
            Ok(Bytes::from_static(b"\"x\"}")),
        ]);
        let got = read_bounded(Body::from_stream(chunks), 2048).await.unwrap();
        assert_eq!(&got[..], b"{\"model\":\"x\"}");
    }

    #[tokio::test]
    async fn empty_body_fails() {
        let err = read_bounded(Body::empty(), 2048).await.unwrap_err();
        assert!(matches!(err, UsageHookError::PayloadRead(_)));
    }

    #[tokio::test]
    async fn stream_error_fails() {
        let chunks = futures_util::stream::iter(vec![
            Ok(Bytes::from_static(b"{\"mo")),
            Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
        ]);
        let err = read_bounded(Body::from_stream(chunks), 2048).await.unwrap_err();
        assert!(matches!(err, UsageHookError::PayloadRead(_)));
    }
}
