//! Bounded payload capture and decoding.
//!
//! Only the first `limit` bytes of a body are kept; anything past the cap is
//! dropped on the floor rather than rejected. A truncated document then fails
//! to decode and is reported as a malformed payload.

use bytes::{Bytes, BytesMut};

use crate::error::{Result, UsageHookError};
use crate::record::UsagePayload;

/// Default number of body bytes read per request.
pub const MAX_PAYLOAD_BYTES: usize = 2 * 1024;

/// Accumulates body chunks up to a fixed cap.
#[derive(Debug)]
pub struct PayloadBuffer {
    buf: BytesMut,
    limit: usize,
}

impl PayloadBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(limit),
            limit,
        }
    }

    /// Append a chunk. Returns `true` once the cap is reached and further
    /// chunks would be discarded.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        let room = self.limit.saturating_sub(self.buf.len());
        let take = room.min(chunk.len());
        self.buf.extend_from_slice(&chunk[..take]);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() >= self.limit
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finish capturing. An empty body is a read error.
    pub fn finish(self) -> Result<Bytes> {
        if self.buf.is_empty() {
            return Err(UsageHookError::PayloadRead("empty body".into()));
        }
        Ok(self.buf.freeze())
    }
}

/// Decode a captured body into a payload.
///
/// Unknown fields are ignored and missing ones default to empty; anything
/// that is not a JSON object of the right field types is rejected with the
/// decoder's diagnostic.
pub fn parse_payload(data: &[u8]) -> Result<UsagePayload> {
    tracing::debug!(data = %String::from_utf8_lossy(data), "parsing usage payload");
    serde_json::from_slice(data).map_err(|e| UsageHookError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn buffer_truncates_at_limit() {
        let mut b = PayloadBuffer::new(8);
        assert!(!b.push(b"abcde"));
        assert!(b.push(b"fghijk"));
        assert!(b.push(b"zzz"));
        assert_eq!(b.len(), 8);
        assert_eq!(&b.finish().unwrap()[..], b"abcdefgh");
    }

    #[test]
    fn empty_body_is_read_error() {
        let b = PayloadBuffer::new(MAX_PAYLOAD_BYTES);
        assert!(b.is_empty());
        let err = b.finish().unwrap_err();
        assert!(matches!(err, UsageHookError::PayloadRead(_)));
        assert_eq!(err.client_message(), "Failed to read payload");
    }

    #[test]
    fn rejects_non_objects_and_wrong_types() {
        let cases: [&[u8]; 6] = [
            b"[1,2]",
            b"\"model\"",
            b"42",
            br#"{"model": 7}"#,
            br#"{"eval_count":"x"}"#,
            b"{not json",
        ];
        for bad in cases {
            match parse_payload(bad) {
                Err(UsageHookError::MalformedPayload(diag)) => assert!(!diag.is_empty()),
                other => panic!("expected malformed payload for {:?}, got {other:?}", String::from_utf8_lossy(bad)),
            }
        }
    }

    #[test]
    fn empty_model_is_accepted() {
        let p = parse_payload(b"{}").unwrap();
        assert_eq!(p.model, "");
        assert_eq!(p.metrics, Default::default());
    }

    #[test]
    fn truncated_document_is_malformed() {
        let mut body = br#"{"model":"llama3","user_name":""#.to_vec();
        body.extend(std::iter::repeat(b'x').take(4096));
        body.extend_from_slice(br#""}"#);

        let mut b = PayloadBuffer::new(MAX_PAYLOAD_BYTES);
        b.push(&body);
        let captured = b.finish().unwrap();
        assert_eq!(captured.len(), MAX_PAYLOAD_BYTES);
        assert!(matches!(parse_payload(&captured), Err(UsageHookError::MalformedPayload(_))));
    }
}
