//! IPC protocol for feeding events to a handler process.
//!
//! Events and responses travel as length-prefixed JSON over any byte stream
//! (stdin/stdout in practice): a 4-byte big-endian length followed by that
//! many bytes of JSON.

use crate::{HandlerError, Response};
use serde_json::Value;
use std::io::{ErrorKind, Read, Write};

/// Largest frame accepted, matching the synchronous Lambda payload limit.
pub const MAX_FRAME_BYTES: usize = 6 * 1024 * 1024;

/// Read one raw frame.
///
/// Returns `Ok(None)` on a clean end of stream (no bytes of a new frame).
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>, HandlerError> {
    // Read length prefix (4 bytes, big-endian)
    let mut len_buf = [0u8; 4];
    let mut filled = 0;
    while filled < len_buf.len() {
        match reader.read(&mut len_buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(HandlerError::IpcError("Truncated length prefix".into())),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(HandlerError::IpcError(format!("Failed to read length prefix: {}", e)))
            }
        }
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_FRAME_BYTES {
        return Err(HandlerError::IpcError(format!(
            "Frame of {} bytes exceeds limit of {} bytes",
            len, MAX_FRAME_BYTES
        )));
    }

    let mut payload = vec![0u8; len];
    reader
        .read_exact(&mut payload)
        .map_err(|e| HandlerError::IpcError(format!("Failed to read payload: {}", e)))?;

    Ok(Some(payload))
}

/// Write one raw frame and flush.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<(), HandlerError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| HandlerError::IpcError("Payload too large to frame".into()))?;

    writer.write_all(&len.to_be_bytes())
        .map_err(|e| HandlerError::IpcError(format!("Failed to write length: {}", e)))?;

    writer.write_all(payload)
        .map_err(|e| HandlerError::IpcError(format!("Failed to write payload: {}", e)))?;

    writer.flush()
        .map_err(|e| HandlerError::IpcError(format!("Failed to flush: {}", e)))?;

    Ok(())
}

/// Read the next event.
///
/// A frame that is not valid JSON yields [`HandlerError::MalformedEvent`];
/// the stream itself is still usable afterwards. Any other error means the
/// stream is broken.
pub fn read_event<R: Read>(reader: &mut R) -> Result<Option<Value>, HandlerError> {
    match read_frame(reader)? {
        Some(payload) => serde_json::from_slice(&payload)
            .map(Some)
            .map_err(|e| HandlerError::MalformedEvent(format!("Failed to parse event: {}", e))),
        None => Ok(None),
    }
}

/// Send a response envelope.
pub fn send_response<W: Write>(writer: &mut W, response: &Response) -> Result<(), HandlerError> {
    let payload = serde_json::to_vec(response)?;
    write_frame(writer, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn framed(payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        write_frame(&mut buf, payload).unwrap();
        buf
    }

    #[test]
    fn test_frame_layout() {
        let buf = framed(b"{}");
        assert_eq!(buf, vec![0, 0, 0, 2, b'{', b'}']);
    }

    #[test]
    fn test_read_events_until_eof() {
        let mut input = framed(br#"{"httpMethod":"GET"}"#);
        input.extend(framed(br#"{"httpMethod":"POST"}"#));
        let mut reader = Cursor::new(input);

        assert_eq!(read_event(&mut reader).unwrap(), Some(json!({"httpMethod": "GET"})));
        assert_eq!(read_event(&mut reader).unwrap(), Some(json!({"httpMethod": "POST"})));
        assert_eq!(read_event(&mut reader).unwrap(), None);
    }

    #[test]
    fn test_malformed_event_keeps_stream_aligned() {
        let mut input = framed(b"{nope");
        input.extend(framed(b"{}"));
        let mut reader = Cursor::new(input);

        let err = read_event(&mut reader).unwrap_err();
        assert!(matches!(err, HandlerError::MalformedEvent(_)));
        assert_eq!(read_event(&mut reader).unwrap(), Some(json!({})));
    }

    #[test]
    fn test_truncated_prefix_is_error() {
        let mut reader = Cursor::new(vec![0, 0]);
        assert!(matches!(read_frame(&mut reader), Err(HandlerError::IpcError(_))));
    }

    #[test]
    fn test_truncated_payload_is_error() {
        let mut reader = Cursor::new(vec![0, 0, 0, 10, b'{']);
        assert!(matches!(read_frame(&mut reader), Err(HandlerError::IpcError(_))));
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let len = (MAX_FRAME_BYTES as u32 + 1).to_be_bytes();
        let mut reader = Cursor::new(len.to_vec());
        assert!(matches!(read_frame(&mut reader), Err(HandlerError::IpcError(_))));
    }

    #[test]
    fn test_send_response_writes_envelope() {
        let mut out = Vec::new();
        send_response(&mut out, &Response::ok(json!({"ok": true}))).unwrap();

        let mut reader = Cursor::new(out);
        let payload = read_frame(&mut reader).unwrap().unwrap();
        let envelope: Response = serde_json::from_slice(&payload).unwrap();
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.body_json().unwrap(), json!({"ok": true}));
    }
}
