//! Stdio event loop
//!
//! Serves length-prefixed events from stdin until EOF. Logs go to stderr so
//! they never interleave with response frames.

use lambda_echo_sdk::ipc::{read_event, send_response};
use lambda_echo_sdk::HandlerError;
use std::io::{self, Read, Write};

use crate::handler::process_event;

/// Serve events from the process's stdin/stdout.
pub fn run() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let served = serve(stdin.lock(), stdout.lock())?;
    tracing::info!("Input closed after {} events", served);
    Ok(())
}

/// Serve events from `reader`, writing one response frame per event frame.
///
/// Returns the number of frames answered. A malformed event is answered with
/// a 400; a broken input stream ends the loop.
pub fn serve<R: Read, W: Write>(mut reader: R, mut writer: W) -> Result<usize, HandlerError> {
    let mut served = 0;

    loop {
        let response = match read_event(&mut reader) {
            Ok(Some(event)) => process_event(&event),
            Ok(None) => break,
            Err(err @ HandlerError::MalformedEvent(_)) => {
                tracing::warn!("{}", err);
                err.to_response()
            }
            Err(err) => {
                tracing::error!("Failed to read event: {}", err);
                return Err(err);
            }
        };

        if let Err(err) = send_response(&mut writer, &response) {
            tracing::error!("Failed to send response: {}", err);
        }
        served += 1;
    }

    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_echo_sdk::ipc::{read_frame, write_frame};
    use lambda_echo_sdk::Response;
    use serde_json::json;
    use std::io::Cursor;

    fn frames(events: &[&[u8]]) -> Cursor<Vec<u8>> {
        let mut buf = Vec::new();
        for event in events {
            write_frame(&mut buf, event).unwrap();
        }
        Cursor::new(buf)
    }

    fn responses(output: Vec<u8>) -> Vec<Response> {
        let mut reader = Cursor::new(output);
        let mut out = Vec::new();
        while let Some(frame) = read_frame(&mut reader).unwrap() {
            out.push(serde_json::from_slice(&frame).unwrap());
        }
        out
    }

    #[test]
    fn test_serves_each_frame_in_order() {
        let input = frames(&[
            br#"{"httpMethod":"GET","path":"/a"}"#,
            br#"{"httpMethod":"POST","path":"/b","body":"{\"x\":1}"}"#,
            br#"{"httpMethod":"PUT","path":"/c"}"#,
        ]);
        let mut output = Vec::new();

        let served = serve(input, &mut output).unwrap();
        assert_eq!(served, 3);

        let responses = responses(output);
        assert_eq!(responses[0].body_json().unwrap()["path"], "/a");
        assert_eq!(responses[1].body_json().unwrap()["receivedData"], json!({"x": 1}));
        assert_eq!(responses[2].body_json().unwrap()["message"], "Method PUT is supported");
    }

    #[test]
    fn test_malformed_frame_answered_with_400() {
        let input = frames(&[b"not json", br#"{"httpMethod":"GET"}"#]);
        let mut output = Vec::new();

        assert_eq!(serve(input, &mut output).unwrap(), 2);

        let responses = responses(output);
        assert_eq!(responses[0].status_code, 400);
        assert_eq!(responses[1].status_code, 200);
    }

    #[test]
    fn test_empty_input_serves_nothing() {
        let mut output = Vec::new();
        assert_eq!(serve(Cursor::new(Vec::new()), &mut output).unwrap(), 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_truncated_input_is_error() {
        let mut output = Vec::new();
        let result = serve(Cursor::new(vec![0, 0, 0, 9, b'{']), &mut output);
        assert!(matches!(result, Err(HandlerError::IpcError(_))));
    }
}
