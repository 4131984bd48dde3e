//! Promo response types

use bytes::{BufMut, BytesMut};

/// A server response, one line on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `true <code1>,<code2>,...`
    Generated(Vec<String>),

    /// `false`
    Failed,

    /// `SUCCESS: Code <code> used`
    Used(String),

    /// `ERROR: <message>`
    Error(String),

    /// `Goodbye!`
    Goodbye,
}

impl Response {
    pub fn generated(codes: Vec<String>) -> Self {
        Response::Generated(codes)
    }

    pub fn failed() -> Self {
        Response::Failed
    }

    pub fn used(code: impl Into<String>) -> Self {
        Response::Used(code.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error(message.into())
    }

    /// Rejection for a code nobody generated
    pub fn not_found() -> Self {
        Response::Error("Code does not exist".into())
    }

    /// Rejection for a second redemption of the same code
    pub fn already_used() -> Self {
        Response::Error("Code already used".into())
    }

    /// Rejection for an empty code submission
    pub fn code_required() -> Self {
        Response::Error("Code is required".into())
    }

    /// Encode the response to bytes
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::new();
        self.encode_into(&mut buf);
        buf
    }

    /// Encode the response into an existing buffer
    pub fn encode_into(&self, buf: &mut BytesMut) {
        match self {
            Response::Generated(codes) => {
                buf.put_slice(b"true ");
                for (i, code) in codes.iter().enumerate() {
                    if i > 0 {
                        buf.put_slice(b",");
                    }
                    buf.put_slice(code.as_bytes());
                }
                buf.put_slice(b"\n");
            }
            Response::Failed => {
                buf.put_slice(b"false\n");
            }
            Response::Used(code) => {
                buf.put_slice(b"SUCCESS: Code ");
                buf.put_slice(code.as_bytes());
                buf.put_slice(b" used\n");
            }
            Response::Error(message) => {
                buf.put_slice(b"ERROR: ");
                buf.put_slice(message.as_bytes());
                buf.put_slice(b"\n");
            }
            Response::Goodbye => {
                buf.put_slice(b"Goodbye!\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_generated() {
        let resp = Response::generated(vec!["ABC2345".into(), "XYZ2345".into()]);
        assert_eq!(resp.encode().as_ref(), b"true ABC2345,XYZ2345\n");

        let resp = Response::generated(vec!["ABC2345".into()]);
        assert_eq!(resp.encode().as_ref(), b"true ABC2345\n");
    }

    #[test]
    fn test_encode_failed() {
        assert_eq!(Response::failed().encode().as_ref(), b"false\n");
    }

    #[test]
    fn test_encode_used() {
        let resp = Response::used("ABC2345");
        assert_eq!(resp.encode().as_ref(), b"SUCCESS: Code ABC2345 used\n");
    }

    #[test]
    fn test_encode_canonical_errors() {
        assert_eq!(
            Response::not_found().encode().as_ref(),
            b"ERROR: Code does not exist\n"
        );
        assert_eq!(
            Response::already_used().encode().as_ref(),
            b"ERROR: Code already used\n"
        );
        assert_eq!(
            Response::code_required().encode().as_ref(),
            b"ERROR: Code is required\n"
        );
        assert_eq!(
            Response::error("Unknown command").encode().as_ref(),
            b"ERROR: Unknown command\n"
        );
    }

    #[test]
    fn test_encode_goodbye() {
        assert_eq!(Response::Goodbye.encode().as_ref(), b"Goodbye!\n");
    }

    #[test]
    fn test_encode_into_appends() {
        let mut buf = BytesMut::new();
        Response::failed().encode_into(&mut buf);
        Response::Goodbye.encode_into(&mut buf);
        assert_eq!(buf.as_ref(), b"false\nGoodbye!\n");
    }
}
