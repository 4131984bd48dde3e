//! Promo command parser

use crate::command::Command;
use crate::error::{ProtocolError, ProtocolResult};
use bytes::BytesMut;
use promo_core::{MAX_CODE_LENGTH, MIN_CODE_LENGTH};

/// Longest accepted command line, terminator included
const MAX_LINE_SIZE: usize = 8 * 1024;

/// Streaming command parser.
///
/// Bytes arrive in arbitrary chunks over TCP; `feed` buffers them and
/// `parse` yields one complete command per newline-terminated line, leaving
/// a trailing partial line buffered for the next read.
pub struct Parser {
    buffer: BytesMut,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(256),
        }
    }

    /// Add data to the parser buffer.
    ///
    /// Overflowing the line cap clears the buffer, so the connection can
    /// carry on after the error response.
    pub fn feed(&mut self, data: &[u8]) -> ProtocolResult<()> {
        if self.buffer.len() + data.len() > MAX_LINE_SIZE {
            self.buffer.clear();
            return Err(ProtocolError::LineTooLong {
                limit: MAX_LINE_SIZE,
            });
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Try to parse one complete command from the buffer
    pub fn parse(&mut self) -> ProtocolResult<Option<Command>> {
        let line_end = match self.buffer.iter().position(|&b| b == b'\n') {
            Some(pos) => pos,
            None => return Ok(None), // Incomplete
        };

        // Strip the \r of a CRLF ending
        let line_len = if line_end > 0 && self.buffer[line_end - 1] == b'\r' {
            line_end - 1
        } else {
            line_end
        };

        let line = String::from_utf8_lossy(&self.buffer[..line_len]).to_string();

        // Consume the line, terminator included
        let _ = self.buffer.split_to(line_end + 1);

        Self::parse_line(&line).map(Some)
    }

    /// Parse a single command line
    fn parse_line(line: &str) -> ProtocolResult<Command> {
        let mut tokens = line.split_whitespace();

        let verb = match tokens.next() {
            Some(verb) => verb.to_uppercase(),
            None => return Err(ProtocolError::Empty),
        };

        // Arguments past the ones a command needs are ignored
        match verb.as_str() {
            "GENERATE" => Self::parse_generate(&mut tokens),
            "USE" => Self::parse_use(&mut tokens),
            "EXIT" => Ok(Command::Exit),
            _ => Err(ProtocolError::UnknownCommand(verb)),
        }
    }

    fn parse_generate(tokens: &mut std::str::SplitWhitespace<'_>) -> ProtocolResult<Command> {
        let count: i64 = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(ProtocolError::GenerateUsage)?;

        let length = match tokens.next() {
            Some(t) => {
                let len: u8 = t.parse().map_err(|_| ProtocolError::LengthArg)?;
                if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&len) {
                    return Err(ProtocolError::LengthArg);
                }
                Some(len)
            }
            None => None,
        };

        Ok(Command::Generate { count, length })
    }

    fn parse_use(tokens: &mut std::str::SplitWhitespace<'_>) -> ProtocolResult<Command> {
        let code = tokens.next().ok_or(ProtocolError::UseUsage)?;

        Ok(Command::Use {
            code: code.to_string(),
        })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(input: &[u8]) -> ProtocolResult<Option<Command>> {
        let mut parser = Parser::new();
        parser.feed(input).unwrap();
        parser.parse()
    }

    #[test]
    fn test_parse_generate() {
        let cmd = parse_one(b"GENERATE 5\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Generate {
                count: 5,
                length: None
            }
        );
    }

    #[test]
    fn test_parse_generate_with_length() {
        let cmd = parse_one(b"GENERATE 10 7\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Generate {
                count: 10,
                length: Some(7)
            }
        );

        let cmd = parse_one(b"generate 10 8\r\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Generate {
                count: 10,
                length: Some(8)
            }
        );
    }

    #[test]
    fn test_parse_generate_negative_count_passes_through() {
        // Range checking is the manager's call, not the parser's
        let cmd = parse_one(b"GENERATE -5\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Generate {
                count: -5,
                length: None
            }
        );
    }

    #[test]
    fn test_parse_generate_usage_errors() {
        assert!(matches!(
            parse_one(b"GENERATE\n"),
            Err(ProtocolError::GenerateUsage)
        ));
        assert!(matches!(
            parse_one(b"GENERATE five\n"),
            Err(ProtocolError::GenerateUsage)
        ));
    }

    #[test]
    fn test_parse_generate_bad_length() {
        assert!(matches!(
            parse_one(b"GENERATE 5 6\n"),
            Err(ProtocolError::LengthArg)
        ));
        assert!(matches!(
            parse_one(b"GENERATE 5 9\n"),
            Err(ProtocolError::LengthArg)
        ));
        assert!(matches!(
            parse_one(b"GENERATE 5 seven\n"),
            Err(ProtocolError::LengthArg)
        ));
    }

    #[test]
    fn test_parse_use() {
        let cmd = parse_one(b"USE ABC23XYZ\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Use {
                code: "ABC23XYZ".to_string()
            }
        );

        // Verb casing does not matter, the argument is passed through
        let cmd = parse_one(b"use abc23xyz\r\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Use {
                code: "abc23xyz".to_string()
            }
        );
    }

    #[test]
    fn test_parse_use_missing_argument() {
        assert!(matches!(parse_one(b"USE\n"), Err(ProtocolError::UseUsage)));
        assert!(matches!(
            parse_one(b"USE   \n"),
            Err(ProtocolError::UseUsage)
        ));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse_one(b"EXIT\n").unwrap().unwrap(), Command::Exit);
        assert_eq!(parse_one(b"exit\r\n").unwrap().unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert!(matches!(
            parse_one(b"FROBNICATE\n"),
            Err(ProtocolError::UnknownCommand(ref v)) if v == "FROBNICATE"
        ));
        assert!(matches!(parse_one(b"\n"), Err(ProtocolError::Empty)));
        assert!(matches!(parse_one(b"   \n"), Err(ProtocolError::Empty)));
    }

    #[test]
    fn test_extra_arguments_ignored() {
        let cmd = parse_one(b"USE ABC23XYZ trailing junk\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Use {
                code: "ABC23XYZ".to_string()
            }
        );

        let cmd = parse_one(b"GENERATE 5 7 whatever\n").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Generate {
                count: 5,
                length: Some(7)
            }
        );
    }

    #[test]
    fn test_incomplete_command() {
        let mut parser = Parser::new();
        parser.feed(b"GENERATE").unwrap();
        assert!(parser.parse().unwrap().is_none());

        parser.feed(b" 3 7").unwrap();
        assert!(parser.parse().unwrap().is_none());

        parser.feed(b"\r\n").unwrap();
        assert_eq!(
            parser.parse().unwrap().unwrap(),
            Command::Generate {
                count: 3,
                length: Some(7)
            }
        );
    }

    #[test]
    fn test_multiple_commands_in_one_feed() {
        let mut parser = Parser::new();
        parser.feed(b"GENERATE 1\nUSE ABCDEFG\nEXIT\n").unwrap();

        assert_eq!(
            parser.parse().unwrap().unwrap(),
            Command::Generate {
                count: 1,
                length: None
            }
        );
        assert_eq!(
            parser.parse().unwrap().unwrap(),
            Command::Use {
                code: "ABCDEFG".to_string()
            }
        );
        assert_eq!(parser.parse().unwrap().unwrap(), Command::Exit);
        assert!(parser.parse().unwrap().is_none());
    }

    #[test]
    fn test_overlong_line_resets_parser() {
        let mut parser = Parser::new();
        let blob = vec![b'A'; MAX_LINE_SIZE + 1];
        assert!(matches!(
            parser.feed(&blob),
            Err(ProtocolError::LineTooLong { .. })
        ));

        // The parser is usable again straight away
        parser.feed(b"EXIT\n").unwrap();
        assert_eq!(parser.parse().unwrap().unwrap(), Command::Exit);
    }
}
