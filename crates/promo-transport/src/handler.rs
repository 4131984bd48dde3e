//! Connection handler - turns raw bytes into commands and responses

use promo_core::{CodeManager, Error, UseOutcome};
use promo_protocol::{Command, Parser, Response};
use std::sync::Arc;
use tracing::debug;

/// Handles a single client connection
pub struct ConnectionHandler {
    /// Unique client ID
    pub client_id: String,
    /// Shared code manager
    manager: Arc<CodeManager>,
    /// Protocol parser
    parser: Parser,
}

impl ConnectionHandler {
    pub fn new(client_id: String, manager: Arc<CodeManager>) -> Self {
        Self {
            client_id,
            manager,
            parser: Parser::new(),
        }
    }

    /// Process incoming data and return responses, one per complete command.
    ///
    /// A malformed line yields an error response and the remaining buffered
    /// lines are still processed; the connection is never poisoned by one
    /// bad command.
    pub async fn process(&mut self, data: &[u8]) -> Vec<Response> {
        let mut responses = Vec::new();

        if let Err(e) = self.parser.feed(data) {
            responses.push(Response::error(e.to_string()));
            return responses;
        }

        loop {
            match self.parser.parse() {
                Ok(Some(cmd)) => {
                    let response = self.handle_command(cmd).await;
                    responses.push(response);
                }
                Ok(None) => break, // Need more data
                Err(e) => {
                    // The offending line is already consumed
                    debug!(client = %self.client_id, error = ?e, "Rejected command");
                    responses.push(Response::error(e.to_string()));
                }
            }
        }

        responses
    }

    /// Handle a single command
    async fn handle_command(&self, cmd: Command) -> Response {
        debug!(client = %self.client_id, cmd = ?cmd, "Processing command");

        match cmd {
            Command::Generate { count, length } => self.handle_generate(count, length).await,
            Command::Use { code } => self.handle_use(&code).await,
            Command::Exit => Response::Goodbye,
        }
    }

    async fn handle_generate(&self, count: i64, length: Option<u8>) -> Response {
        match self.manager.generate(count, length).await {
            Ok(codes) => Response::generated(codes),
            Err(e) => {
                debug!(client = %self.client_id, error = %e, "Generate refused");
                Response::failed()
            }
        }
    }

    async fn handle_use(&self, code: &str) -> Response {
        match self.manager.use_code(code).await {
            Ok(UseOutcome::Used(stored)) => Response::used(stored),
            Ok(UseOutcome::NotFound) => Response::not_found(),
            Ok(UseOutcome::AlreadyUsed) => Response::already_used(),
            Ok(UseOutcome::Missing) => Response::code_required(),
            // The client sees the store failure itself, not the enum wrapper
            Err(Error::Store(e)) => Response::error(e.to_string()),
            Err(e) => Response::error(e.to_string()),
        }
    }
}
