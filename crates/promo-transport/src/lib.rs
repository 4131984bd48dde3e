//! Promo Transport Layer
//!
//! Serves the discount-code protocol over plaintext TCP. Each connection
//! gets its own [`ConnectionHandler`]; all connections share one
//! [`promo_core::CodeManager`].

pub mod handler;
pub mod tcp;

pub use handler::ConnectionHandler;
pub use tcp::TcpServer;
