//! Promo wire protocol
//!
//! A newline-framed, UTF-8 text protocol: one command line in, one response
//! line out.
//!
//! ## Command Format
//! ```text
//! GENERATE <count> [7|8]    # mint new codes
//! USE <code>                # redeem a code
//! EXIT                      # close the session
//! ```
//!
//! ## Response Format
//! ```text
//! true <c1>,<c2>,...        # codes generated
//! false                     # generation refused
//! SUCCESS: Code <c> used    # code redeemed
//! ERROR: <message>          # rejected command
//! Goodbye!                  # session closing
//! ```

pub mod command;
pub mod error;
pub mod parser;
pub mod response;

pub use command::Command;
pub use error::{ProtocolError, ProtocolResult};
pub use parser::Parser;
pub use response::Response;

/// Greeting written to every client immediately after connect
pub const BANNER: &str =
    "Connected to Discount Server. Commands: GENERATE <count> [7|8] | USE <code> | EXIT\n";
