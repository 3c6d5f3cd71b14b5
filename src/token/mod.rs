// Internal modules
mod fields;
mod header;
mod payload;
#[allow(clippy::module_inception)]
mod token;

// Public API exports
pub use fields::NoFields;
pub use header::Header;
pub use payload::{Audience, Payload};
pub use token::{StandardToken, Token};
