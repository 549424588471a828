// Start of file: /src/utils/mod.rs

/*
    * Error mapping and the error middleware, the response envelope,
    * and small shared helpers.
*/

pub mod error_handler;
pub mod response_handler;
pub mod utils;

pub use response_handler::HandlerResponse;

// End of file: /src/utils/mod.rs
