/*
* Names API: list, add, fetch and delete stored names.
*/

pub mod handler;
pub mod routes;

pub use routes::names_routes;
