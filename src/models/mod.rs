// Start of file: /src/models/mod.rs

/*
    * This module groups all data models exchanged with clients and stores.
*/

pub mod name;

pub use name::{Name, NewName};

// End of file: /src/models/mod.rs
