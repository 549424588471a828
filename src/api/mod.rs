// HTTP endpoints grouped by feature

pub mod health;
pub mod names;
