//! JSON response shapes shared by the HTTP routes and the client library.

pub mod categories;
pub mod notes;
