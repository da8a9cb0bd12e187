//! Usage: HTTP surface for the bracket service.

mod routes;
mod server;

pub(crate) use server::serve;
