// Library root
// -----------
// This crate exposes the URL shortener client as a library. The binary
// (`main.rs`) only wires configuration, logging and a terminal into it.
//
// Module responsibilities:
// - `api`: HTTP transport to the backend (`Backend` trait, `ApiClient`).
// - `protocol`: decoding responses into explicit outcomes.
// - `session`: obtaining the user identity before anything else.
// - `dispatch`: the operations menu and its handlers.
// - `console`: operator I/O, terminal or scripted.
// - `ui`: banner, menus and the top-level `run`.
pub mod api;
pub mod config;
pub mod console;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod session;
pub mod ui;

#[cfg(test)]
mod tests;

pub use error::ClientError;
