// Network adapter for browser game sockets.

pub mod client;

pub use client::ws_handler;
