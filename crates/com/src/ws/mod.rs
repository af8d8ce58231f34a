mod client;
pub use client::WsClient;

mod server;
pub use server::{SessionEvent, WsServer};
