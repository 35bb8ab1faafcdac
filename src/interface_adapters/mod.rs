// Interface adapters: wire protocol, sockets, upstream clients and HTTP routes.

pub mod clients;
pub mod http;
pub mod net;
pub mod protocol;
pub mod renderer;
pub mod state;
pub mod utils;
