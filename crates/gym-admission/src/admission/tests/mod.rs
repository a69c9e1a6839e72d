mod common;
mod whitelist;
