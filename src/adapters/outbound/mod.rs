/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod evidence;
pub mod filesystem;
pub mod formatters;
pub mod network;
pub mod parsers;
