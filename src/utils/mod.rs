mod endpoint;
mod logging;
#[cfg(test)]
pub mod test_server;

pub use endpoint::join_endpoint;
pub use logging::init_logging;
