mod rate_limiter;
mod validator;

pub use rate_limiter::*;
pub use validator::*;
