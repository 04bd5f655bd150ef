mod f_anonym;
mod f_oauth;

pub use f_anonym::anonym;
pub use f_oauth::{try_oauth, OAuthCache};
