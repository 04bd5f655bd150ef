use serde::{Deserialize, Serialize};

/// The subset of the identity provider's userinfo payload we rely on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(alias = "id")]
    pub sub: String,
    pub name: String,
    pub email: String,
}
