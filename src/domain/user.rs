use serde::{Deserialize, Serialize};

/// The identity record persisted alongside the token.
///
/// The login endpoint returns no user object, so this is synthesized
/// locally; see `session::profile_from_email`. The register endpoint
/// returns exactly this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    #[serde(rename = "nome")]
    pub display_name: String,
    pub email: String,
}

/// Body of a successful `POST /auth/login`. A body without a token decodes
/// to an empty string so the session layer can reject it as incomplete.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
}
