//! Users

use serde::{Deserialize, Serialize};

/// Access level reported by the auth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular shopper.
    Customer,

    /// Back-office administrator.
    Admin,
}

/// The authenticated-user snapshot supplied by the auth provider.
///
/// Stored verbatim whenever the provider reports a change; no validation or
/// authorization logic happens at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-issued identifier.
    pub id: String,

    /// Email address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Access level.
    pub role: Role,
}
