//! Connection test models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload of a successful `GET /api/test-connection`.
///
/// All fields are optional on the wire; the console shows a placeholder for
/// anything the server leaves out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ConnectionInfo {
    /// Name of the database the API is connected to.
    #[serde(default)]
    pub database: Option<String>,
    /// Database host address.
    #[serde(default)]
    pub host: Option<String>,
    /// Status message reported by the API.
    #[serde(default)]
    pub message: Option<String>,
}
