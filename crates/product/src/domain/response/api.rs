use serde::{Deserialize, Serialize};
use shared::config::ConnectionState;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub ok: bool,
    #[schema(example = "product-catalog API is running")]
    pub message: String,
    /// 0 disconnected, 1 connected, 2 connecting, 3 disconnecting.
    #[schema(example = 1)]
    pub db_state: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub db_state: ConnectionState,
    #[schema(example = "pharmacy")]
    pub db_name: Option<String>,
}
