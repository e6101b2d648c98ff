//! Health surface for the registration engine's host process.

/// Engine version reported on the health endpoint.
pub const ENGINE_VERSION: &str = "1.0";

/// Minimal health response: `ok`, `build_id`, `engine_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
    /// Git commit SHA or build identifier.
    pub build_id: String,
    pub engine_version: String,
}

impl HealthResponse {
    pub fn healthy(build_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            build_id: build_id.into(),
            engine_version: ENGINE_VERSION.to_string(),
        }
    }

    pub fn unhealthy(build_id: impl Into<String>) -> Self {
        Self {
            ok: false,
            build_id: build_id.into(),
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Process is up = healthy; deeper checks belong to the host service.
pub fn check_health(build_id: &str) -> HealthResponse {
    HealthResponse::healthy(build_id)
}

pub const EXIT_HEALTHY: i32 = 0;
pub const EXIT_UNHEALTHY: i32 = 1;

/// Exit code for a health response.
pub fn exit_code(response: &HealthResponse) -> i32 {
    if response.ok { EXIT_HEALTHY } else { EXIT_UNHEALTHY }
}
