/// Handler for `GET /healthz` — liveness probe, plain `200 ok`.
pub async fn healthz() -> &'static str {
    "ok"
}

/// Handler for `GET /readyz`. The API can serve traffic as soon as it is
/// up, so readiness mirrors liveness until a pool health probe is wired in.
pub async fn readyz() -> &'static str {
    "ok"
}
