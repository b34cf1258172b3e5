// Default URLs
pub static DEFAULT_API_URL: &str = "https://api.iamport.kr/";

// Endpoints outside of any API namespace
pub static GET_TOKEN_ENDPOINT: &str = "users/getToken";

/// Joins a host and a path with exactly one slash between them.
pub(crate) fn build_url(host: &str, path: &str) -> String {
    format!(
        "{}/{}",
        host.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
