//! Result type alias for reploit operations.

use super::reploit_error::ReploitError;

/// Type alias for Results using ReploitError.
///
/// # Example
///
/// ```ignore
/// use reploit::error::ReploitResult;
///
/// async fn index(client: &AssistantClient) -> ReploitResult<IndexResponse> {
///     client.index_repository("https://github.com/owner/repo").await
/// }
/// ```
pub type ReploitResult<T> = Result<T, ReploitError>;
