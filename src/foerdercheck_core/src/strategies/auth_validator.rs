use async_trait::async_trait;

/// Trait for validating authentication tokens before a protected route runs.
///
/// Possession of a validly signed session token for an address authorizes
/// every action scoped to that address. Implementations establish that
/// principal and nothing more; ownership checks downstream key off it.
///
/// The validator receives `RequestParts` (headers, method, URI, extensions) rather
/// than the full `Request` to avoid issues with non-`Sync` request bodies.
#[async_trait]
pub trait AuthValidator: Clone + Send + Sync + 'static {
    /// The identity established from a valid token.
    type Principal: Clone + Send + Sync + 'static;

    /// The request parts type this validator operates on.
    ///
    /// Typically `http::request::Parts`.
    type RequestParts: Send + Sync;

    type Error: std::error::Error + Send + Sync + 'static;

    /// Extract the credential from the request parts and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No credential is present or it is malformed
    /// - The token signature is invalid or the token expired
    /// - The token was minted for a different purpose
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Principal, Self::Error>;
}
