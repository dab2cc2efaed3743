use crate::{Context, Result, SignedHeaders, SigningRequest};
use std::fmt::Debug;

/// SigningCredential is the trait used by signer as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the signing credential is valid.
    fn is_valid(&self) -> bool;
}

/// SignRequest computes the headers that authenticate one request.
///
/// Implementations must be pure: everything they need comes from the
/// arguments, and the timestamp comes from [`Context::now`]. Nothing is
/// carried over between two calls.
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request and return the headers to send with it.
    fn sign_request(
        &self,
        ctx: &Context,
        req: &SigningRequest,
        credential: &Self::Credential,
    ) -> Result<SignedHeaders>;
}
