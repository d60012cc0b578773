mod remote;

pub use remote::{RemoteVerifier, new_client};

use crate::domain::GeoPoint;
use crate::proximity::{ProximityResult, within_proximity};
use async_trait::async_trait;
use thiserror::Error;

/// An error here means the verification could not be performed, which callers
/// must treat differently from a negative verification.
#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("verification request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Decides whether a user is within proximity of a reference point. The
/// decision logic itself is pure; implementations only differ in where it
/// runs. Whatever the deployment, the result must match [`within_proximity`]
/// bit for bit.
#[async_trait]
pub trait ProximityVerifier: Send + Sync {
    async fn verify(&self, user: GeoPoint, reference: GeoPoint) -> Result<ProximityResult, VerifierError>;
}

/// Runs the proximity gate in-process. Cannot fail.
pub struct LocalVerifier {
    threshold_meters: f64,
}

impl LocalVerifier {
    pub fn new(threshold_meters: f64) -> Self {
        LocalVerifier { threshold_meters }
    }
}

#[async_trait]
impl ProximityVerifier for LocalVerifier {
    async fn verify(&self, user: GeoPoint, reference: GeoPoint) -> Result<ProximityResult, VerifierError> {
        Ok(within_proximity(user, reference, self.threshold_meters))
    }
}
