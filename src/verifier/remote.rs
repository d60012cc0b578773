use crate::domain::GeoPoint;
use crate::geo::distance_meters;
use crate::proximity::ProximityResult;
use crate::verifier::{ProximityVerifier, VerifierError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

pub fn new_client(request_timeout: Duration) -> Result<Client, VerifierError> {
    let client = Client::builder().timeout(request_timeout).build()?;
    Ok(client)
}

/// Routes the proximity decision through a remote evaluator. The remote call
/// adds latency and failure modes but no decision logic: older evaluators
/// return only the boolean, so the distance is recomputed locally when the
/// response omits it, which yields the identical number since the formula is
/// pure.
pub struct RemoteVerifier {
    client: Client,
    url: String,
}

impl RemoteVerifier {
    pub fn new(client: Client, url: String) -> Self {
        RemoteVerifier { client, url }
    }
}

#[async_trait]
impl ProximityVerifier for RemoteVerifier {
    #[instrument(skip(self))]
    async fn verify(&self, user: GeoPoint, reference: GeoPoint) -> Result<ProximityResult, VerifierError> {
        let request = VerifyLocationRequest {
            user_latitude: user.latitude,
            user_longitude: user.longitude,
            school_latitude: reference.latitude,
            school_longitude: reference.longitude,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<VerifyLocationResponse>()
            .await?;

        Ok(ProximityResult {
            distance_meters: response.distance_meters.unwrap_or_else(|| distance_meters(user, reference)),
            within_threshold: response.is_within_proximity,
        })
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct VerifyLocationRequest {
    user_latitude: f64,
    user_longitude: f64,
    school_latitude: f64,
    school_longitude: f64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct VerifyLocationResponse {
    is_within_proximity: bool,
    distance_meters: Option<f64>,
}
