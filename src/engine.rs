use crate::domain::events::Event;
use crate::domain::{CheckAction, CheckStatus, GeoPoint, LogEntry, SchoolDirectory};
use crate::verifier::ProximityVerifier;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;
use tracing::{instrument, warn};

/// One check-in/check-out attempt as submitted by the kiosk: the form fields,
/// the school id decoded from the scanned QR code, and the device position
/// (absent when the device could not provide one).
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Submission {
    pub full_name: String,
    pub school_id: String,
    pub action: CheckAction,
    pub scanned_school_id: String,
    pub position: Option<GeoPoint>,
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Success,
    Failure,
    /// The submission never made it to verification and nothing was logged.
    Rejected,
    /// Verification could not be performed, as opposed to failing it.
    Unavailable,
}

/// What the kiosk shows in the confirmation dialog.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub message: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
}

pub struct CheckEngine {
    directory: SchoolDirectory,
    verifier: Box<dyn ProximityVerifier>,
    tx: Sender<Event>,
}

impl CheckEngine {
    pub fn new(directory: SchoolDirectory, verifier: Box<dyn ProximityVerifier>, tx: Sender<Event>) -> Self {
        CheckEngine { directory, verifier, tx }
    }

    /// Runs one submission through the QR cross-check and the proximity gate,
    /// recording the attempt in the activity log. Only submissions rejected by
    /// form validation leave no trace in the log.
    #[instrument(skip(self, submission), fields(full_name = %submission.full_name, action = %submission.action))]
    pub async fn process(&self, submission: Submission) -> Outcome {
        if submission.full_name.trim().chars().count() < 2 {
            return Outcome {
                kind: OutcomeKind::Rejected,
                message: "Invalid submission".to_string(),
                details: "Full name must be at least 2 characters.".to_string(),
                distance_meters: None,
            };
        }

        let school = self.directory.find(&submission.school_id);
        let Some(school) = school.filter(|school| school.id == submission.scanned_school_id) else {
            // The activity log keeps the scanned id when the school is unknown.
            let school_name = school
                .map(|school| school.name.clone())
                .unwrap_or_else(|| submission.scanned_school_id.clone());
            self.record(&submission, school_name, CheckStatus::Failure, "QR Code Mismatch").await;

            return Outcome {
                kind: OutcomeKind::Failure,
                message: "QR Code Mismatch".to_string(),
                details: "The scanned QR code does not match the selected school.".to_string(),
                distance_meters: None,
            };
        };

        let school_name = school.name.clone();
        let Some(position) = submission.position else {
            self.record(&submission, school_name, CheckStatus::Failure, "Could not retrieve location.")
                .await;

            return Outcome {
                kind: OutcomeKind::Failure,
                message: "Location Error".to_string(),
                details: "Could not retrieve location.".to_string(),
                distance_meters: None,
            };
        };

        match self.verifier.verify(position, school.location).await {
            Ok(result) if result.within_threshold => {
                self.record(&submission, school_name.clone(), CheckStatus::Success, "Location verified")
                    .await;

                Outcome {
                    kind: OutcomeKind::Success,
                    message: format!("Successful {}!", submission.action),
                    details: format!(
                        "You have successfully completed your {} at {}.",
                        submission.action, school_name
                    ),
                    distance_meters: Some(result.distance_meters),
                }
            }
            Ok(result) => {
                self.record(&submission, school_name, CheckStatus::Failure, "Not within proximity")
                    .await;

                Outcome {
                    kind: OutcomeKind::Failure,
                    message: format!("{} Failed", submission.action),
                    details: "You are not close enough to the school to complete this action.".to_string(),
                    distance_meters: Some(result.distance_meters),
                }
            }
            Err(e) => {
                warn!("⚠️ Could not verify location: {}", e);
                self.record(&submission, school_name, CheckStatus::Failure, "Location verification unavailable")
                    .await;

                Outcome {
                    kind: OutcomeKind::Unavailable,
                    message: "Verification Unavailable".to_string(),
                    details: "Your location could not be verified. Please try again.".to_string(),
                    distance_meters: None,
                }
            }
        }
    }

    async fn record(&self, submission: &Submission, school_name: String, status: CheckStatus, reason: &str) {
        let entry = LogEntry::new(
            submission.full_name.clone(),
            school_name,
            submission.action,
            status,
            reason.to_string(),
        );

        if let Err(e) = self.tx.send(Event::CheckRecorded(entry)).await {
            warn!("⚠️ Could not record check in the activity log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::School;
    use crate::geo::EARTH_RADIUS_METERS;
    use crate::verifier::{LocalVerifier, RemoteVerifier};
    use pretty_assertions::assert_eq;
    use std::f64::consts::PI;
    use tokio::sync::mpsc;
    use tokio::sync::mpsc::Receiver;

    const NORTHWOOD: GeoPoint = GeoPoint {
        latitude: 33.7455,
        longitude: -117.7617,
    };

    fn directory() -> SchoolDirectory {
        SchoolDirectory::new(vec![School {
            id: "school-1".to_string(),
            name: "Northwood High School".to_string(),
            location: NORTHWOOD,
        }])
    }

    fn engine(verifier: Box<dyn ProximityVerifier>) -> (CheckEngine, Receiver<Event>) {
        let (tx, rx) = mpsc::channel(4);
        (CheckEngine::new(directory(), verifier, tx), rx)
    }

    fn submission(position: Option<GeoPoint>) -> Submission {
        Submission {
            full_name: "Jane Doe".to_string(),
            school_id: "school-1".to_string(),
            action: CheckAction::CheckIn,
            scanned_school_id: "school-1".to_string(),
            position,
        }
    }

    fn north_of(point: GeoPoint, meters: f64) -> GeoPoint {
        GeoPoint::new(point.latitude + meters * 180.0 / (PI * EARTH_RADIUS_METERS), point.longitude)
    }

    fn recorded_entry(rx: &mut Receiver<Event>) -> LogEntry {
        let Ok(Event::CheckRecorded(entry)) = rx.try_recv() else {
            panic!("expected a recorded check");
        };
        entry
    }

    #[tokio::test]
    async fn a_user_at_the_school_checks_in_successfully() {
        let (engine, mut rx) = engine(Box::new(LocalVerifier::new(100.0)));

        let outcome = engine.process(submission(Some(NORTHWOOD))).await;

        assert_eq!(outcome.kind, OutcomeKind::Success);
        assert_eq!(outcome.message, "Successful check-in!");
        assert_eq!(
            outcome.details,
            "You have successfully completed your check-in at Northwood High School."
        );
        assert_eq!(outcome.distance_meters, Some(0.0));

        let entry = recorded_entry(&mut rx);
        assert_eq!(entry.status, CheckStatus::Success);
        assert_eq!(entry.reason, "Location verified");
        assert_eq!(entry.school_name, "Northwood High School");
    }

    #[tokio::test]
    async fn a_user_150_meters_away_fails_the_proximity_gate() {
        let (engine, mut rx) = engine(Box::new(LocalVerifier::new(100.0)));

        let outcome = engine.process(submission(Some(north_of(NORTHWOOD, 150.0)))).await;

        assert_eq!(outcome.kind, OutcomeKind::Failure);
        assert_eq!(outcome.message, "check-in Failed");
        assert_eq!(outcome.details, "You are not close enough to the school to complete this action.");

        let entry = recorded_entry(&mut rx);
        assert_eq!(entry.status, CheckStatus::Failure);
        assert_eq!(entry.reason, "Not within proximity");
    }

    #[tokio::test]
    async fn a_scanned_code_for_another_school_is_a_mismatch() {
        let (engine, mut rx) = engine(Box::new(LocalVerifier::new(100.0)));
        let submission = Submission {
            scanned_school_id: "school-2".to_string(),
            ..submission(Some(NORTHWOOD))
        };

        let outcome = engine.process(submission).await;

        assert_eq!(outcome.kind, OutcomeKind::Failure);
        assert_eq!(outcome.message, "QR Code Mismatch");

        let entry = recorded_entry(&mut rx);
        assert_eq!(entry.reason, "QR Code Mismatch");
        assert_eq!(entry.school_name, "Northwood High School");
    }

    #[tokio::test]
    async fn an_unknown_school_is_logged_under_the_scanned_id() {
        let (engine, mut rx) = engine(Box::new(LocalVerifier::new(100.0)));
        let submission = Submission {
            school_id: "school-9".to_string(),
            scanned_school_id: "school-9".to_string(),
            ..submission(Some(NORTHWOOD))
        };

        let outcome = engine.process(submission).await;

        assert_eq!(outcome.kind, OutcomeKind::Failure);

        let entry = recorded_entry(&mut rx);
        assert_eq!(entry.school_name, "school-9");
    }

    #[tokio::test]
    async fn a_missing_position_fails_without_running_the_gate() {
        let (engine, mut rx) = engine(Box::new(LocalVerifier::new(100.0)));

        let outcome = engine.process(submission(None)).await;

        assert_eq!(outcome.kind, OutcomeKind::Failure);
        assert_eq!(outcome.message, "Location Error");
        assert_eq!(outcome.distance_meters, None);

        let entry = recorded_entry(&mut rx);
        assert_eq!(entry.reason, "Could not retrieve location.");
    }

    #[tokio::test]
    async fn a_too_short_name_is_rejected_without_logging() {
        let (engine, mut rx) = engine(Box::new(LocalVerifier::new(100.0)));
        let submission = Submission {
            full_name: " J ".to_string(),
            ..submission(Some(NORTHWOOD))
        };

        let outcome = engine.process(submission).await;

        assert_eq!(outcome.kind, OutcomeKind::Rejected);
        assert_eq!(outcome.details, "Full name must be at least 2 characters.");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn an_unreachable_verifier_yields_unavailable_not_failure() {
        let mut server = mockito::Server::new_async().await;
        server.mock("POST", "/verify-location").with_status(503).create_async().await;

        let verifier = RemoteVerifier::new(reqwest::Client::new(), format!("{}/verify-location", server.url()));
        let (engine, mut rx) = engine(Box::new(verifier));

        let outcome = engine.process(submission(Some(NORTHWOOD))).await;

        assert_eq!(outcome.kind, OutcomeKind::Unavailable);
        assert_eq!(outcome.message, "Verification Unavailable");

        let entry = recorded_entry(&mut rx);
        assert_eq!(entry.status, CheckStatus::Failure);
        assert_eq!(entry.reason, "Location verification unavailable");
    }
}
