//! Completed assessment record.
//!
//! Wraps a risk report with an identifier and timestamp for display and
//! export. The report itself stays a pure function of the patient record;
//! id and timestamp are assigned only when an assessment is completed.

use serde::{Deserialize, Serialize};

use super::report::RiskReport;

/// A completed assessment, ready for rendering or export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier
    pub id: String,

    /// The evaluation result
    pub report: RiskReport,

    /// When the assessment was completed
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// Create a new assessment from a report.
    #[must_use]
    pub fn new(report: RiskReport) -> Self {
        Self {
            id: uuid_v4(),
            report,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Generate a simple UUID v4 (random) using CSPRNG.
///
/// Uses ChaCha20Rng seeded from OS entropy so identifiers are unpredictable
/// on all platforms.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskTier;

    #[test]
    fn test_assessment_creation() {
        let report = RiskReport {
            fib4_score: Some(2.37),
            risk_tier: Some(RiskTier::Moderate),
            ..Default::default()
        };
        let assessment = Assessment::new(report.clone());

        assert_eq!(assessment.report, report);
        assert_eq!(assessment.id.len(), 36); // UUID format with dashes
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
    }
}
