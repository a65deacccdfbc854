//! Presentable sheets and the outcomes their flows report.

use serde::Serialize;

use crate::app::types::{MfaChallengeRequirement, MfaEnrollmentRequirement, Session};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "id", rename_all = "snake_case")]
pub enum Sheet {
    Login,
    MfaEnrollment(MfaEnrollmentRequirement),
    MfaChallenge(MfaChallengeRequirement),
    PersonalDetails,
    BiometricPrompt,
    RequestCard,
    Comment,
    Attachment,
    AddAttachment,
}

impl Sheet {
    /// Stable identifier, independent of the sheet's payload.
    pub fn id(&self) -> &'static str {
        match self {
            Sheet::Login => "login",
            Sheet::MfaEnrollment(_) => "mfa_enrollment",
            Sheet::MfaChallenge(_) => "mfa_challenge",
            Sheet::PersonalDetails => "personal_details",
            Sheet::BiometricPrompt => "biometric_prompt",
            Sheet::RequestCard => "request_card",
            Sheet::Comment => "comment",
            Sheet::Attachment => "attachment",
            Sheet::AddAttachment => "add_attachment",
        }
    }
}

/// Outcome reported by a sheet's flow when it finishes a step.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutput {
    /// Authentication finished.
    Session(Session),
    MfaChallenge(MfaChallengeRequirement),
    MfaEnrollment(MfaEnrollmentRequirement),
    PersonalDetails,
    BiometricPrompt,
    /// The flow is done (card requested, comment posted, attachment saved).
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_serialized_tag() {
        let sheets = [
            Sheet::Login,
            Sheet::MfaEnrollment(MfaEnrollmentRequirement {
                mfa_token: "t".to_string(),
            }),
            Sheet::MfaChallenge(MfaChallengeRequirement {
                mfa_token: "t".to_string(),
                binding_code: "1234".to_string(),
            }),
            Sheet::PersonalDetails,
            Sheet::BiometricPrompt,
            Sheet::RequestCard,
            Sheet::Comment,
            Sheet::Attachment,
            Sheet::AddAttachment,
        ];
        for sheet in sheets {
            let json = serde_json::to_value(&sheet).unwrap();
            assert_eq!(json["id"], sheet.id());
        }
    }
}
