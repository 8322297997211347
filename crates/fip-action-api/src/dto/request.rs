//! Request DTOs with validation.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use fip_action_core::types::{ActionRequest, SemanticVersion, VersionRequest};

/// `POST /api/prepare-action` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrepareActionRequest {
    /// Project UUID.
    #[validate(length(min = 1, message = "projectUuid is required"))]
    pub project_uuid: String,
    /// User token.
    #[validate(length(min = 1, message = "userToken is required"))]
    pub user_token: String,
}

impl From<PrepareActionRequest> for ActionRequest {
    fn from(req: PrepareActionRequest) -> Self {
        Self {
            project_uuid: req.project_uuid,
            user_token: req.user_token,
        }
    }
}

/// `POST /api/submit-version` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVersionRequest {
    /// Project UUID.
    #[validate(length(min = 1, message = "projectUuid is required"))]
    pub project_uuid: String,
    /// User token.
    #[validate(length(min = 1, message = "userToken is required"))]
    pub user_token: String,
    /// Target version.
    #[validate(custom(function = "validate_version"))]
    pub version: String,
    /// Version description.
    #[serde(default)]
    pub description: String,
}

impl From<SubmitVersionRequest> for VersionRequest {
    fn from(req: SubmitVersionRequest) -> Self {
        Self {
            project_uuid: req.project_uuid,
            user_token: req.user_token,
            version: req.version,
            description: req.description,
        }
    }
}

fn validate_version(version: &str) -> Result<(), ValidationError> {
    version
        .parse::<SemanticVersion>()
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("version_format")
                .with_message(Cow::Borrowed("version must be MAJOR.MINOR.PATCH"))
        })
}
