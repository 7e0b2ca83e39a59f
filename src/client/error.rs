// This file is part of the terraform-provider-octopusdeploy project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use reqwest::{Method, StatusCode};
use serde::Deserialize;

/// Error returned by every Octopus Deploy API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build request url for {0}")]
    Url(String),
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to {method} {path}: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to {method} {path}: received unexpected status code {status} - {message}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        message: String,
        details: Vec<String>,
    },
    #[error("failed to decode response of {method} {path}: {source}")]
    Decode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Whether the server reported the requested object as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    pub(super) fn from_response(
        method: Method,
        path: String,
        status: StatusCode,
        body: &str,
    ) -> Self {
        let (message, details) = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                error_message: Some(message),
                errors,
            }) if !message.is_empty() => (message, errors),
            Ok(ErrorBody { errors, .. }) => (default_message(status), errors),
            Err(_) => (default_message(status), Vec::new()),
        };
        let message = if details.is_empty() {
            message
        } else {
            format!("{message} ({})", details.join("; "))
        };
        ApiError::Status {
            method,
            path,
            status,
            message,
            details,
        }
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown status")
        .to_owned()
}

/// Error payload sent by the server on failure
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorBody {
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_server_message() {
        let err = ApiError::from_response(
            Method::PUT,
            "/api/Spaces-1/tenants/Tenants-1".to_owned(),
            StatusCode::BAD_REQUEST,
            r#"{"ErrorMessage":"There was a problem with your request.","Errors":["Name is required"]}"#,
        );
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "failed to PUT /api/Spaces-1/tenants/Tenants-1: received unexpected status code 400 Bad Request - There was a problem with your request. (Name is required)"
        );
    }

    #[test]
    fn status_error_without_body() {
        let err = ApiError::from_response(
            Method::GET,
            "/api/Spaces-1/projecttriggers/ProjectTriggers-1".to_owned(),
            StatusCode::NOT_FOUND,
            "",
        );
        assert!(err.is_not_found());
        assert!(err.to_string().ends_with("404 Not Found - Not Found"));
    }

    #[test]
    fn status_error_with_null_details() {
        let err = ApiError::from_response(
            Method::PUT,
            "/api/Spaces-1/tenants/Tenants-1".to_owned(),
            StatusCode::BAD_REQUEST,
            r#"{"ErrorMessage":"Tenant name must be unique","Errors":null}"#,
        );
        let ApiError::Status {
            message, details, ..
        } = &err
        else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(message, "Tenant name must be unique");
        assert!(details.is_empty());
        assert!(err
            .to_string()
            .ends_with("400 Bad Request - Tenant name must be unique"));
    }
}
