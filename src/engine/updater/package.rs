//! Response Interpreter
//!
//! Turns the body of an OTA query response into a [`QueryOutcome`].
//!
//! The server answers with one of:
//! - an empty body when it has nothing to report
//! - an error document (`<Error>` root or an `<ErrorCode>` element)
//! - a package document whose root carries `<Version>`, `<PackageSize>`,
//!   `<DownloadUrl>`, `<Sha256>`, `<ReleaseNote>`, `<IsFullPackage>` and
//!   `<UpdateFromVersion>`

use serde::Serialize;
use tracing::{error, info, warn};

use super::outcome::{FailureReason, QueryOutcome};
use super::xml::Element;

/// Error code the server is believed to use for "no newer firmware"
pub const DEFAULT_NO_UPDATE_CODE: &str = "1000";

const ERROR_ROOT: &str = "Error";
const ERROR_CODE: &str = "ErrorCode";
const ERROR_MSG: &str = "ErrorMsg";
const DEFAULT_RELEASE_NOTE: &str = "none";

/// Firmware package offered by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Size in bytes, exactly as the server reported it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// SHA-256, the algorithm requested in the query
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    pub release_note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_full_package: Option<String>,
    /// Version a delta package applies on top of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_version: Option<String>,
}

impl PackageDescriptor {
    fn from_element(root: &Element) -> Self {
        Self {
            version: root.child_text("Version"),
            size: root.child_text("PackageSize"),
            url: root.child_text("DownloadUrl"),
            checksum: root.child_text("Sha256"),
            release_note: root
                .child_text("ReleaseNote")
                .unwrap_or_else(|| DEFAULT_RELEASE_NOTE.to_string()),
            is_full_package: root.child_text("IsFullPackage"),
            base_version: root.child_text("UpdateFromVersion"),
        }
    }

    /// Only descriptors with a non-empty version describe a real package
    pub fn is_valid(&self) -> bool {
        self.version.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Reported size, when it is a plain byte count
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref()?.parse().ok()
    }
}

/// Interpret a response body with the default no-update code
pub fn interpret(body: &str) -> QueryOutcome {
    Interpreter::default().interpret(body)
}

#[derive(Debug, Clone)]
pub struct Interpreter {
    no_update_code: String,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::with_no_update_code(DEFAULT_NO_UPDATE_CODE)
    }
}

impl Interpreter {
    pub fn with_no_update_code(code: impl Into<String>) -> Self {
        Self {
            no_update_code: code.into(),
        }
    }

    pub fn interpret(&self, body: &str) -> QueryOutcome {
        if body.trim().is_empty() {
            info!("Empty response body, no new firmware reported");
            return QueryOutcome::NoUpdate;
        }

        let root = match Element::parse(body) {
            Ok(root) => root,
            Err(e) => {
                error!(error = %e, "Failed to parse OTA response as XML");
                return QueryOutcome::Failed(FailureReason::Parse(e.to_string()));
            }
        };

        if root.name == ERROR_ROOT || root.find(ERROR_CODE).is_some() {
            return self.interpret_error(&root);
        }

        let package = PackageDescriptor::from_element(&root);
        if package.is_valid() {
            info!(
                version = package.version.as_deref().unwrap_or_default(),
                "New firmware package available"
            );
            QueryOutcome::Available(package)
        } else {
            warn!(root = %root.name, "OTA response is missing the firmware version");
            QueryOutcome::Failed(FailureReason::MalformedResponse)
        }
    }

    fn interpret_error(&self, root: &Element) -> QueryOutcome {
        let code = root
            .find(ERROR_CODE)
            .map(|e| e.text().to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let message = root
            .find(ERROR_MSG)
            .map(|e| e.text().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        if code == self.no_update_code {
            info!(%code, "Server reports no new firmware version");
            return QueryOutcome::NoUpdate;
        }

        error!(%code, %message, "OTA server returned an error");
        QueryOutcome::Failed(FailureReason::Server { code, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_bodies_mean_no_update() {
        for body in ["", " ", "\n", "\t\r\n  "] {
            assert_eq!(interpret(body), QueryOutcome::NoUpdate, "body {:?}", body);
        }
    }

    #[test]
    fn test_package_document() {
        let body = "<Response><Version>TB710FU_RF02_251010</Version>\
            <PackageSize>1048576</PackageSize>\
            <DownloadUrl>https://x/fw.zip</DownloadUrl>\
            <Sha256>abc123</Sha256></Response>";

        let expected = PackageDescriptor {
            version: Some("TB710FU_RF02_251010".to_string()),
            size: Some("1048576".to_string()),
            url: Some("https://x/fw.zip".to_string()),
            checksum: Some("abc123".to_string()),
            release_note: "none".to_string(),
            is_full_package: None,
            base_version: None,
        };
        let outcome = interpret(body);
        assert!(outcome.is_update_available());
        assert_eq!(outcome, QueryOutcome::Available(expected));
    }

    #[test]
    fn test_delta_package_fields() {
        let body = "<Firmware><Version>V2</Version><ReleaseNote>Security fixes</ReleaseNote>\
            <IsFullPackage>false</IsFullPackage><UpdateFromVersion>V1</UpdateFromVersion></Firmware>";

        let outcome = interpret(body);
        let package = outcome.package().unwrap();
        assert_eq!(package.release_note, "Security fixes");
        assert_eq!(package.is_full_package.as_deref(), Some("false"));
        assert_eq!(package.base_version.as_deref(), Some("V1"));
        assert_eq!(package.size, None);
        assert_eq!(package.url, None);
    }

    #[test]
    fn test_no_update_code() {
        let outcome = interpret("<Error><ErrorCode>1000</ErrorCode></Error>");
        assert!(!outcome.is_update_available());
        assert_eq!(outcome, QueryOutcome::NoUpdate);
    }

    #[test]
    fn test_server_error() {
        assert_eq!(
            interpret("<Error><ErrorCode>2001</ErrorCode><ErrorMsg>bad device</ErrorMsg></Error>"),
            QueryOutcome::Failed(FailureReason::Server {
                code: "2001".to_string(),
                message: "bad device".to_string(),
            })
        );
    }

    #[test]
    fn test_server_error_message_defaults() {
        assert_eq!(
            interpret("<Error><ErrorCode>3000</ErrorCode></Error>"),
            QueryOutcome::Failed(FailureReason::Server {
                code: "3000".to_string(),
                message: "unknown".to_string(),
            })
        );
    }

    #[test]
    fn test_error_code_nested_under_other_root() {
        let body = "<Response><Status><ErrorCode>2002</ErrorCode><ErrorMsg>expired</ErrorMsg></Status>\
            <Version>V9</Version></Response>";
        assert_eq!(
            interpret(body),
            QueryOutcome::Failed(FailureReason::Server {
                code: "2002".to_string(),
                message: "expired".to_string(),
            })
        );
    }

    #[test]
    fn test_error_root_without_code() {
        assert_eq!(
            interpret("<Error><ErrorMsg>maintenance</ErrorMsg></Error>"),
            QueryOutcome::Failed(FailureReason::Server {
                code: "N/A".to_string(),
                message: "maintenance".to_string(),
            })
        );
    }

    #[test]
    fn test_configured_no_update_code() {
        let interpreter = Interpreter::with_no_update_code("2001");
        assert_eq!(
            interpreter.interpret("<Error><ErrorCode>2001</ErrorCode></Error>"),
            QueryOutcome::NoUpdate
        );
        assert!(matches!(
            interpreter.interpret("<Error><ErrorCode>1000</ErrorCode></Error>"),
            QueryOutcome::Failed(FailureReason::Server { .. })
        ));
    }

    #[test]
    fn test_missing_version_is_malformed() {
        let body = "<Response><PackageSize>1</PackageSize><DownloadUrl>https://x</DownloadUrl></Response>";
        assert_eq!(
            interpret(body),
            QueryOutcome::Failed(FailureReason::MalformedResponse)
        );
    }

    #[test]
    fn test_empty_version_is_malformed() {
        assert_eq!(
            interpret("<Response><Version>  </Version></Response>"),
            QueryOutcome::Failed(FailureReason::MalformedResponse)
        );
    }

    #[test]
    fn test_not_well_formed() {
        for body in [
            "<Response><Version>V2</Version>",
            "<Response><Version>V2</Response>",
            "<html>oops</html><p>",
            "Service Unavailable",
            "<Response a=\"1\" a=\"2\"><Version>V</Version></Response>",
            "<Response a=1><Version>V</Version></Response>",
        ] {
            assert!(
                matches!(interpret(body), QueryOutcome::Failed(FailureReason::Parse(_))),
                "body {:?}",
                body
            );
        }
    }

    #[test]
    fn test_size_bytes() {
        let mut package = PackageDescriptor {
            version: Some("V".to_string()),
            size: Some("2048".to_string()),
            url: None,
            checksum: None,
            release_note: "none".to_string(),
            is_full_package: None,
            base_version: None,
        };
        assert_eq!(package.size_bytes(), Some(2048));

        package.size = Some("2 MB".to_string());
        assert_eq!(package.size_bytes(), None);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let outcome = interpret("<R><Version>V3</Version></R>");
        let json = serde_json::to_value(outcome.package().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "version": "V3", "release_note": "none" })
        );
    }
}
