//! Status checking and payload decoding shared by the adapters.

use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::transport::HttpResponse;

/// Fails with [`GatewayError::Remote`] on a non-2xx status, otherwise decodes
/// the body as `T`.
///
/// A payload with a missing or mistyped field fails the whole call with
/// [`GatewayError::Mapping`]; no partial list is returned.
pub(super) fn decode_success<T>(operation: &str, response: HttpResponse) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    if !response.status.is_success() {
        tracing::warn!(
            operation,
            status = response.status.as_u16(),
            "provider returned non-success status"
        );
        return Err(GatewayError::Remote {
            operation: operation.to_owned(),
            status: response.status.as_u16(),
            body: response.body,
        });
    }

    serde_json::from_str(&response.body).map_err(|error| GatewayError::Mapping {
        message: format!("{operation} response could not be mapped: {error}"),
    })
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use serde::Deserialize;

    use super::decode_success;
    use crate::error::GatewayError;
    use crate::transport::HttpResponse;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn response(status: StatusCode, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_owned(),
        }
    }

    #[test]
    fn decodes_successful_payloads() {
        let decoded: Vec<Named> = decode_success("op", response(StatusCode::OK, r#"[{"name":"x"}]"#))
            .expect("payload should decode");
        let names: Vec<&str> = decoded.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn keeps_upstream_status_and_body() {
        let error = decode_success::<Vec<Named>>(
            "op",
            response(StatusCode::UNAUTHORIZED, r#"{"message":"Bad credentials"}"#),
        )
        .expect_err("401 should fail");

        assert_eq!(
            error,
            GatewayError::Remote {
                operation: "op".to_owned(),
                status: 401,
                body: r#"{"message":"Bad credentials"}"#.to_owned(),
            }
        );
    }

    #[test]
    fn fails_the_whole_list_on_one_bad_item() {
        let error = decode_success::<Vec<Named>>(
            "op",
            response(StatusCode::OK, r#"[{"name":"x"},{"title":"y"}]"#),
        )
        .expect_err("missing field should fail");

        match error {
            GatewayError::Mapping { message } => {
                assert!(message.contains("name"), "unexpected message: {message}");
            }
            other => panic!("expected Mapping, got {other:?}"),
        }
    }
}
