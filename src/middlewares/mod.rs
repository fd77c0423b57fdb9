use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::{Logger, Next},
};

use crate::{ENV, api::error, utils::Claims};

/// Same fields as `Logger::default()`, but the request line is rebuilt from
/// the path so query strings never reach the log. `/ws` carries its token
/// there.
const ACCESS_LOG_FORMAT: &str =
    r#"%a "%{request_line}xi" %s %b "%{Referer}i" "%{User-Agent}i" %T"#;

pub fn access_logger() -> Logger {
    Logger::new(ACCESS_LOG_FORMAT).custom_request_replace("request_line", request_line)
}

fn request_line(req: &ServiceRequest) -> String {
    format!("{} {} {:?}", req.method(), req.path(), req.version())
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let token = match bearer_token(req.request()) {
        Some(t) => t,
        None => {
            return Err(error::Error::unauthorized("No token provided").into());
        }
    };

    let claims = Claims::decode(token, ENV.jwt_secret.as_ref())
        .map_err(|_| error::Error::unauthorized("Invalid token"))?;

    req.extensions_mut().insert(claims);

    next.call(req).await
}

pub fn get_extensions<T>(req: &HttpRequest) -> Result<T, error::Error>
where
    T: Clone + 'static,
{
    let extensions = req.extensions();

    let value =
        extensions.get::<T>().ok_or_else(|| error::Error::unauthorized("Unauthorized"))?.clone();

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_extraction() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req =
            TestRequest::default().insert_header(("Authorization", "Bearer ")).to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_request_line_drops_query_string() {
        let req = TestRequest::with_uri("/ws?token=abc.SECRET.sig").to_srv_request();

        let line = request_line(&req);

        assert_eq!(line, "GET /ws HTTP/1.1");
        assert!(!line.contains("SECRET"));
    }

    #[test]
    fn test_get_extensions_without_claims_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(get_extensions::<Claims>(&req), Err(error::Error::Unauthorized(_))));
    }
}
