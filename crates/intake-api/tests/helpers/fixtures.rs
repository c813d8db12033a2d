use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

pub const BOUNDARY: &str = "----intake-test-boundary";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// One multipart part: `(name, Some((filename, content_type)), content)`.
pub type Part<'a> = (&'a str, Option<(&'a str, &'a str)>, &'a str);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file {
            Some((filename, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Authorization header value carrying `claims`; the signature is never checked.
pub fn bearer_token(claims: Value) -> String {
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"issuer-secret"))
        .expect("encode token");
    format!("Bearer {}", token)
}

/// API Gateway proxy event as delivered by the gateway.
pub fn proxy_event(method: &str, headers: Value, body: &[u8], base64: bool) -> Value {
    let body = if base64 {
        STANDARD.encode(body)
    } else {
        String::from_utf8(body.to_vec()).expect("utf-8 body")
    };
    json!({
        "resource": "/submissions",
        "path": "/submissions",
        "httpMethod": method,
        "headers": headers,
        "queryStringParameters": null,
        "body": body,
        "isBase64Encoded": base64
    })
}
