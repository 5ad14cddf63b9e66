use actix_web::HttpRequest;
use std::net::IpAddr;

/// Header that overrides the detected client address, e.g.
/// `curl -H "X-IP: 1.2.3.4" http://localhost:12345/s/0a1b2c3d`
pub const CLIENT_IP_OVERRIDE_HEADER: &str = "X-IP";

const FALLBACK_IP: &str = "127.0.0.1";

/// Address used for the visit record and the country lookup.
pub fn client_ip(req: &HttpRequest) -> String {
    let custom_ip = req
        .headers()
        .get(CLIENT_IP_OVERRIDE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let ip = match custom_ip {
        Some(ip) => ip.to_string(),
        None => req
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_default(),
    };

    if ip.parse::<IpAddr>().is_ok() {
        ip
    } else {
        FALLBACK_IP.to_string()
    }
}
