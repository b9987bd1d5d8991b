use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const UNKNOWN_CLIENT: &str = "unknown";

fn parse_forwarded_entry(raw: &str) -> Option<IpAddr> {
    let raw = raw.trim();
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|s| s.ip()))
}

/// Derives the rate-limiting key for a request.
///
/// The address chain is the socket peer followed by `X-Forwarded-For` entries
/// read right to left. With `trusted_hops` proxies in front of the server the
/// client is entry `trusted_hops` of that chain, clamped to its end. The chain
/// stops at the first entry that is not an IP address.
pub fn client_identifier(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trusted_hops: usize,
) -> String {
    let mut chain: Vec<String> = vec![peer
        .map(|p| p.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())];

    if trusted_hops > 0 {
        let forwarded = headers
            .get_all("x-forwarded-for")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .collect::<Vec<_>>();

        for entry in forwarded.into_iter().rev() {
            if chain.len() > trusted_hops {
                break;
            }
            match parse_forwarded_entry(entry) {
                Some(ip) => chain.push(ip.to_string()),
                None => break,
            }
        }
    }

    let index = trusted_hops.min(chain.len() - 1);
    chain.swap_remove(index)
}
