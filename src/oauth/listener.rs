use std::io;
use tokio::sync::mpsc;

/// Path Spotify redirects back to; must match the backend's registered
/// redirect URI.
pub const CALLBACK_PATH: &str = "/callback/spotify";

const CALLBACK_PAGE: &str = "<!DOCTYPE html>\
<html><head><title>Melodiary</title></head>\
<body><h2>Melodiary</h2>\
<p>Sign-in received. You can close this tab and return to the terminal.</p>\
</body></html>";

/// Query parameters Spotify appends to the redirect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Serve the OAuth redirect on localhost and forward each hit to the core.
///
/// tiny_http is blocking, so the server gets its own thread and bridges
/// into tokio with `blocking_send`.
pub fn spawn_redirect_listener(port: u16) -> io::Result<mpsc::Receiver<CallbackParams>> {
    let server = tiny_http::Server::http(("127.0.0.1", port)).map_err(io::Error::other)?;
    let (tx, rx) = mpsc::channel::<CallbackParams>(8);

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let url = request.url().to_owned();
            let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));

            if path != CALLBACK_PATH {
                let _ = request.respond(
                    tiny_http::Response::from_string("not found").with_status_code(404),
                );
                continue;
            }

            let params = parse_params(query);
            tracing::debug!(
                has_code = params.code.is_some(),
                has_error = params.error.is_some(),
                "oauth redirect received"
            );
            let closed = tx.blocking_send(params).is_err();

            let mut response = tiny_http::Response::from_string(CALLBACK_PAGE);
            if let Ok(header) = tiny_http::Header::from_bytes(
                &b"Content-Type"[..],
                &b"text/html; charset=utf-8"[..],
            ) {
                response.add_header(header);
            }
            let _ = request.respond(response);

            if closed {
                break;
            }
        }
    });

    Ok(rx)
}

fn parse_params(query: &str) -> CallbackParams {
    let mut params = CallbackParams::default();
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_owned());
        match key {
            "code" => params.code = Some(value),
            "error" => params.error = Some(value),
            _ => {}
        }
    }
    params
}
