use std::fs;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};

use tiny_http::{Header, Request, Response, Server};

use folio::error;
use folio::error::{Chainable, Result};

/// Serves the files under `root` on `localhost:port` until the process is
/// stopped.
pub fn serve(root: &Path, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let server = Server::http(addr).chain_with(|| error! {
        "failed to start the development server",
        "address" => addr,
    })?;

    log::info!("| serve | http://{addr} | {}", root.display());
    for request in server.incoming_requests() {
        if let Err(e) = handle(request, root) {
            log::warn!("| serve | request failed\n{e}");
        }
    }

    Ok(())
}

fn handle(request: Request, root: &Path) -> Result<()> {
    let Some(path) = resolve(root, request.url()) else {
        log::debug!("| serve | 404 | {}", request.url());
        let response = Response::from_string("404 Not Found").with_status_code(404);
        return Ok(request.respond(response)?);
    };

    let data = fs::read(&path).chain_with(|| error! {
        "failed to read file",
        "path" => path.display(),
    })?;

    log::debug!("| serve | 200 | {}", request.url());
    let mut response = Response::from_data(data);
    if let Ok(header) = Header::from_bytes("Content-Type", content_type(&path)) {
        response = response.with_header(header);
    }

    Ok(request.respond(response)?)
}

/// The file under `root` that answers a request for `url`: the file itself,
/// or the `index.html` of a directory. Urls leaving `root` resolve to nothing.
fn resolve(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or("");
    let path = urlencoding::decode(path).ok()?;
    let relative = Path::new(path.trim_matches('/'));
    if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }

    let local = root.join(relative);
    if local.is_file() {
        return Some(local);
    }

    Some(local.join("index.html")).filter(|index| index.is_file())
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" | "md" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}
