use std::io::Cursor;
use tiny_http::{Header, Response, Server, StatusCode};

use crate::error::{NnError, Result};
use crate::report::chart::escape;

/// Named figures to be served.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    pub figures: Vec<(String, String)>,
}

impl Gallery {
    pub fn add(&mut self, name: impl Into<String>, svg: String) {
        self.figures.push((name.into(), svg));
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.figures.iter().find(|(n, _)| n == name).map(|(_, svg)| svg.as_str())
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn response(status: u16, content_type: &str, body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    let headers: Vec<Header> = Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
        .ok()
        .into_iter()
        .collect();
    Response::new(StatusCode(status), headers, Cursor::new(bytes), Some(len), None)
}

/// Resolves a request path to `(status, content type, body)`.
///
/// - `/`                   — index page embedding every figure
/// - `/figures/{name}.svg` — one raw figure
fn route(url: &str, gallery: &Gallery) -> (u16, &'static str, String) {
    let path = url.split('?').next().unwrap_or("");
    if path == "/" || path == "/index.html" {
        return (200, "text/html; charset=utf-8", index_page(gallery));
    }
    if let Some(name) = path.strip_prefix("/figures/").and_then(|p| p.strip_suffix(".svg")) {
        if let Some(svg) = gallery.get(name) {
            return (200, "image/svg+xml", svg.to_owned());
        }
    }
    (404, "text/plain", "404 Not Found".to_owned())
}

fn index_page(gallery: &Gallery) -> String {
    let sections: String = gallery.figures.iter()
        .map(|(name, svg)| {
            format!(
                "<section>\n<h2>{}</h2>\n{}\n<p><a href=\"/figures/{}.svg\">raw svg</a></p>\n</section>",
                escape(name), svg, escape(name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>ferrite-xor</title>\
         <style>body{{font-family:sans-serif;margin:24px;color:#333}}</style></head>\n\
         <body>\n<h1>Training curves</h1>\n{}\n</body>\n</html>\n",
        sections
    )
}

/// Serves `gallery` on `addr` until the process is stopped.
/// Requests are handled one at a time on the calling thread.
pub fn serve(addr: &str, gallery: &Gallery) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| NnError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string())))?;

    println!("Serving {} figure(s) at http://{}", gallery.figures.len(), addr);

    for request in server.incoming_requests() {
        let (status, content_type, body) = route(request.url(), gallery);
        if let Err(e) = request.respond(response(status, content_type, body)) {
            eprintln!("failed to send response: {}", e);
        }
    }
    Ok(())
}
