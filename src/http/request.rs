/// The first line of an HTTP request, as read off the wire.
///
/// Only the path token drives anything. Method and version are kept for
/// logging and are never validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Raw request line without its terminator (e.g. "GET /index.html HTTP/1.1")
    pub line: String,
    /// First token, usually the method
    pub method: String,
    /// Second token, the requested path (e.g. "/index.html")
    pub path: String,
    /// Third token if present
    pub version: Option<String>,
}

impl Request {
    /// Whether the client asked for a specific resource.
    ///
    /// Paths of length zero or one ("" or "/") request the welcome page.
    pub fn names_resource(&self) -> bool {
        self.path.len() > 1
    }
}
