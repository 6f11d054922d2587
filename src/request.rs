use std::io::BufReader;

use reqwest::blocking::Client as HttpClient;
use reqwest::StatusCode;

use crate::parse::{scan, ItemEntry};
use crate::query::SearchQuery;
use crate::{Error, Result};

/// A staticICE region. The four deployments differ only in base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Au,
    Nz,
    Uk,
    Us,
}

impl Region {
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Au => "https://www.staticice.com.au",
            Region::Nz => "https://www.staticice.co.nz",
            Region::Uk => "https://www.staticice.co.uk",
            Region::Us => "https://www.staticice.com",
        }
    }
}

/// A client to access staticICE.
///
/// Holds no state beyond the underlying HTTP client; timeouts and other
/// transport policy belong to the [`reqwest::blocking::Client`] the caller
/// supplies.
#[derive(Debug, Clone)]
pub struct Client {
    client: HttpClient,
}

impl Client {
    /// Returns a new `Client` using the provided http client.
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Performs a search query on the provided region. The first 100 results
    /// will be returned.
    ///
    /// Fails on the first transport, status, or parse error; no partial
    /// results are returned.
    pub fn search(&self, region: Region, query: &SearchQuery) -> Result<Vec<ItemEntry>> {
        self.search_base(region.base_url(), query)
    }

    fn search_base(&self, base_url: &str, query: &SearchQuery) -> Result<Vec<ItemEntry>> {
        let url = format!("{}/cgi-bin/search.cgi?{}", base_url, query.encode());
        let resp = self.client.get(url).send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::Status(status.to_string()));
        }

        // The body is only ever read through this reader; dropping it on any
        // exit path closes the connection.
        scan(BufReader::new(resp))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(HttpClient::new())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use pretty_assertions::assert_eq;

    use super::*;

    /// Serves exactly one canned HTTP response on a local port and returns
    /// the base URL to reach it.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn search_parses_rows_from_an_ok_response() {
        let body = concat!(
            "<html><body>\n",
            r#"<tr valign="top"><td align="left"><a href="/cgi-bin/redirect.cgi?newurl=https%3A%2F%2Fshop.example%2Fssd">$123.45</a></td><td valign="bottom">Samsung 970 EVO 1TB <font size="-1"><a href="/shop">Shop Example</a> | updated: 05-03-2024</font></td>"#,
            "\n</body></html>\n",
        );
        let base = serve_once("200 OK", body);

        let client = Client::default();
        let results = client
            .search_base(&base, &SearchQuery::new().query("970 evo"))
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].price, 123.45);
        assert_eq!(results[0].seller, "Shop Example");
    }

    #[test]
    fn non_ok_status_short_circuits_before_the_body_is_read() {
        // The body holds a row whose price would fail to decode; a Status
        // error proves the parser never saw it.
        let body = concat!(
            r#"<tr valign="top"><td align="left"><a href="/x?newurl=y">$oops</a></td>"#,
            r#"<td valign="bottom">Widget<font> | updated: 01-01-2024</font></td>"#,
            "\n",
        );
        let base = serve_once("404 Not Found", body);

        let client = Client::default();
        let err = client
            .search_base(&base, &SearchQuery::new())
            .unwrap_err();

        assert!(matches!(err, Error::Status(ref status) if status.contains("404")));
    }
}
