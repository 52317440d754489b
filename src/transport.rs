//! Blocking HTTP access to the image service.

use super::Result;
use reqwest::blocking::Client;
use reqwest::redirect;
use std::time::Duration;

/// The HTTP requests the program makes, one at a time.
pub trait Transport {
    /// GET `url` and return the body. Non-success statuses are errors.
    fn get(&self, url: &str) -> Result<Vec<u8>>;

    /// HEAD `url` and return the status code. Redirects are not followed.
    fn head(&self, url: &str) -> Result<u16>;
}

/// [`Transport`] backed by `reqwest`'s blocking client.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    probe: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(user_agent)
            .build()?;

        let probe = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self { client, probe })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }

    fn head(&self, url: &str) -> Result<u16> {
        let response = self.probe.head(url).send()?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    /// Canned responses keyed by URL. Unknown URLs fail like a refused
    /// connection.
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        bodies: HashMap<String, Vec<u8>>,
        statuses: HashMap<String, u16>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
            self.bodies.insert(url.into(), body.into());
            self
        }

        pub(crate) fn with_head(mut self, url: impl Into<String>, status: u16) -> Self {
            self.statuses.insert(url.into(), status);
            self
        }

        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    fn refused(url: &str) -> crate::Error {
        io::Error::new(io::ErrorKind::ConnectionRefused, url.to_string()).into()
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str) -> Result<Vec<u8>> {
            self.requests.borrow_mut().push(format!("GET {}", url));
            self.bodies.get(url).cloned().ok_or_else(|| refused(url))
        }

        fn head(&self, url: &str) -> Result<u16> {
            self.requests.borrow_mut().push(format!("HEAD {}", url));
            self.statuses.get(url).copied().ok_or_else(|| refused(url))
        }
    }

    #[test]
    fn build_http_transport() {
        assert!(HttpTransport::new().is_ok());
    }
}
