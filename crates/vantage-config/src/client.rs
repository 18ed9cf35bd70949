//! Connection handling and RPC plumbing for the Configuration service.

use crate::methods::{
    self, parse_bool_return, parse_int_return, parse_object_return, VersionInfo,
};
use crate::stream::ObjectStream;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use vantage_common::{
    connect, ClientError, ClientResult, MaybeTlsStream, VantageConfig, Vid, XmlElement,
};

/// Maximum size of a single RPC response. Whole-object results for large
/// systems can exceed a megabyte.
const RESPONSE_BUFFER_LIMIT: usize = 4 * 1024 * 1024;

/// Client for the Configuration (ACI) service.
///
/// The protocol does not tag requests, so responses correspond to the oldest
/// outstanding request; a single lock serialises all in-flight RPCs on the
/// connection. Concurrent callers queue in FIFO order.
///
/// The connection is opened lazily on first use, authenticating when
/// credentials are configured. Cloning the client shares the connection.
#[derive(Debug, Clone)]
pub struct ConfigClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    host: String,
    port: u16,
    tls: bool,
    username: Option<String>,
    password: Option<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
    page_size: u32,
    connection: Mutex<Option<MaybeTlsStream>>,
}

impl ConfigClient {
    /// Create a client from the shared configuration.
    pub fn new(config: &VantageConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                host: config.host.clone(),
                port: config.config_port(),
                tls: config.config_service.tls,
                username: config.username.clone(),
                password: config.password.clone(),
                connect_timeout: config.config_service.connect_timeout,
                read_timeout: config.config_service.read_timeout,
                page_size: config.page_size,
                connection: Mutex::new(None),
            }),
        }
    }

    /// The configured page size for object enumeration.
    pub fn page_size(&self) -> u32 {
        self.inner.page_size
    }

    /// Close the connection. The next request reopens it.
    pub async fn close(&self) {
        let mut guard = self.inner.connection.lock().await;
        if let Some(mut stream) = guard.take() {
            let _ = stream.shutdown().await;
            debug!("configuration connection closed");
        }
    }

    /// Authenticate with the given credentials via `ILogin.Login`.
    pub async fn login(&self, user: &str, password: &str) -> ClientResult<bool> {
        let ret = self
            .request("ILogin", "Login", Some(methods::render_login(user, password)))
            .await?;
        parse_bool_return(&ret)
    }

    /// Open a server-side cursor over objects matching the given wire tags
    /// and/or XPath expression, returning the filter handle.
    pub async fn open_filter(
        &self,
        object_types: &[&str],
        xpath: Option<&str>,
    ) -> ClientResult<i32> {
        let body = methods::render_open_filter(object_types, xpath);
        let ret = self
            .request("IConfiguration", "OpenFilter", Some(body))
            .await?;
        parse_int_return(&ret)
    }

    /// Fetch up to `count` objects from an open filter. An empty result
    /// denotes end-of-cursor.
    pub async fn get_filter_results(
        &self,
        handle: i32,
        count: u32,
        whole_object: bool,
    ) -> ClientResult<Vec<XmlElement>> {
        let body = methods::render_get_filter_results(handle, count, whole_object);
        let ret = self
            .request("IConfiguration", "GetFilterResults", Some(body))
            .await?;
        Ok(parse_object_return(&ret))
    }

    /// Release a filter handle.
    pub async fn close_filter(&self, handle: i32) -> ClientResult<bool> {
        let ret = self
            .request("IConfiguration", "CloseFilter", Some(handle.to_string()))
            .await?;
        parse_bool_return(&ret)
    }

    /// Batch-fetch objects by VID.
    pub async fn get_objects_by_vid(&self, vids: &[Vid]) -> ClientResult<Vec<XmlElement>> {
        let ret = self
            .request(
                "IConfiguration",
                "GetObject",
                Some(methods::render_get_object(vids)),
            )
            .await?;
        Ok(parse_object_return(&ret))
    }

    /// Fetch a single object by VID.
    pub async fn get_object_by_vid(&self, vid: Vid) -> ClientResult<Option<XmlElement>> {
        let mut objects = self.get_objects_by_vid(&[vid]).await?;
        if objects.is_empty() {
            Ok(None)
        } else {
            Ok(Some(objects.remove(0)))
        }
    }

    /// Fetch the controller's firmware version tuple.
    pub async fn get_version(&self) -> ClientResult<VersionInfo> {
        let ret = self.request("IIntrospection", "GetVersion", None).await?;
        Ok(VersionInfo::from_return(&ret))
    }

    /// Enumerate all objects matching the given wire tags, paging through a
    /// server-side filter. Pass an empty type list for all objects.
    pub async fn get_objects(&self, object_types: &[&str]) -> ClientResult<ObjectStream<'_>> {
        ObjectStream::open(self, object_types, None, self.inner.page_size).await
    }

    /// Enumerate objects matching an XPath expression,
    /// e.g. `"/Load"` or `"/*[@VID='12']"`.
    pub async fn get_objects_by_xpath(&self, xpath: &str) -> ClientResult<ObjectStream<'_>> {
        ObjectStream::open(self, &[], Some(xpath), self.inner.page_size).await
    }

    /// Issue an RPC and return the parsed `<return>` element.
    ///
    /// The request is wrapped in the interface/method envelope; the response
    /// is read until the closing `</IInterface>` tag followed by a newline.
    pub async fn request(
        &self,
        interface: &str,
        method: &str,
        call_body: Option<String>,
    ) -> ClientResult<XmlElement> {
        let call = match call_body {
            Some(body) => format!("<call>{body}</call>"),
            None => "<call/>".to_string(),
        };
        let request = format!("<{interface}><{method}>{call}</{method}></{interface}>");

        let mut guard = self.inner.connection.lock().await;
        if guard.is_none() {
            *guard = Some(self.open_connection().await?);
        }
        let stream = guard.as_mut().ok_or_else(|| {
            ClientError::Connection("configuration connection unavailable".into())
        })?;

        match self.exchange(stream, interface, &request).await {
            Ok(response) => Self::extract_return(&response, interface, method),
            Err(err) => {
                // The stream is no longer aligned with the request queue
                *guard = None;
                Err(err)
            }
        }
    }

    async fn open_connection(&self) -> ClientResult<MaybeTlsStream> {
        let inner = &self.inner;
        let mut stream = connect(&inner.host, inner.port, inner.tls, inner.connect_timeout).await?;
        info!(
            host = %inner.host,
            port = inner.port,
            tls = inner.tls,
            "configuration service connected"
        );

        if let (Some(user), Some(password)) = (&inner.username, &inner.password) {
            let request = format!(
                "<ILogin><Login><call>{}</call></Login></ILogin>",
                methods::render_login(user, password)
            );
            let response = self.exchange(&mut stream, "ILogin", &request).await?;
            let ret = Self::extract_return(&response, "ILogin", "Login")?;
            if !parse_bool_return(&ret)? {
                return Err(ClientError::LoginFailed(
                    "authentication failed, bad username or password".into(),
                ));
            }
            info!("configuration service login successful");
        }

        Ok(stream)
    }

    /// Write a request and read the response up to the envelope terminator.
    async fn exchange(
        &self,
        stream: &mut MaybeTlsStream,
        interface: &str,
        request: &str,
    ) -> ClientResult<String> {
        use tokio::io::AsyncReadExt;

        debug!(request, "sending configuration request");
        stream.write_all(request.as_bytes()).await?;
        stream.flush().await?;

        // The trailing newline after the closing root tag is the read
        // terminator.
        let terminator = format!("</{interface}>\n");
        let terminator = terminator.as_bytes();

        let mut buffer: Vec<u8> = Vec::with_capacity(4096);
        let mut chunk = [0u8; 4096];
        loop {
            let n = timeout(self.inner.read_timeout, stream.read(&mut chunk))
                .await
                .map_err(|_| {
                    ClientError::Timeout("timed out waiting for configuration response".into())
                })??;
            if n == 0 {
                return Err(ClientError::Connection(
                    "connection closed while reading response".into(),
                ));
            }

            let search_from = buffer.len().saturating_sub(terminator.len());
            buffer.extend_from_slice(&chunk[..n]);

            if let Some(pos) = find_subsequence(&buffer[search_from..], terminator) {
                buffer.truncate(search_from + pos + terminator.len());
                break;
            }

            if buffer.len() > RESPONSE_BUFFER_LIMIT {
                return Err(ClientError::Response(format!(
                    "configuration response exceeds {RESPONSE_BUFFER_LIMIT} bytes"
                )));
            }
        }

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Parse the response envelope and extract the method's `<return>`.
    fn extract_return(response: &str, interface: &str, method: &str) -> ClientResult<XmlElement> {
        let root = XmlElement::parse(response)?;
        if root.name != interface {
            return Err(ClientError::Response(format!(
                "expected <{interface}> envelope, got <{}>",
                root.name
            )));
        }

        let method_el = root.child(method).ok_or_else(|| {
            ClientError::Response(format!(
                "response from {interface} did not contain a <{method}> element"
            ))
        })?;

        if let Some(error) = method_el.child_text("error") {
            warn!(interface, method, error, "configuration RPC returned an error");
        }

        method_el.child("return").cloned().ok_or_else(|| {
            ClientError::Response(format!(
                "response from {interface}.{method} did not contain a return value"
            ))
        })
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_return() {
        let response = "<IConfiguration><OpenFilter><return>123</return>\
                        </OpenFilter></IConfiguration>\n";
        let ret = ConfigClient::extract_return(response, "IConfiguration", "OpenFilter").unwrap();
        assert_eq!(ret.text, "123");
    }

    #[test]
    fn test_extract_return_missing_method() {
        let response = "<IConfiguration><CloseFilter><return>true</return>\
                        </CloseFilter></IConfiguration>\n";
        let err =
            ConfigClient::extract_return(response, "IConfiguration", "OpenFilter").unwrap_err();
        assert!(matches!(err, ClientError::Response(_)));
    }

    #[test]
    fn test_extract_return_missing_return() {
        let response = "<ILogin><Login><call/></Login></ILogin>\n";
        let err = ConfigClient::extract_return(response, "ILogin", "Login").unwrap_err();
        assert!(matches!(err, ClientError::Response(_)));
    }

    #[test]
    fn test_find_subsequence() {
        assert_eq!(find_subsequence(b"abcdef", b"cd"), Some(2));
        assert_eq!(find_subsequence(b"abcdef", b"fg"), None);
    }
}
