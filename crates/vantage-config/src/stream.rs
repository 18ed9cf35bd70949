//! Paged enumeration of configuration objects.

use crate::client::ConfigClient;
use tracing::{debug, warn};
use vantage_common::{ClientResult, XmlElement};

/// Default number of objects fetched per `GetFilterResults` call.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// An iterator over the objects matched by a server-side filter.
///
/// Combines `OpenFilter`, repeated `GetFilterResults` calls, and
/// `CloseFilter`. The cursor is closed when the results are exhausted, when
/// an error occurs, or when the stream is explicitly [closed](Self::close)
/// early; closing is best-effort.
#[derive(Debug)]
pub struct ObjectStream<'a> {
    client: &'a ConfigClient,
    handle: Option<i32>,
    page: std::vec::IntoIter<XmlElement>,
    page_size: u32,
}

impl<'a> ObjectStream<'a> {
    pub(crate) async fn open(
        client: &'a ConfigClient,
        object_types: &[&str],
        xpath: Option<&str>,
        page_size: u32,
    ) -> ClientResult<ObjectStream<'a>> {
        let handle = client.open_filter(object_types, xpath).await?;
        debug!(handle, ?object_types, xpath, "opened object filter");

        Ok(Self {
            client,
            handle: Some(handle),
            page: Vec::new().into_iter(),
            page_size,
        })
    }

    /// Fetch the next object, or `None` when the cursor is exhausted.
    ///
    /// A returned error terminates the stream; the filter handle is released
    /// either way.
    pub async fn next(&mut self) -> Option<ClientResult<XmlElement>> {
        if let Some(object) = self.page.next() {
            return Some(Ok(object));
        }

        let handle = self.handle?;
        match self
            .client
            .get_filter_results(handle, self.page_size, true)
            .await
        {
            Ok(results) if results.is_empty() => {
                self.close().await;
                None
            }
            Ok(results) => {
                self.page = results.into_iter();
                self.page.next().map(Ok)
            }
            Err(err) => {
                self.close().await;
                Some(Err(err))
            }
        }
    }

    /// Collect every remaining object, failing on the first error.
    pub async fn collect_all(&mut self) -> ClientResult<Vec<XmlElement>> {
        let mut objects = Vec::new();
        while let Some(result) = self.next().await {
            objects.push(result?);
        }
        Ok(objects)
    }

    /// Release the server-side filter handle. Safe to call more than once.
    pub async fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(err) = self.client.close_filter(handle).await {
                warn!(handle, error = %err, "failed to close object filter");
            }
        }
    }
}
