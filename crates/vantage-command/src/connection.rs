//! A single line-framed connection to the Host Command service.

use crate::response::CommandResponse;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, trace};
use vantage_common::{
    connect, encode_params, encode_string, ClientError, ClientResult, MaybeTlsStream, Param,
};

/// Maximum accepted line length. Reply lines carrying byte arrays can be
/// large, but anything beyond this indicates a framing problem.
const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// A connection to the Host Command service.
///
/// Commands on a connection are strictly sequential: a reply block belongs
/// to the oldest outstanding request. `S:`/`EL:` lines interleaved with a
/// reply block belong to the event stream and are passed to the caller's
/// sink instead.
#[derive(Debug)]
pub struct CommandConnection {
    framed: Framed<MaybeTlsStream, LinesCodec>,
    read_timeout: Duration,
}

impl CommandConnection {
    /// Open a connection, without authenticating.
    pub async fn open(
        host: &str,
        port: u16,
        tls: bool,
        connect_timeout: Duration,
        read_timeout: Duration,
    ) -> ClientResult<Self> {
        let stream = connect(host, port, tls, connect_timeout).await?;
        debug!(host, port, tls, "host command connection opened");

        Ok(Self {
            framed: Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)),
            read_timeout,
        })
    }

    /// Authenticate with `LOGIN <user> <password>`.
    pub async fn authenticate(&mut self, user: &str, password: &str) -> ClientResult<()> {
        // Always quote credentials so embedded spaces survive
        let request = format!(
            "LOGIN {} {}",
            encode_string(user, true),
            encode_string(password, true)
        );
        self.request_with_events(&request, |_| {}).await?;
        debug!("host command login successful");
        Ok(())
    }

    /// Send a command with encoded parameters and return its reply block.
    ///
    /// Returns an error for `R:ERROR` replies, and a response error when the
    /// echoed command token does not match the request (an out-of-order
    /// reply; the connection should be discarded).
    pub async fn command(
        &mut self,
        command: &str,
        params: &[Param],
    ) -> ClientResult<CommandResponse> {
        self.command_with_events(command, params, |_| {}).await
    }

    /// Like [`command`](Self::command), passing interleaved `S:`/`EL:` lines
    /// to `on_event`.
    pub async fn command_with_events(
        &mut self,
        command: &str,
        params: &[Param],
        on_event: impl FnMut(&str),
    ) -> ClientResult<CommandResponse> {
        let request = if params.is_empty() {
            command.to_string()
        } else {
            format!("{command} {}", encode_params(params))
        };

        let response = self.request_with_events(&request, on_event).await?;
        if !response.command.eq_ignore_ascii_case(command) {
            return Err(ClientError::Response(format!(
                "out-of-order reply: expected R:{command}, got R:{}",
                response.command
            )));
        }
        Ok(response)
    }

    /// Send a pre-encoded request line and collect its reply block, passing
    /// interleaved event lines to `on_event`. Error replies are mapped to
    /// their client errors.
    pub async fn request_with_events(
        &mut self,
        request: &str,
        mut on_event: impl FnMut(&str),
    ) -> ClientResult<CommandResponse> {
        trace!(request, "sending host command request");
        self.send_line(request).await?;

        let mut lines = Vec::new();
        loop {
            let line = self.read_line().await?;
            if line.starts_with("S:") || line.starts_with("EL:") {
                on_event(&line);
                continue;
            }

            let is_reply = line.starts_with("R:");
            lines.push(line);
            if is_reply {
                break;
            }
        }

        let response = CommandResponse::from_lines(lines)?;
        if let Some(error) = response.error() {
            return Err(error);
        }
        Ok(response)
    }

    /// Write a single request line.
    pub async fn send_line(&mut self, line: &str) -> ClientResult<()> {
        self.framed
            .send(line)
            .await
            .map_err(|e| ClientError::Connection(format!("write failed: {e}")))
    }

    /// Read the next line, bounded by the connection's read timeout.
    pub async fn read_line(&mut self) -> ClientResult<String> {
        timeout(self.read_timeout, self.next_line())
            .await
            .map_err(|_| ClientError::Timeout("timed out waiting for reply".into()))?
    }

    /// Read the next line, waiting indefinitely. Used by the event loop
    /// while idle between events.
    pub async fn next_line(&mut self) -> ClientResult<String> {
        match self.framed.next().await {
            Some(Ok(line)) => Ok(line),
            Some(Err(e)) => Err(ClientError::Connection(format!("read failed: {e}"))),
            None => Err(ClientError::Connection("connection closed".into())),
        }
    }
}
