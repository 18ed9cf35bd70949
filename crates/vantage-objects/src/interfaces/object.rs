//! The base `Object` interface, available on every system object.

use crate::base::VantageObject;
use chrono::{DateTime, Utc};
use vantage_command::{CommandClient, InvokeReply};
use vantage_common::{parse_datetime, ClientError, ClientResult, Param};

/// Access to the command client for interface invocations.
pub trait ObjectHandle: VantageObject {
    /// The attached command client, or a connection error when the object
    /// has not been attached to one.
    fn command_client(&self) -> ClientResult<&CommandClient> {
        self.base().command_client.as_ref().ok_or_else(|| {
            ClientError::Connection("object is not attached to a command client".into())
        })
    }

    /// Invoke an interface method on this object.
    async fn invoke(&self, method: &str, params: &[Param]) -> ClientResult<InvokeReply> {
        self.command_client()?
            .invoke(self.vid(), method, params)
            .await
    }
}

impl<T: VantageObject> ObjectHandle for T {}

/// Methods of the `Object` interface.
pub trait ObjectInterface: ObjectHandle {
    /// Get the time this object's configuration was last mutated.
    ///
    /// `INVOKE <vid> Object.GetMTime` → `R:INVOKE <vid> <mtime> Object.GetMTime`
    async fn get_mtime(&self) -> ClientResult<DateTime<Utc>> {
        let reply = self.invoke("Object.GetMTime", &[]).await?;
        parse_datetime(&reply.result)
    }
}

impl<T: ObjectHandle> ObjectInterface for T {}
