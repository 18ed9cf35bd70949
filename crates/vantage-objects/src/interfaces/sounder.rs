//! The `Sounder` interface: keypad beepers.

use crate::interfaces::object::ObjectHandle;
use vantage_common::{parse_bool, ClientResult, Param};

/// Methods of the `Sounder` interface.
pub trait SounderInterface: ObjectHandle {
    /// Whether the sounder is on.
    ///
    /// `INVOKE <vid> Sounder.GetStatus` →
    /// `R:INVOKE <vid> <status (0/1)> Sounder.GetStatus`
    async fn get_sounder_status(&self) -> ClientResult<bool> {
        let reply = self.invoke("Sounder.GetStatus", &[]).await?;
        parse_bool(&reply.result)
    }

    /// Turn the sounder on or off.
    ///
    /// `INVOKE <vid> Sounder.SetStatus <status (0/1)>` →
    /// `R:INVOKE <vid> <rcode> Sounder.SetStatus <status>`
    async fn set_sounder_status(&self, on: bool) -> ClientResult<()> {
        self.invoke("Sounder.SetStatus", &[Param::from(on)]).await?;
        Ok(())
    }
}
