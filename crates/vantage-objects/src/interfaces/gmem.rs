//! The `GMem` (variable) interface.
//!
//! Variables are read and written through the `GETVARIABLE`/`SETVARIABLE`
//! commands rather than `INVOKE`.

use crate::interfaces::object::ObjectHandle;
use vantage_common::{ClientError, ClientResult, Param};

/// Methods for reading and writing GMem variables.
pub trait GMemInterface: ObjectHandle {
    /// Get the raw value of the variable.
    ///
    /// `GETVARIABLE <vid>` → `R:GETVARIABLE <vid> <value>`
    async fn get_value(&self) -> ClientResult<String> {
        let response = self
            .command_client()?
            .command("GETVARIABLE", &[Param::from(self.vid())])
            .await?;
        response
            .args
            .get(1)
            .cloned()
            .ok_or_else(|| ClientError::Response("short GETVARIABLE reply".into()))
    }

    /// Set the value of the variable.
    ///
    /// `SETVARIABLE <vid> <value>` → `R:SETVARIABLE <vid> <value>`
    async fn set_value(&self, value: Param) -> ClientResult<()> {
        self.command_client()?
            .command("SETVARIABLE", &[Param::from(self.vid()), value])
            .await?;
        Ok(())
    }
}
