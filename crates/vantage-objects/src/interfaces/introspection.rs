//! The `IntroSpection` interface: firmware introspection on Master objects.

use crate::interfaces::object::ObjectHandle;
use vantage_common::{ClientError, ClientResult, Param};

/// Firmware image selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FirmwareImage {
    /// The kernel image.
    Kernel = 0,
    /// The root filesystem image.
    RootFs = 1,
    /// The application image.
    Application = 2,
}

/// Methods of the `IntroSpection` interface.
pub trait IntrospectionInterface: ObjectHandle {
    /// Get the version string of a firmware image.
    ///
    /// `INVOKE <vid> IntroSpection.GetFirmwareVersion <image>` →
    /// `R:INVOKE <vid> <rcode> IntroSpection.GetFirmwareVersion <image> <version>`
    async fn get_firmware_version(&self, image: FirmwareImage) -> ClientResult<String> {
        let reply = self
            .invoke(
                "IntroSpection.GetFirmwareVersion",
                &[Param::from(image as i32)],
            )
            .await?;
        reply
            .args
            .get(1)
            .cloned()
            .ok_or_else(|| ClientError::Response("short GetFirmwareVersion reply".into()))
    }
}
