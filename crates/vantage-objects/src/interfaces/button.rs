//! The `Button` interface: keypad buttons and dry contacts.

use crate::interfaces::object::ObjectHandle;
use vantage_common::{ClientError, ClientResult, Param};

/// Decode a button state token: `Down`/`Up` from invoke replies, `1`/`0`
/// from object statuses. Returns true when pressed.
pub fn parse_button_state(token: &str) -> ClientResult<bool> {
    match token {
        "Down" | "1" => Ok(true),
        "Up" | "0" => Ok(false),
        other => Err(ClientError::Decode(format!(
            "invalid button state: {other:?}"
        ))),
    }
}

/// Decode an `S:BTN` category argument: `PRESS` or `RELEASE`.
pub fn parse_button_event(token: &str) -> ClientResult<bool> {
    match token {
        "PRESS" => Ok(true),
        "RELEASE" => Ok(false),
        other => Err(ClientError::Decode(format!(
            "invalid button event: {other:?}"
        ))),
    }
}

/// Methods of the `Button` interface.
pub trait ButtonInterface: ObjectHandle {
    /// Get the state of the button.
    ///
    /// `INVOKE <vid> Button.GetState` →
    /// `R:INVOKE <vid> <state (Up/Down)> Button.GetState`
    async fn get_state(&self) -> ClientResult<bool> {
        let reply = self.invoke("Button.GetState", &[]).await?;
        parse_button_state(&reply.result)
    }

    /// Set the state of the button.
    ///
    /// `INVOKE <vid> Button.SetState <state (0/1)>` →
    /// `R:INVOKE <vid> <rcode> Button.SetState <state>`
    async fn set_state(&self, pressed: bool) -> ClientResult<()> {
        self.invoke("Button.SetState", &[Param::from(pressed)])
            .await?;
        Ok(())
    }

    /// Press the button.
    async fn press(&self) -> ClientResult<()> {
        self.set_state(true).await
    }

    /// Release the button.
    async fn release(&self) -> ClientResult<()> {
        self.set_state(false).await
    }

    /// Press and release the button.
    async fn press_and_release(&self) -> ClientResult<()> {
        self.press().await?;
        self.release().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_button_state() {
        assert!(parse_button_state("Down").unwrap());
        assert!(parse_button_state("1").unwrap());
        assert!(!parse_button_state("Up").unwrap());
        assert!(!parse_button_state("0").unwrap());
        assert!(parse_button_state("SIDEWAYS").is_err());
    }

    #[test]
    fn test_parse_button_event() {
        assert!(parse_button_event("PRESS").unwrap());
        assert!(!parse_button_event("RELEASE").unwrap());
        assert!(parse_button_event("HOLD").is_err());
    }
}
