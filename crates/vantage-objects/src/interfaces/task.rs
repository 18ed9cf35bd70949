//! The `Task` interface.

use crate::interfaces::object::ObjectHandle;
use vantage_common::{parse_bool, ClientResult, Param};

/// Methods of the `Task` interface.
pub trait TaskInterface: ObjectHandle {
    /// Whether the task is currently running.
    ///
    /// `INVOKE <vid> Task.IsRunning` →
    /// `R:INVOKE <vid> <running (0/1)> Task.IsRunning`
    async fn is_running(&self) -> ClientResult<bool> {
        let reply = self.invoke("Task.IsRunning", &[]).await?;
        parse_bool(&reply.result)
    }

    /// Get the task's state value.
    ///
    /// `INVOKE <vid> Task.GetState` →
    /// `R:INVOKE <vid> <state> Task.GetState`
    async fn get_state(&self) -> ClientResult<bool> {
        let reply = self.invoke("Task.GetState", &[]).await?;
        parse_bool(&reply.result)
    }

    /// Start the task.
    ///
    /// `INVOKE <vid> Task.Start <source> <event> <param1> <param2>` →
    /// `R:INVOKE <vid> <rcode> Task.Start …`
    async fn start(&self) -> ClientResult<()> {
        self.invoke(
            "Task.Start",
            &[
                Param::from(0u32),
                Param::from(0u32),
                Param::from(0u32),
                Param::from(0u32),
            ],
        )
        .await?;
        Ok(())
    }

    /// Stop a running task.
    ///
    /// `INVOKE <vid> Task.Stop` → `R:INVOKE <vid> <rcode> Task.Stop`
    async fn stop(&self) -> ClientResult<()> {
        self.invoke("Task.Stop", &[]).await?;
        Ok(())
    }
}
