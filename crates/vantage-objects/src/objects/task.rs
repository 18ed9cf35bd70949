//! Task objects: controller-side programs.

use crate::base::{SystemObject, VantageObject};
use crate::catalog::ConfigObject;
use crate::interfaces::TaskInterface;
use crate::StatefulObject;
use vantage_command::StatusCategory;
use vantage_common::{parse_bool, ClientResult, XmlElement};

/// A task programmed on the controller.
#[derive(Debug, Clone, Default)]
pub struct Task {
    /// Common object fields.
    pub system: SystemObject,
    /// Whether the task is currently running.
    pub running: Option<bool>,
    /// The task's state flag.
    pub state: Option<bool>,
}

impl Task {
    /// Decode a `<Task>` element.
    pub fn from_xml(el: &XmlElement) -> ClientResult<Self> {
        Ok(Self {
            system: SystemObject::from_xml(el)?,
            running: None,
            state: None,
        })
    }

    fn update_running(&mut self, running: bool) -> Vec<&'static str> {
        if self.running == Some(running) {
            Vec::new()
        } else {
            self.running = Some(running);
            vec!["running"]
        }
    }

    fn update_state(&mut self, state: bool) -> Vec<&'static str> {
        if self.state == Some(state) {
            Vec::new()
        } else {
            self.state = Some(state);
            vec!["state"]
        }
    }
}

impl VantageObject for Task {
    fn base(&self) -> &SystemObject {
        &self.system
    }

    fn base_mut(&mut self) -> &mut SystemObject {
        &mut self.system
    }
}

impl TaskInterface for Task {}

impl StatefulObject for Task {
    fn from_config(object: ConfigObject) -> Option<Self> {
        match object {
            ConfigObject::Task(task) => Some(task),
            _ => None,
        }
    }

    fn apply_config(&mut self, new: Self) -> Vec<&'static str> {
        self.system.apply_config(new.system)
    }

    async fn fetch_state(&mut self) -> ClientResult<Vec<&'static str>> {
        let mut changed = Vec::new();
        let running = self.is_running().await?;
        changed.extend(self.update_running(running));
        let state = self.get_state().await?;
        changed.extend(self.update_state(state));
        Ok(changed)
    }

    fn handle_object_status(
        &mut self,
        method: &str,
        result: &str,
        _args: &[String],
    ) -> Vec<&'static str> {
        match method {
            "Task.IsRunning" => match parse_bool(result) {
                Ok(running) => self.update_running(running),
                Err(_) => Vec::new(),
            },
            "Task.GetState" => match parse_bool(result) {
                Ok(state) => self.update_state(state),
                Err(_) => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn handle_category_status(
        &mut self,
        category: &StatusCategory,
        args: &[String],
    ) -> Vec<&'static str> {
        // S:TASK <vid> <state (0/1)>
        if *category != StatusCategory::Task {
            return Vec::new();
        }
        match args.first().map(|arg| parse_bool(arg)) {
            Some(Ok(state)) => self.update_state(state),
            _ => Vec::new(),
        }
    }
}
