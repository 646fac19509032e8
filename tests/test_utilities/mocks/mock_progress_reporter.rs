use arm_compat::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ProgressReporter that records every line it is handed, tagged with
/// the kind of report so tests can tell warnings from status updates.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    fn record(&self, line: String) {
        self.messages.lock().unwrap().push(line);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.record(match message {
            Some(component) => format!("[{}/{}] {}", current, total, component),
            None => format!("[{}/{}]", current, total),
        });
    }

    fn report_error(&self, message: &str) {
        self.record(format!("warning: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.record(format!("done: {}", message));
    }
}
