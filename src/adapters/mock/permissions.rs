//! Mock permission collaborator for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::traits::HostPermissions;

/// Permission collaborator with a scripted answer, recording every check.
#[derive(Debug, Clone)]
pub struct MockPermissions {
    granted: bool,
    checked: Arc<Mutex<Vec<String>>>,
}

impl MockPermissions {
    /// Create a mock that answers `granted` for every origin.
    pub fn new(granted: bool) -> Self {
        Self {
            granted,
            checked: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Origins that have been checked so far.
    pub fn checked_origins(&self) -> Vec<String> {
        self.checked.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostPermissions for MockPermissions {
    async fn request_host_permission(&self, origin: &str) -> bool {
        self.checked.lock().unwrap().push(origin.to_string());
        self.granted
    }
}
