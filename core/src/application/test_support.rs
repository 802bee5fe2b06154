// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// In-memory platform used by the application layer tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::domain::platform::{PlatformClient, PlatformError};
use crate::domain::policy::PolicyRequest;
use crate::domain::space::{Space, SpaceRef};

pub(crate) struct MockPlatform {
    current: SpaceRef,
    spaces: Vec<Space>,
    apps: HashMap<(String, String), String>,
    list_spaces_error: Mutex<Option<PlatformError>>,
    submit_error: Mutex<Option<PlatformError>>,
    calls: Mutex<Vec<String>>,
    submitted: Mutex<Vec<String>>,
}

impl MockPlatform {
    pub(crate) fn new(current_name: &str, current_guid: &str) -> Self {
        let current = Space::new(current_name, current_guid);
        Self {
            spaces: vec![current.clone()],
            current,
            apps: HashMap::new(),
            list_spaces_error: Mutex::new(None),
            submit_error: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_spaces(self, spaces: Vec<Space>) -> Self {
        Self { spaces, ..self }
    }

    /// Register an application lookup that returns exactly one match
    pub(crate) fn with_app(self, space_guid: &str, name: &str, guid: &str) -> Self {
        let body = format!(
            r#"{{"resources": [{{"guid": "{}", "name": "{}"}}]}}"#,
            guid, name
        );
        self.with_app_response(space_guid, name, &body)
    }

    pub(crate) fn with_app_response(mut self, space_guid: &str, name: &str, body: &str) -> Self {
        self.apps
            .insert((space_guid.to_string(), name.to_string()), body.to_string());
        self
    }

    pub(crate) fn with_list_spaces_error(self, error: PlatformError) -> Self {
        *self.list_spaces_error.lock() = Some(error);
        self
    }

    pub(crate) fn with_submit_error(self, error: PlatformError) -> Self {
        *self.submit_error.lock() = Some(error);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub(crate) fn submitted(&self) -> Vec<String> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl PlatformClient for MockPlatform {
    async fn current_space(&self) -> Result<SpaceRef, PlatformError> {
        self.calls.lock().push("current_space".to_string());
        Ok(self.current.clone())
    }

    async fn list_spaces(&self) -> Result<Vec<Space>, PlatformError> {
        self.calls.lock().push("list_spaces".to_string());
        match self.list_spaces_error.lock().take() {
            Some(error) => Err(error),
            None => Ok(self.spaces.clone()),
        }
    }

    async fn query_applications(
        &self,
        space_guid: &str,
        app_name: &str,
    ) -> Result<String, PlatformError> {
        self.calls
            .lock()
            .push(format!("query_applications {}@{}", app_name, space_guid));
        self.apps
            .get(&(space_guid.to_string(), app_name.to_string()))
            .cloned()
            .ok_or_else(|| PlatformError::Api {
                status: 404,
                body: format!("no application fixture for {} in {}", app_name, space_guid),
            })
    }

    async fn submit_policies(&self, request: &PolicyRequest) -> Result<String, PlatformError> {
        self.calls.lock().push("submit_policies".to_string());
        if let Some(error) = self.submit_error.lock().take() {
            return Err(error);
        }
        let body = serde_json::to_string(request)
            .map_err(|e| PlatformError::InvalidResponse(e.to_string()))?;
        self.submitted.lock().push(body);
        Ok("{}".to_string())
    }
}
