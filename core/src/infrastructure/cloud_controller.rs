// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Cloud Controller Platform Adapter
//
// Anti-Corruption Layer for the platform's REST APIs:
// - GET  /v3/spaces                          (space listing, paginated)
// - GET  /v3/apps?names=..&space_guids=..    (application lookup)
// - POST /networking/v1/external/policies    (policy submission)

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

use crate::domain::platform::{PlatformClient, PlatformError};
use crate::domain::policy::PolicyRequest;
use crate::domain::space::{Space, SpaceRef};
use crate::infrastructure::cf_config::PlatformConfig;

const SPACES_PAGE_SIZE: &str = "5000";
const POLICIES_PATH: &str = "/networking/v1/external/policies";

#[derive(Deserialize)]
struct SpacePage {
    #[serde(default)]
    pagination: Option<Pagination>,
    resources: Vec<SpaceResource>,
}

#[derive(Deserialize)]
struct Pagination {
    next: Option<Link>,
}

#[derive(Deserialize)]
struct Link {
    href: String,
}

#[derive(Deserialize)]
struct SpaceResource {
    guid: String,
    name: String,
}

pub struct CloudControllerClient {
    client: Client,
    base_url: String,
    config: PlatformConfig,
}

impl CloudControllerClient {
    pub fn new(config: PlatformConfig) -> Result<Self, PlatformError> {
        config.validate()?;

        // No timeout: a hung call hangs the run, matching the CLI's own curl.
        let client = Client::builder()
            .danger_accept_invalid_certs(config.skip_ssl_validation)
            .build()
            .map_err(|e| PlatformError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            config,
        })
    }

    /// Send an authorized request and return the body of a 2xx response
    async fn send(&self, request: RequestBuilder) -> Result<String, PlatformError> {
        let response = request
            .header(AUTHORIZATION, self.config.authorization())
            .send()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlatformError::Network(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else if status == 401 || status == 403 {
            Err(PlatformError::Authentication(body))
        } else {
            Err(PlatformError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl PlatformClient for CloudControllerClient {
    async fn current_space(&self) -> Result<SpaceRef, PlatformError> {
        self.config.current_space()
    }

    async fn list_spaces(&self) -> Result<Vec<Space>, PlatformError> {
        let mut query = vec![("per_page", SPACES_PAGE_SIZE)];
        if let Some(org) = self.config.organization_guid() {
            query.push(("organization_guids", org));
        }

        let mut request = self
            .client
            .get(format!("{}/v3/spaces", self.base_url))
            .query(&query);
        let mut spaces = Vec::new();

        loop {
            let body = self.send(request).await?;
            let page: SpacePage = serde_json::from_str(&body).map_err(|e| {
                PlatformError::InvalidResponse(format!("Failed to parse space listing: {}", e))
            })?;

            spaces.extend(
                page.resources
                    .into_iter()
                    .map(|space| Space::new(space.name, space.guid)),
            );

            match page.pagination.and_then(|p| p.next) {
                Some(next) => {
                    debug!(href = %next.href, "Fetching next page of spaces");
                    request = self.client.get(next.href);
                }
                None => break,
            }
        }

        debug!(count = spaces.len(), "Listed spaces");
        Ok(spaces)
    }

    async fn query_applications(
        &self,
        space_guid: &str,
        app_name: &str,
    ) -> Result<String, PlatformError> {
        debug!(app = app_name, space_guid, "Looking up application");
        let request = self
            .client
            .get(format!("{}/v3/apps", self.base_url))
            .query(&[("names", app_name), ("space_guids", space_guid)]);
        self.send(request).await
    }

    async fn submit_policies(&self, request: &PolicyRequest) -> Result<String, PlatformError> {
        debug!(policies = request.policies.len(), "Submitting network policies");
        let request = self
            .client
            .post(format!("{}{}", self.base_url, POLICIES_PATH))
            .json(request);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::{Destination, PortRange, Source, WirePolicy};
    use crate::infrastructure::cf_config::TargetFields;
    use mockito::Matcher;

    fn config(url: &str) -> PlatformConfig {
        PlatformConfig {
            api_endpoint: format!("{}/", url),
            access_token: "bearer token".to_string(),
            skip_ssl_validation: false,
            organization: TargetFields {
                guid: "org-guid".to_string(),
                name: "org".to_string(),
            },
            space: TargetFields {
                guid: "space-1-guid".to_string(),
                name: "space-1".to_string(),
            },
        }
    }

    #[test]
    fn test_new_requires_login() {
        let result = CloudControllerClient::new(PlatformConfig::default());
        assert!(matches!(result, Err(PlatformError::Config(_))));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_endpoint_is_ignored() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v3/spaces")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(r#"{"pagination": {"next": null}, "resources": []}"#)
            .expect(1)
            .create_async()
            .await;

        let client = CloudControllerClient::new(config(&format!("{}/", server.url()))).unwrap();
        assert!(client.list_spaces().await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_current_space_comes_from_config() {
        let client = CloudControllerClient::new(config("https://api.example.com")).unwrap();
        assert_eq!(
            client.current_space().await.unwrap(),
            Space::new("space-1", "space-1-guid")
        );
    }

    #[tokio::test]
    async fn test_list_spaces_follows_pagination() {
        let mut server = mockito::Server::new_async().await;
        let next = format!("{}/v3/spaces?page=2&per_page=5000", server.url());

        let first = server
            .mock("GET", "/v3/spaces")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("per_page".into(), "5000".into()),
                Matcher::UrlEncoded("organization_guids".into(), "org-guid".into()),
            ]))
            .match_header("authorization", "bearer token")
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"pagination": {{"next": {{"href": "{}"}}}},
                    "resources": [{{"guid": "space-1-guid", "name": "space-1"}}]}}"#,
                next
            ))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/v3/spaces")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"pagination": {"next": null},
                    "resources": [{"guid": "space-2-guid", "name": "space-2"}]}"#,
            )
            .create_async()
            .await;

        let client = CloudControllerClient::new(config(&server.url())).unwrap();
        let spaces = client.list_spaces().await.unwrap();

        assert_eq!(
            spaces,
            vec![
                Space::new("space-1", "space-1-guid"),
                Space::new("space-2", "space-2-guid"),
            ]
        );
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_spaces_rejects_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3/spaces")
            .match_query(Matcher::Any)
            .with_body("not json")
            .create_async()
            .await;

        let client = CloudControllerClient::new(config(&server.url())).unwrap();
        let err = client.list_spaces().await.unwrap_err();
        assert!(matches!(err, PlatformError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_is_authentication_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3/spaces")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"errors": [{"title": "CF-InvalidAuthToken"}]}"#)
            .create_async()
            .await;

        let client = CloudControllerClient::new(config(&server.url())).unwrap();
        let err = client.list_spaces().await.unwrap_err();
        assert!(
            matches!(err, PlatformError::Authentication(ref body) if body.contains("CF-InvalidAuthToken"))
        );
    }

    #[tokio::test]
    async fn test_query_applications_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"resources": [{"guid": "app-1-guid", "name": "my app"}]}"#;
        let mock = server
            .mock("GET", "/v3/apps")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("names".into(), "my app".into()),
                Matcher::UrlEncoded("space_guids".into(), "space-guid".into()),
            ]))
            .with_body(body)
            .create_async()
            .await;

        let client = CloudControllerClient::new(config(&server.url())).unwrap();
        let response = client.query_applications("space-guid", "my app").await.unwrap();

        assert_eq!(response, body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_policies_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", POLICIES_PATH)
            .match_header("authorization", "bearer token")
            .match_body(Matcher::JsonString(
                r#"{"policies":[{"destination":{"id":"dest","ports":{"start":80,"end":90},"protocol":"udp"},"source":{"id":"src"}}]}"#
                    .to_string(),
            ))
            .with_body("{}")
            .create_async()
            .await;

        let request = PolicyRequest::single(WirePolicy {
            destination: Destination {
                id: "dest".to_string(),
                ports: PortRange { from: 80, to: 90 },
                protocol: "udp".to_string(),
            },
            source: Source {
                id: "src".to_string(),
            },
        });

        let client = CloudControllerClient::new(config(&server.url())).unwrap();
        let response = client.submit_policies(&request).await.unwrap();

        assert_eq!(response, "{}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_policies_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", POLICIES_PATH)
            .with_status(400)
            .with_body(r#"{"error": "invalid destination port"}"#)
            .create_async()
            .await;

        let request = PolicyRequest { policies: Vec::new() };
        let client = CloudControllerClient::new(config(&server.url())).unwrap();
        let err = client.submit_policies(&request).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            r#"Platform API returned HTTP 400: {"error": "invalid destination port"}"#
        );
    }
}
