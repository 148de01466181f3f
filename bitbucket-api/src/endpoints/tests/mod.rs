
use serde_json::{Value, json};
use wiremock::MockServer;

use crate::client::BitbucketClient;
use crate::config::ClientConfig;
use crate::models::BitbucketAuth;

/// `Authorization` header for `test_user:test_token`
const BASIC_AUTH_HEADER: &str = "Basic dGVzdF91c2VyOnRlc3RfdG9rZW4=";

fn test_client(mock_server: &MockServer) -> BitbucketClient {
  test_client_with(mock_server, |_| {})
}

fn test_client_with(mock_server: &MockServer, adjust: impl FnOnce(&mut ClientConfig)) -> BitbucketClient {
  let mut config = ClientConfig::with_base_url(&mock_server.uri()).unwrap();
  adjust(&mut config);
  let auth = BitbucketAuth::Basic {
    username: "test_user".to_string(),
    app_password: "test_token".to_string(),
  };
  BitbucketClient::from_config(config, auth).unwrap()
}

fn pull_request_json(id: u64, title: &str) -> Value {
  json!({
      "id": id,
      "title": title,
      "state": "OPEN",
      "author": { "display_name": "Test User", "uuid": "{user-1}" },
      "source": { "branch": { "name": "feature" } },
      "destination": { "branch": { "name": "main" } },
      "created_on": "2026-01-01T00:00:00.000000+00:00",
      "updated_on": "2026-01-02T00:00:00.000000+00:00"
  })
}

fn comment_json(id: u64, raw: &str) -> Value {
  json!({
      "id": id,
      "content": { "raw": raw },
      "user": { "display_name": "Reviewer" },
      "created_on": "2026-01-03T00:00:00+00:00"
  })
}

fn page_json(values: Vec<Value>) -> Value {
  json!({
      "page": 1,
      "pagelen": 10,
      "size": values.len(),
      "values": values
  })
}
