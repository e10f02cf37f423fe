//! Tool dispatch - the single entry point for every incoming tool call.
//!
//! Resolution happens before the session is touched, so an unknown tool
//! never constructs (or even inspects) the client handle. Handler failures
//! are wrapped with the tool name and forwarded; nothing is swallowed,
//! retried, or timed out here.

use rmcp::model::{Content, JsonObject};
use tracing::debug;

use super::error::DispatchError;
use super::registry::ToolRegistry;
use crate::core::session::Session;

/// Resolve `name` against the registry and invoke its handler with the
/// session's client handle.
pub async fn dispatch(
    registry: &ToolRegistry,
    session: &Session,
    name: &str,
    arguments: JsonObject,
) -> Result<Vec<Content>, DispatchError> {
    let handler = registry
        .resolve(name)
        .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?
        .clone();

    let client = session.client()?;

    debug!(tool = name, "dispatching tool call");
    handler(client, arguments)
        .await
        .map_err(|source| DispatchError::Execution {
            name: name.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use rmcp::model::{RawContent, Tool};
    use schemars::JsonSchema;
    use serde::Deserialize;

    use super::*;
    use crate::core::config::CredentialsConfig;
    use crate::core::session::SessionState;
    use crate::domains::tools::error::HandlerError;
    use crate::domains::tools::module::{
        CapabilityModule, Handler, HandlerOutput, handler, tool,
    };
    use crate::helix::HelixClient;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct PingParams {}

    #[derive(Debug, Deserialize, JsonSchema)]
    struct GreetParams {
        name: String,
    }

    async fn ping(_client: Arc<HelixClient>, _params: PingParams) -> HandlerOutput {
        Ok(vec![Content::text("pong")])
    }

    async fn greet(_client: Arc<HelixClient>, params: GreetParams) -> HandlerOutput {
        Ok(vec![Content::text(format!("hello {}", params.name))])
    }

    struct PingModule;

    impl CapabilityModule for PingModule {
        fn describe(&self) -> Vec<Tool> {
            vec![
                tool::<PingParams>("ping", "Reply with pong"),
                tool::<GreetParams>("greet", "Greet someone by name"),
            ]
        }

        fn handlers(&self) -> HashMap<String, Handler> {
            HashMap::from([
                ("ping".to_string(), handler(ping)),
                ("greet".to_string(), handler(greet)),
            ])
        }
    }

    fn test_session() -> Session {
        Session::lazy(CredentialsConfig {
            client_id: Some("id".to_string()),
            client_secret: Some("secret".to_string()),
            access_token: Some("token".to_string()),
            refresh_token: Some("refresh".to_string()),
            token_file: None,
        })
    }

    fn registry() -> ToolRegistry {
        let modules: Vec<Box<dyn CapabilityModule>> = vec![Box::new(PingModule)];
        ToolRegistry::build(&modules)
    }

    fn text_of(content: &[Content]) -> String {
        match &content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tool_never_touches_the_session() {
        let registry = registry();
        let session = test_session();

        let err = tokio_test::block_on(dispatch(
            &registry,
            &session,
            "nonexistent",
            JsonObject::new(),
        ))
        .unwrap_err();

        assert!(matches!(err, DispatchError::UnknownTool(name) if name == "nonexistent"));
        // Resolution failed before the lazy session ever built a client.
        assert_eq!(session.state(), SessionState::Uninitialized);
    }

    #[test]
    fn test_ping_end_to_end() {
        let registry = registry();
        let session = test_session();

        let names: Vec<_> = registry.catalog().iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"ping"));

        let content =
            tokio_test::block_on(dispatch(&registry, &session, "ping", JsonObject::new()))
                .unwrap();
        assert_eq!(text_of(&content), "pong");
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_missing_required_field_fails_validation() {
        let registry = registry();
        let session = test_session();

        let err = tokio_test::block_on(dispatch(
            &registry,
            &session,
            "greet",
            JsonObject::new(),
        ))
        .unwrap_err();

        match err {
            DispatchError::Execution { name, source } => {
                assert_eq!(name, "greet");
                assert!(matches!(source, HandlerError::Validation(msg) if msg.contains("name")));
            }
            other => panic!("expected Execution, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_after_close_is_refused() {
        let registry = registry();
        let session = test_session();
        session.close();

        let err = tokio_test::block_on(dispatch(
            &registry,
            &session,
            "ping",
            JsonObject::new(),
        ))
        .unwrap_err();
        assert!(matches!(err, DispatchError::Session(_)));
    }
}
