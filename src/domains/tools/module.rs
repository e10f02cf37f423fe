//! The capability module contract.
//!
//! Every Helix API domain implements [`CapabilityModule`]: a descriptor list
//! for discovery and a name→handler map for dispatch, with identical name
//! sets. Modules are self-contained: no module depends on another, and each
//! is usable in isolation for its own unit tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use super::error::HandlerError;
use crate::helix::HelixClient;

/// What a handler invocation produces: text content blocks or a failure.
pub type HandlerOutput = Result<Vec<Content>, HandlerError>;

/// A registered tool handler.
///
/// Borrows the shared client handle, decodes the raw argument object, and
/// performs (at most) one Helix round trip. Stateless across invocations.
pub type Handler =
    Arc<dyn Fn(Arc<HelixClient>, JsonObject) -> BoxFuture<'static, HandlerOutput> + Send + Sync>;

/// A group of related tools for one API domain.
pub trait CapabilityModule: Send + Sync {
    /// Tool descriptors for discovery, in presentation order.
    fn describe(&self) -> Vec<Tool>;

    /// Handlers for dispatch. The key set must equal the names in
    /// [`describe`](Self::describe); a mismatch is a programming error
    /// caught by the module's own tests.
    fn handlers(&self) -> HashMap<String, Handler>;
}

/// Decode a raw argument object into a typed request.
///
/// The serde error message carries the field-level cause ("missing field
/// `broadcaster_id`", "invalid type: ..."), which is exactly what the caller
/// should see.
pub fn decode<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, HandlerError> {
    serde_json::from_value(serde_json::Value::Object(arguments))
        .map_err(|e| HandlerError::Validation(e.to_string()))
}

/// Build a tool descriptor whose input schema is derived from the request
/// type the handler decodes into.
pub fn tool<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Tool {
    Tool {
        name: name.into(),
        description: Some(description.into()),
        input_schema: cached_schema_for_type::<P>(),
        annotations: None,
        output_schema: None,
        icons: None,
        meta: None,
        title: None,
    }
}

/// Wrap a typed async handler function into a registrable [`Handler`].
///
/// The decode step runs first, so validation failures never reach the
/// network.
pub fn handler<P, F, Fut>(f: F) -> Handler
where
    P: DeserializeOwned + Send + 'static,
    F: Fn(Arc<HelixClient>, P) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = HandlerOutput> + Send + 'static,
{
    Arc::new(move |client, arguments| {
        let f = f.clone();
        async move {
            let params = decode::<P>(arguments)?;
            f(client, params).await
        }
        .boxed()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct EchoParams {
        message: String,
    }

    #[test]
    fn test_decode_reports_missing_field() {
        let err = decode::<EchoParams>(JsonObject::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid arguments"));
        assert!(msg.contains("message"));
    }

    #[test]
    fn test_decode_success() {
        let mut args = JsonObject::new();
        args.insert("message".to_string(), "hello".into());
        let params = decode::<EchoParams>(args).unwrap();
        assert_eq!(params.message, "hello");
    }

    #[test]
    fn test_handler_rejects_bad_arguments_without_client_use() {
        use crate::helix::Credentials;

        async fn echo(_client: Arc<HelixClient>, params: EchoParams) -> HandlerOutput {
            Ok(vec![Content::text(params.message)])
        }

        let wrapped = handler(echo);
        let client = Arc::new(HelixClient::new(Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            access_token: "token".into(),
            refresh_token: "refresh".into(),
        }));

        let mut args = JsonObject::new();
        args.insert("message".to_string(), 42.into());
        let result = tokio_test::block_on(wrapped(client, args));
        assert!(matches!(result, Err(HandlerError::Validation(_))));
    }
}
