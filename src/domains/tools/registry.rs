//! Tool registry - aggregates capability modules into one command surface.
//!
//! Built once at startup from the ordered module list; read-only afterwards,
//! so concurrent `resolve` calls need no synchronization. The catalog (for
//! discovery) and the dispatch map come out of the same aggregation pass and
//! cannot diverge.

use std::collections::HashMap;

use rmcp::model::Tool;
use tracing::{debug, warn};

use super::module::{CapabilityModule, Handler};

/// Immutable registry pairing tool descriptors with their handlers.
pub struct ToolRegistry {
    catalog: Vec<Tool>,
    handlers: HashMap<String, Handler>,
}

impl ToolRegistry {
    /// Aggregate the given modules, in order, into a registry.
    ///
    /// Descriptors are concatenated in module order (preserving each
    /// module's internal order). Handler maps are merged with
    /// last-write-wins on a name collision; the shadowing is logged since it
    /// almost always means two modules were wired up with the same tool
    /// name.
    pub fn build(modules: &[Box<dyn CapabilityModule>]) -> Self {
        let mut catalog = Vec::new();
        let mut handlers: HashMap<String, Handler> = HashMap::new();

        for module in modules {
            catalog.extend(module.describe());
            for (name, handler) in module.handlers() {
                if handlers.insert(name.clone(), handler).is_some() {
                    warn!(
                        tool = %name,
                        "tool name collision: a later module shadows an earlier registration"
                    );
                }
            }
        }

        debug!(tools = handlers.len(), "tool registry built");
        Self { catalog, handlers }
    }

    /// All tool descriptors, in registration order.
    pub fn catalog(&self) -> &[Tool] {
        &self.catalog
    }

    /// Look up the handler for a tool name.
    pub fn resolve(&self, name: &str) -> Option<&Handler> {
        self.handlers.get(name)
    }

    /// Number of dispatchable tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry has no tools (valid for an empty module list).
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use futures::FutureExt;
    use rmcp::model::Content;

    use super::*;
    use crate::domains::tools::module::tool;

    /// Minimal module whose every tool echoes a fixed reply.
    struct StaticModule {
        names: Vec<&'static str>,
        reply: &'static str,
    }

    #[derive(schemars::JsonSchema)]
    struct NoParams {}

    impl CapabilityModule for StaticModule {
        fn describe(&self) -> Vec<Tool> {
            self.names
                .iter()
                .map(|&name| tool::<NoParams>(name, "test tool"))
                .collect()
        }

        fn handlers(&self) -> HashMap<String, Handler> {
            let reply = self.reply;
            self.names
                .iter()
                .map(|name| {
                    let handler: Handler = Arc::new(move |_client, _args| {
                        async move { Ok(vec![Content::text(reply)]) }.boxed()
                    });
                    (name.to_string(), handler)
                })
                .collect()
        }
    }

    fn module(names: &[&'static str], reply: &'static str) -> Box<dyn CapabilityModule> {
        Box::new(StaticModule {
            names: names.to_vec(),
            reply,
        })
    }

    fn reply_of(registry: &ToolRegistry, name: &str) -> String {
        let handler = registry.resolve(name).unwrap().clone();
        let client = Arc::new(crate::helix::HelixClient::new(crate::helix::Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            access_token: "token".into(),
            refresh_token: "refresh".into(),
        }));
        let content = tokio_test::block_on(handler(client, rmcp::model::JsonObject::new())).unwrap();
        match &content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_module_list_is_valid() {
        let registry = ToolRegistry::build(&[]);
        assert!(registry.is_empty());
        assert!(registry.catalog().is_empty());
        assert!(registry.resolve("anything").is_none());
    }

    #[test]
    fn test_catalog_matches_dispatch_map() {
        let registry = ToolRegistry::build(&[
            module(&["a", "b"], "one"),
            module(&["c"], "two"),
        ]);

        let catalog_names: HashSet<String> = registry
            .catalog()
            .iter()
            .map(|t| t.name.to_string())
            .collect();
        let handler_names: HashSet<String> =
            ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        assert_eq!(catalog_names, handler_names);
        for name in &catalog_names {
            assert!(registry.resolve(name).is_some());
        }
        assert!(registry.resolve("d").is_none());
    }

    #[test]
    fn test_catalog_preserves_module_order() {
        let registry = ToolRegistry::build(&[
            module(&["b", "a"], "one"),
            module(&["c"], "two"),
        ]);
        let names: Vec<_> = registry.catalog().iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_collision_last_write_wins() {
        let registry = ToolRegistry::build(&[
            module(&["x"], "first"),
            module(&["x"], "second"),
        ]);

        // Dispatch map keeps the later module's handler; the catalog keeps
        // both descriptors, matching the blind concatenation of the
        // discovery list.
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.catalog().len(), 2);
        assert_eq!(reply_of(&registry, "x"), "second");
    }
}
