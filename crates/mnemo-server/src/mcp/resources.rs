// crates/mnemo-server/src/mcp/resources.rs
// MCP Resource handlers: memory context as readable text

use super::MnemoServer;
use crate::tools;
use rmcp::{
    model::{
        AnnotateAble, Annotated, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, RawResource, RawResourceTemplate, ReadResourceRequestParams,
        ReadResourceResult, ResourceContents,
    },
    service::{RequestContext, RoleServer},
};

/// Resource with recent memories across all categories
pub const LOAD_ALL_URI: &str = "memory://load";

/// Prefix of the per-category resource template
pub const CATEGORY_URI_PREFIX: &str = "memory://category/";

/// Helper to wrap a raw resource/template without annotations.
fn no_ann<T: AnnotateAble>(raw: T) -> Annotated<T> {
    Annotated::new(raw, None)
}

impl MnemoServer {
    /// Build the static list of available resources.
    fn resource_list() -> Vec<Annotated<RawResource>> {
        vec![no_ann(RawResource {
            uri: LOAD_ALL_URI.into(),
            name: "memory-load".into(),
            title: Some("Recent Memories".into()),
            description: Some("Most recent memories across all categories, as context text".into()),
            mime_type: Some("text/plain".into()),
            size: None,
            icons: None,
            meta: None,
        })]
    }

    /// Build the list of resource templates (parameterized URIs).
    fn resource_template_list() -> Vec<Annotated<RawResourceTemplate>> {
        vec![no_ann(RawResourceTemplate {
            uri_template: format!("{CATEGORY_URI_PREFIX}{{category}}"),
            name: "memory-category".into(),
            title: Some("Category Memories".into()),
            description: Some("Most recent memories in one category, as context text".into()),
            mime_type: Some("text/plain".into()),
            icons: None,
        })]
    }

    /// Handle `resources/list`.
    pub(super) async fn handle_list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, rmcp::ErrorData> {
        Ok(ListResourcesResult {
            resources: Self::resource_list(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Handle `resources/templates/list`.
    pub(super) async fn handle_list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, rmcp::ErrorData> {
        Ok(ListResourceTemplatesResult {
            resource_templates: Self::resource_template_list(),
            next_cursor: None,
            meta: None,
        })
    }

    /// Handle `resources/read`.
    pub(super) async fn handle_read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, rmcp::ErrorData> {
        self.read_resource_uri(&request.uri).await
    }

    /// Dispatch a resource URI to its reader.
    pub(super) async fn read_resource_uri(
        &self,
        uri: &str,
    ) -> Result<ReadResourceResult, rmcp::ErrorData> {
        let text = match uri {
            LOAD_ALL_URI => tools::load_all_memories(self).await,
            _ if uri.starts_with(CATEGORY_URI_PREFIX) => {
                let raw = &uri[CATEGORY_URI_PREFIX.len()..];
                let category = urlencoding::decode(raw).map_err(|e| {
                    rmcp::ErrorData::invalid_params(
                        format!("Invalid category in {uri}: {e}"),
                        None,
                    )
                })?;
                tools::load_category_memories(self, category.into_owned()).await
            }
            _ => {
                return Err(rmcp::ErrorData::invalid_params(
                    format!("Unknown resource URI: {uri}"),
                    None,
                ));
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some("text/plain".into()),
                text,
                meta: None,
            }],
        })
    }
}
