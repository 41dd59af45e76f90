//! Theme stylesheet endpoint.
//!
//! Pages link a per-page stylesheet such as
//! `/content/site/en.theme-variables.css`. The request is bound to this
//! endpoint only when all of the following hold: the method is `GET`, the
//! selector is `theme-variables`, the extension is `css`, and the resource
//! is one of the page types in [`RESOURCE_TYPES`]. The body is the theme CSS
//! for the configuration resolved at the resource path.

use crate::config::ThemeResolver;
use crate::theme::{self, ThemeSource};
use tracing::{debug, warn};

pub const THEME_SELECTOR: &str = "theme-variables";
pub const EXTENSION: &str = "css";
pub const METHOD: &str = "GET";
pub const CONTENT_TYPE: &str = "text/css;charset=UTF-8";
pub const CACHE_CONTROL: &str = "public, max-age=3600";

pub const RESOURCE_TYPES: &[&str] = &[
    "adobexp/components/global/pages/page/v1/page",
    "adobexp/components/global/pages/rootpage/v1/rootpage",
    "cq/experience-fragments/components/xfpage",
];

/// A request path split into resource path, selectors and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    pub resource_path: String,
    pub selectors: Vec<String>,
    pub extension: Option<String>,
}

impl RequestPath {
    /// Split `/a/b.sel1.sel2.ext`. Only the last path segment is split on
    /// dots, so `/content/v1.2/page` keeps its dotted folder.
    pub fn parse(path: &str) -> Self {
        let (dir, last) = match path.rfind('/') {
            Some(i) => path.split_at(i + 1),
            None => ("", path),
        };
        let mut parts = last.split('.');
        let name = parts.next().unwrap_or_default();
        let mut rest: Vec<String> = parts.map(str::to_string).collect();
        let extension = rest.pop();
        RequestPath {
            resource_path: format!("{dir}{name}"),
            selectors: rest,
            extension,
        }
    }

    fn has_selector(&self, selector: &str) -> bool {
        self.selectors.iter().any(|s| s == selector)
    }
}

/// A rendered stylesheet with the headers it must be served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssResponse {
    pub content_type: &'static str,
    pub cache_control: &'static str,
    pub body: String,
}

impl CssResponse {
    fn new(body: String) -> Self {
        CssResponse {
            content_type: CONTENT_TYPE,
            cache_control: CACHE_CONTROL,
            body,
        }
    }
}

/// Whether a request is bound to the theme stylesheet.
pub fn binds(method: &str, request: &RequestPath, resource_type: &str) -> bool {
    method.eq_ignore_ascii_case(METHOD)
        && request.has_selector(THEME_SELECTOR)
        && request.extension.as_deref() == Some(EXTENSION)
        && RESOURCE_TYPES.contains(&resource_type)
}

/// Serve the theme stylesheet, or `None` when the request is not bound here.
///
/// A configuration that cannot be resolved is logged and replaced by the
/// all-defaults stylesheet; the response itself never fails.
pub fn serve(
    method: &str,
    request: &RequestPath,
    resource_type: &str,
    resolver: &ThemeResolver,
) -> Option<CssResponse> {
    if !binds(method, request, resource_type) {
        debug!(method, resource_type, "request not bound to theme stylesheet");
        return None;
    }
    let config = match resolver.resolve(&request.resource_path) {
        Ok(config) => Some(config),
        Err(error) => {
            warn!(path = %request.resource_path, %error, "theme config unavailable, using defaults");
            None
        }
    };
    let source = config
        .as_ref()
        .filter(|c| !c.is_empty())
        .map(|c| c as &dyn ThemeSource);
    Some(CssResponse::new(theme::render(source)))
}
