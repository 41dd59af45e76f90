//! # Site Adapters
//!
//! Server-side adapters between authored site content and the pages built
//! from it. Three jobs, each usable on its own:
//!
//! - **Link rewriting**: repository paths such as `/content/dam/site/logo.svg`
//!   become the public paths visitors see, driven by a prefix table.
//! - **Component models**: authored component nodes become typed structs a
//!   renderer can consume directly.
//! - **Theme stylesheets**: per-site configuration becomes a block of CSS
//!   custom properties for a dark and a light theme.
//!
//! # Data Flow
//!
//! ```text
//! adapters.toml ──► RewriteRules ──► UrlRewriter ──► links::publish_url
//!                                                    links::transform_property
//! content.json  ──► ContentTree  ──► models::adapt ──► ComponentModel
//! conf/**/theme.toml ──► ThemeResolver ──► theme::render ──► stylesheet::serve
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`rewrite`] | Immutable prefix table and the swappable service holding it |
//! | [`links`] | Authoring-mode aware link publishing for template properties |
//! | [`node`] | Read-only content-node access and the JSON export reader |
//! | [`models`] | Component models and the resource-type registry |
//! | [`theme`] | Theme variable tables and the CSS renderer |
//! | [`stylesheet`] | Request binding and response headers for the theme CSS |
//! | [`config`] | `adapters.toml` loading and the `theme.toml` cascade |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## First Match, Not Longest Match
//!
//! Rewrite mappings are tried in the order they were configured and the first
//! matching prefix wins. Operators control precedence by ordering entries, so
//! a specific prefix must come before a general one.
//!
//! ## Rebuild, Then Swap
//!
//! The rewrite table is never edited in place. Reconfiguration builds a new
//! table and swaps the pointer, so a concurrent `publish_url` sees one table
//! from start to finish.
//!
//! ## Models Never Fail
//!
//! Authored content is often incomplete. Models read every property as
//! optional, drop multifield items missing their required field, and fill the
//! documented defaults. The theme renderer follows the same rule: any value it
//! cannot read falls back to the stock default and the stylesheet is still
//! served.

pub mod config;
pub mod links;
pub mod models;
pub mod node;
pub mod output;
pub mod rewrite;
pub mod stylesheet;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
