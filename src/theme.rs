//! Per-site theme stylesheet generation.
//!
//! Renders two rule blocks, `.theme-dark` and `.theme-light`, whose
//! declarations are CSS custom properties. Each value comes from the site's
//! theme configuration when it is set and non-empty, otherwise from the
//! built-in default in [`DARK`] / [`LIGHT`].
//!
//! ```css
//! .theme-dark {
//!   /* Header theme variables */
//!   --header-background-color: #212020;
//!   --header-height: 60px;
//!   ...
//! }
//!
//! .theme-light {
//!   ...
//! }
//! ```
//!
//! The custom-property names and their defaults are a compatibility surface:
//! component stylesheets reference the literal `--name` strings.
//!
//! ## Failure Policy
//!
//! Configuration is read through [`ThemeSource`], one key at a time. A lookup
//! that fails is logged and treated as unset, so a single bad value falls
//! back to its default instead of blanking the stylesheet. Rendering itself
//! cannot fail.

use std::fmt::Write as _;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("theme value `{key}` must be a string, found {found}")]
    NotAString { key: String, found: &'static str },
    #[error("theme value `{key}` unavailable: {reason}")]
    Unavailable { key: String, reason: String },
}

/// Anything that can answer "what is the configured value for this key".
///
/// `Ok(None)` means unset. Errors are contained per key by [`render`].
pub trait ThemeSource {
    fn lookup(&self, key: &str) -> Result<Option<String>, ThemeError>;
}

/// Flat theme configuration resolved for one site.
///
/// Keys are the snake_case names in the `key` column of [`DARK`] and
/// [`LIGHT`], e.g. `dark_header_background_color`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeConfig {
    values: toml::Table,
}

impl ThemeConfig {
    /// Wrap an already merged table. Unknown keys are the caller's concern;
    /// see [`crate::config::ThemeResolver`].
    pub fn from_table(values: toml::Table) -> Self {
        Self { values }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), toml::Value::String(v.into())))
            .collect();
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl ThemeSource for ThemeConfig {
    fn lookup(&self, key: &str) -> Result<Option<String>, ThemeError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ThemeError::NotAString {
                key: key.to_string(),
                found: other.type_str(),
            }),
        }
    }
}

/// One line of a theme block.
#[derive(Debug, Clone, Copy)]
pub enum Decl {
    /// `/* comment */` introducing a group of declarations.
    Section(&'static str),
    /// Configurable variable with a static default.
    Var {
        property: &'static str,
        key: &'static str,
        default: &'static str,
    },
    /// Configurable variable with an empty default. When the resolved value
    /// is empty, `fallback` is emitted instead.
    VarOr {
        property: &'static str,
        key: &'static str,
        fallback: &'static str,
    },
    /// Fixed declaration, not configurable.
    Fixed {
        property: &'static str,
        value: &'static str,
    },
    /// Empty line between sections.
    Gap,
}

impl Decl {
    /// Configuration key read by this line, if any.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Decl::Var { key, .. } | Decl::VarOr { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Default written to the stock config for this line's key.
    fn stock_default(&self) -> Option<&'static str> {
        match self {
            Decl::Var { default, .. } => Some(*default),
            Decl::VarOr { .. } => Some(""),
            _ => None,
        }
    }
}

const fn var(property: &'static str, key: &'static str, default: &'static str) -> Decl {
    Decl::Var {
        property,
        key,
        default,
    }
}

const fn fixed(property: &'static str, value: &'static str) -> Decl {
    Decl::Fixed { property, value }
}

const QUOTE_CARD_GLOW: &str = "radial-gradient(closest-side at 82% 28%, rgba(246, 255, 0, 0.34), transparent 60%), radial-gradient(closest-side at 92% 10%, rgba(255, 196, 0, 0.22), transparent 58%)";

pub const DARK_SELECTOR: &str = ".theme-dark";
pub const LIGHT_SELECTOR: &str = ".theme-light";

/// Declarations of the `.theme-dark` block, in output order.
pub const DARK: &[Decl] = &[
    Decl::Section("Header theme variables"),
    var("--header-background-color", "dark_header_background_color", "#212020"),
    var("--header-height", "header_height", "60px"),
    Decl::Gap,
    Decl::Section("Text color variables - Dark theme"),
    var("--primary-text-color", "dark_primary_text_color", "#ffc846"),
    var("--secondary-text-color", "dark_secondary_text_color", "#ffedc2"),
    var("--standard-primary-site-text-color", "dark_standard_primary_site_text_color", "#ffffff"),
    var("--standard-secondary-site-text-color", "dark_standard_secondary_site_text_color", "#a2a2a2"),
    var("--standard-site-font-size", "standard_site_font_size", "16px"),
    var("--standard-site-font-weight", "standard_site_font_weight", "400"),
    Decl::Gap,
    Decl::Section("Global page"),
    var("--site-body-bg", "dark_site_body_bg", "#1e1e1e"),
    fixed("--site-body-text", "var(--standard-primary-site-text-color)"),
    Decl::Gap,
    Decl::Section("Footer"),
    var("--footer-bg", "dark_footer_bg", "#363535"),
    var("--footer-curtain-height-offset", "footer_curtain_height_offset", "-25px"),
    Decl::Gap,
    Decl::Section("Services"),
    var("--services-divider-color", "dark_services_divider_color", "rgba(255, 255, 255, 0.12)"),
    Decl::Gap,
    Decl::Section("Button theme variables - Dark theme"),
    var("--button-theme-dark-bg", "dark_button_bg", "transparent"),
    var("--button-theme-dark-text", "dark_button_text", "#ffffff"),
    var("--button-theme-dark-border", "dark_button_border", "#ffffff"),
    var("--button-theme-dark-hover-bg", "dark_button_hover_bg", "#ffffff"),
    var("--button-theme-dark-hover-text", "dark_button_hover_text", "#000000"),
    Decl::Gap,
    Decl::Section("AboutUs"),
    var("--about-us-bg", "dark_about_us_bg", "#1e1e1e"),
    Decl::Gap,
    Decl::Section("Lead Banner gradient variables - Dark theme"),
    var("--lead-banner-height", "lead_banner_height", "600px"),
    var("--lead-banner-height-mobile", "lead_banner_height_mobile", "460px"),
    var("--lead-banner-gradient-start", "dark_lead_banner_gradient_start", "#212020"),
    var("--lead-banner-gradient-stop-25", "dark_lead_banner_gradient_stop25", "#aa7802"),
    var("--lead-banner-gradient-stop-50", "dark_lead_banner_gradient_stop50", "#e3a002"),
    var("--lead-banner-gradient-stop-75", "dark_lead_banner_gradient_stop75", "#aa7802"),
    var("--lead-banner-gradient-end", "dark_lead_banner_gradient_end", "#212020"),
    var("--lead-banner-text-primary", "dark_lead_banner_text_primary", "#ffffff"),
    var("--lead-banner-text-secondary", "dark_lead_banner_text_secondary", "#242424"),
    var("--lead-banner-secondary-text-color", "dark_lead_banner_secondary_text_color", "#fffffa"),
    var("--lead-banner-char-fade-duration", "lead_banner_char_fade_duration", "0.3s"),
    Decl::Gap,
    Decl::Section("Article tiles (Header overlay)"),
    var("--article-tile-overlay-bg", "dark_article_tile_overlay_bg", "rgba(0, 0, 0, 0.8)"),
    Decl::Gap,
    Decl::Section("Header overlay"),
    var("--header-overlay-column-divider-color", "dark_header_overlay_column_divider_color", "rgba(255, 255, 255, 0.12)"),
    var("--header-overlay-hover-bg", "dark_header_overlay_hover_bg", "rgba(255, 255, 255, 0.10)"),
    Decl::Gap,
    Decl::Section("Site banner"),
    var("--site-banner-bg", "dark_site_banner_bg", "#363535"),
    fixed("--site-banner-text-color", "var(--primary-text-color)"),
    var("--site-banner-marquee-duration", "dark_site_banner_marquee_duration", "5s"),
    var("--site-banner-cycle-duration", "dark_site_banner_cycle_duration", "10s"),
    var("--site-banner-font-size", "site_banner_font_size", "20px"),
    Decl::Gap,
    Decl::Section("Quote"),
    var("--quote-bg", "dark_quote_bg", "#363535"),
    var("--quote-card-glow", "quote_card_glow", QUOTE_CARD_GLOW),
    Decl::Gap,
    Decl::Section("LoopingCircleGallery overlay"),
    var("--looping-circle-gallery-overlay-bg", "dark_looping_circle_gallery_overlay_bg", "rgba(255, 255, 255, 0.5)"),
    var("--looping-circle-gallery-overlay-text", "dark_looping_circle_gallery_overlay_text", "#000000"),
];

/// Declarations of the `.theme-light` block, in output order.
pub const LIGHT: &[Decl] = &[
    Decl::Section("Header theme variables"),
    var("--header-background-color", "light_header_background_color", "#fdfeff"),
    var("--header-height", "header_height", "60px"),
    Decl::Gap,
    Decl::Section("Text color variables - Light theme"),
    var("--primary-text-color", "light_primary_text_color", "#000000"),
    var("--secondary-text-color", "light_secondary_text_color", "#4b5563"),
    var("--standard-primary-site-text-color", "light_standard_primary_site_text_color", "#111827"),
    var("--standard-secondary-site-text-color", "light_standard_secondary_site_text_color", "#4b5563"),
    var("--standard-site-font-size", "standard_site_font_size", "16px"),
    var("--standard-site-font-weight", "standard_site_font_weight", "400"),
    Decl::Gap,
    Decl::Section("Global page"),
    var("--site-body-bg", "light_site_body_bg", "#ffffff"),
    fixed("--site-body-text", "var(--standard-primary-site-text-color)"),
    Decl::Gap,
    Decl::Section("Footer"),
    var("--footer-bg", "light_footer_bg", "#f5f5f5"),
    var("--footer-curtain-height-offset", "footer_curtain_height_offset", "-25px"),
    Decl::Gap,
    Decl::Section("Services"),
    var("--services-divider-color", "light_services_divider_color", "rgba(0, 0, 0, 0.12)"),
    Decl::Gap,
    Decl::Section("Button theme variables - Light theme"),
    var("--button-theme-light-bg", "light_button_bg", "transparent"),
    var("--button-theme-light-text", "light_button_text", "#000000"),
    var("--button-theme-light-border", "light_button_border", "#000000"),
    var("--button-theme-light-hover-bg", "light_button_hover_bg", "#000000"),
    var("--button-theme-light-hover-text", "light_button_hover_text", "#ffffff"),
    Decl::Gap,
    Decl::Section("AboutUs"),
    var("--about-us-bg", "light_about_us_bg", "transparent"),
    Decl::Gap,
    Decl::Section("Lead Banner gradient variables - Light theme"),
    var("--lead-banner-height", "lead_banner_height", "600px"),
    var("--lead-banner-height-mobile", "lead_banner_height_mobile", "460px"),
    var("--lead-banner-gradient-start", "light_lead_banner_gradient_start", "#ffffff"),
    var("--lead-banner-gradient-stop-25", "light_lead_banner_gradient_stop25", "#b4e1f6"),
    var("--lead-banner-gradient-stop-50", "light_lead_banner_gradient_stop50", "#42c2fd"),
    var("--lead-banner-gradient-stop-75", "light_lead_banner_gradient_stop75", "#b4e1f6"),
    var("--lead-banner-gradient-end", "light_lead_banner_gradient_end", "#ffffff"),
    var("--lead-banner-text-primary", "light_lead_banner_text_primary", "#323232"),
    var("--lead-banner-text-secondary", "light_lead_banner_text_secondary", "#6e6e6e"),
    var("--lead-banner-secondary-text-color", "light_lead_banner_secondary_text_color", "#323232"),
    var("--lead-banner-char-fade-duration", "lead_banner_char_fade_duration", "0.3s"),
    Decl::Gap,
    Decl::Section("Article tiles (Header overlay)"),
    var("--article-tile-overlay-bg", "light_article_tile_overlay_bg", "#77d0fac7"),
    Decl::Gap,
    Decl::Section("Header overlay"),
    var("--header-overlay-column-divider-color", "light_header_overlay_column_divider_color", "rgba(0, 0, 0, 0.18)"),
    var("--header-overlay-hover-bg", "light_header_overlay_hover_bg", "rgba(0, 0, 0, 0.08)"),
    Decl::Gap,
    Decl::Section("Site banner"),
    var("--site-banner-bg", "light_site_banner_bg", "#9adcfa"),
    fixed("--site-banner-text-color", "var(--primary-text-color)"),
    var("--site-banner-marquee-duration", "light_site_banner_marquee_duration", "10s"),
    var("--site-banner-cycle-duration", "light_site_banner_cycle_duration", "20s"),
    var("--site-banner-font-size", "site_banner_font_size", "20px"),
    Decl::Gap,
    Decl::Section("Quote"),
    Decl::VarOr {
        property: "--quote-bg",
        key: "light_quote_bg",
        fallback: "var(--site-body-bg)",
    },
    var("--quote-card-glow", "quote_card_glow", QUOTE_CARD_GLOW),
    Decl::Gap,
    Decl::Section("LoopingCircleGallery overlay"),
    var("--looping-circle-gallery-overlay-bg", "light_looping_circle_gallery_overlay_bg", "rgba(0, 0, 0, 0.5)"),
    var("--looping-circle-gallery-overlay-text", "light_looping_circle_gallery_overlay_text", "#ffffff"),
];

/// Whether `key` is read by either theme block.
pub fn is_known_key(key: &str) -> bool {
    DARK.iter().chain(LIGHT).any(|d| d.key() == Some(key))
}

/// Every configuration key with its stock default, first occurrence order,
/// no duplicates.
pub fn known_keys() -> Vec<(&'static str, &'static str)> {
    let mut keys: Vec<(&'static str, &'static str)> = Vec::new();
    for decl in DARK.iter().chain(LIGHT) {
        if let (Some(key), Some(default)) = (decl.key(), decl.stock_default())
            && !keys.iter().any(|(k, _)| *k == key)
        {
            keys.push((key, default));
        }
    }
    keys
}

/// Configured value for `key`, or `default` when the configuration is
/// absent, the lookup fails, or the value is empty.
fn value_or_default(config: Option<&dyn ThemeSource>, key: &str, default: &str) -> String {
    let Some(config) = config else {
        return default.to_string();
    };
    match config.lookup(key) {
        Ok(Some(value)) if !value.is_empty() => value,
        Ok(_) => default.to_string(),
        Err(error) => {
            tracing::debug!(key, %error, "theme lookup failed, using default");
            default.to_string()
        }
    }
}

fn render_block(out: &mut String, selector: &str, decls: &[Decl], config: Option<&dyn ThemeSource>) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{selector} {{");
    for decl in decls {
        let _ = match *decl {
            Decl::Section(comment) => writeln!(out, "  /* {comment} */"),
            Decl::Var {
                property,
                key,
                default,
            } => writeln!(out, "  {property}: {};", value_or_default(config, key, default)),
            Decl::VarOr {
                property,
                key,
                fallback,
            } => {
                let value = value_or_default(config, key, "");
                let value = if value.is_empty() { fallback.to_string() } else { value };
                writeln!(out, "  {property}: {value};")
            }
            Decl::Fixed { property, value } => writeln!(out, "  {property}: {value};"),
            Decl::Gap => writeln!(out),
        };
    }
    let _ = writeln!(out, "}}");
}

/// Render the dark and light theme blocks.
///
/// `None` is a legal input and yields the all-defaults stylesheet. Output is
/// byte-identical for identical inputs.
pub fn render(config: Option<&dyn ThemeSource>) -> String {
    let mut css = String::with_capacity(8 * 1024);
    render_block(&mut css, DARK_SELECTOR, DARK, config);
    css.push('\n');
    render_block(&mut css, LIGHT_SELECTOR, LIGHT, config);
    css
}

/// Returns a commented stock `theme.toml` listing every key and its default.
///
/// Used by the `gen-config --theme` CLI command.
pub fn stock_theme_toml() -> String {
    let mut out = String::from(
        "# Site theme configuration\n\
         # ========================\n\
         # Place theme.toml at any level of the conf/ tree; deeper files override\n\
         # shallower ones. Unset or empty values fall back to the defaults below.\n\
         # An empty light_quote_bg makes the light quote background follow\n\
         # --site-body-bg.\n\n",
    );
    for (key, default) in known_keys() {
        let _ = writeln!(out, "# {key} = {}", toml::Value::String(default.to_string()));
    }
    out
}
