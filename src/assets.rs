//! Site-wide stylesheet and script.
//!
//! Every build emits `styles.css`: the template's `base_css` (or the built-in
//! default from `static/default.css`), preceded by a `:root` block declaring
//! the site's custom colours as CSS variables. `scripts.js` is emitted only
//! when the template carries script text.

use crate::types::{Site, Template};
use std::collections::BTreeMap;

pub const STYLESHEET_FILENAME: &str = "styles.css";
pub const SCRIPT_FILENAME: &str = "scripts.js";

const DEFAULT_CSS: &str = include_str!("../static/default.css");

/// `:root` block with one `--{name}: {value};` line per colour, in map order.
///
/// Names may be given with or without the leading `--`. Returns `None` when
/// the site defines no colours.
pub fn generate_color_css(colors: &BTreeMap<String, String>) -> Option<String> {
    if colors.is_empty() {
        return None;
    }
    let declarations: String = colors
        .iter()
        .map(|(name, value)| format!("    --{}: {};\n", name.trim_start_matches("--"), value))
        .collect();
    Some(format!(":root {{\n{declarations}}}"))
}

/// The template's base CSS, or the built-in default when it is blank.
pub fn base_css(template: &Template) -> &str {
    template
        .base_css
        .as_deref()
        .filter(|css| !css.trim().is_empty())
        .unwrap_or(DEFAULT_CSS)
}

/// Full `styles.css` content.
pub fn build_stylesheet(site: &Site, template: &Template) -> String {
    let base = base_css(template);
    match generate_color_css(&site.custom_colors) {
        Some(colors) => format!("{colors}\n\n{base}"),
        None => base.to_string(),
    }
}

/// `scripts.js` content, when the template has any.
pub fn build_script(template: &Template) -> Option<&str> {
    template
        .base_js
        .as_deref()
        .filter(|js| !js.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn template(css: Option<&str>, js: Option<&str>) -> Template {
        Template {
            base_html: None,
            base_css: css.map(str::to_string),
            base_js: js.map(str::to_string),
        }
    }

    #[test]
    fn no_colors_no_root_block() {
        assert_eq!(generate_color_css(&BTreeMap::new()), None);
    }

    #[test]
    fn colors_render_as_variables() {
        let colors = BTreeMap::from([
            ("primary".to_string(), "#FF0000".to_string()),
            ("accent".to_string(), "#00FF00".to_string()),
        ]);
        assert_eq!(
            generate_color_css(&colors).unwrap(),
            ":root {\n    --accent: #00FF00;\n    --primary: #FF0000;\n}"
        );
    }

    #[test]
    fn leading_dashes_not_doubled() {
        let colors = BTreeMap::from([("--primary".to_string(), "red".to_string())]);
        let css = generate_color_css(&colors).unwrap();
        assert!(css.contains("    --primary: red;"));
        assert!(!css.contains("----"));
    }

    #[test]
    fn stylesheet_is_base_css_verbatim_without_colors() {
        let site = Site::default();
        assert_eq!(build_stylesheet(&site, &template(Some("body{}"), None)), "body{}");
    }

    #[test]
    fn colors_precede_base_css() {
        let site = Site {
            custom_colors: BTreeMap::from([("primary".to_string(), "#FF0000".to_string())]),
            ..Default::default()
        };
        let css = build_stylesheet(&site, &template(Some("body{}"), None));
        let variable = css.find("--primary: #FF0000;").unwrap();
        let base = css.find("body{}").unwrap();
        assert!(css.starts_with(":root {"));
        assert!(variable < base);
    }

    #[test]
    fn blank_base_css_uses_default() {
        let site = Site::default();
        for css in [None, Some(""), Some("  \n")] {
            let out = build_stylesheet(&site, &template(css, None));
            assert!(!out.trim().is_empty());
            assert!(out.contains(".site-header"));
        }
    }

    #[test]
    fn script_only_when_present() {
        assert_eq!(build_script(&template(None, None)), None);
        assert_eq!(build_script(&template(None, Some(" \n "))), None);
        assert_eq!(
            build_script(&template(None, Some("console.log(1);"))),
            Some("console.log(1);")
        );
    }
}
