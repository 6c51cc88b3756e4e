//! Template slots and placeholder substitution.
//!
//! A site template is plain HTML containing literal tokens such as
//! `{{content}}`. Compiling a page fills a fixed table of slots:
//!
//! | Token | Value |
//! |-------|-------|
//! | `{{brand_name}}` | site brand name |
//! | `{{page_title}}` | page title (slug when untitled) |
//! | `{{meta_title}}` | meta title (page title when empty) |
//! | `{{meta_description}}` | meta description |
//! | `{{content}}` | rendered blocks |
//! | `{{navigation}}` | site navigation |
//! | `{{footer}}` | footprint footer, or nothing |
//! | `{{scripts}}` | `<script>` tag for `scripts.js`, or nothing |
//!
//! Substitution is one left-to-right scan. Inserted values are never
//! re-scanned, so a block whose text contains `{{footer}}` stays literal.
//! Tokens outside the table are left in place and reported as unresolved;
//! slots with a value but no token in the template are reported as unused.

use maud::{DOCTYPE, html};

/// A named insertion point in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    BrandName,
    PageTitle,
    MetaTitle,
    MetaDescription,
    Content,
    Navigation,
    Footer,
    Scripts,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::BrandName,
        Slot::PageTitle,
        Slot::MetaTitle,
        Slot::MetaDescription,
        Slot::Content,
        Slot::Navigation,
        Slot::Footer,
        Slot::Scripts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::BrandName => "brand_name",
            Slot::PageTitle => "page_title",
            Slot::MetaTitle => "meta_title",
            Slot::MetaDescription => "meta_description",
            Slot::Content => "content",
            Slot::Navigation => "navigation",
            Slot::Footer => "footer",
            Slot::Scripts => "scripts",
        }
    }

    /// The literal token as it appears in templates.
    pub fn token(self) -> String {
        format!("{{{{{}}}}}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Values for every slot of one page. Text slots are expected to be escaped
/// already; all values are inserted verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotValues<'a> {
    pub brand_name: &'a str,
    pub page_title: &'a str,
    pub meta_title: &'a str,
    pub meta_description: &'a str,
    pub content: &'a str,
    pub navigation: &'a str,
    pub footer: &'a str,
    pub scripts: &'a str,
}

impl<'a> SlotValues<'a> {
    pub fn get(&self, slot: Slot) -> &'a str {
        match slot {
            Slot::BrandName => self.brand_name,
            Slot::PageTitle => self.page_title,
            Slot::MetaTitle => self.meta_title,
            Slot::MetaDescription => self.meta_description,
            Slot::Content => self.content,
            Slot::Navigation => self.navigation,
            Slot::Footer => self.footer,
            Slot::Scripts => self.scripts,
        }
    }
}

/// Result of filling a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub html: String,
    /// `{{name}}` tokens with no matching slot, in order of appearance.
    pub unresolved: Vec<String>,
    /// Slots that had a non-empty value but no token in the template.
    pub unused: Vec<Slot>,
}

/// Fill `template` with `values` in a single pass.
pub fn substitute(template: &str, values: &SlotValues<'_>) -> Substitution {
    let mut html = String::with_capacity(template.len() + values.content.len());
    let mut used = [false; Slot::ALL.len()];
    let mut unresolved = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            html.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let name = &after[..end];
        if let Some(slot) = Slot::from_name(name) {
            html.push_str(values.get(slot));
            used[slot as usize] = true;
            rest = &after[end + 2..];
        } else if is_token_name(name) {
            html.push_str(&rest[start..start + 2 + end + 2]);
            unresolved.push(name.to_string());
            rest = &after[end + 2..];
        } else {
            // Not a token (`{{ x }}`, `{{{content}}}`, nested braces in
            // inline JS): keep one brace and rescan from the next, so a
            // token may start at the second brace.
            html.push('{');
            rest = &rest[start + 1..];
        }
    }
    html.push_str(rest);

    let unused = Slot::ALL
        .into_iter()
        .filter(|slot| !used[*slot as usize] && !values.get(*slot).is_empty())
        .collect();

    Substitution {
        html,
        unresolved,
        unused,
    }
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Built-in page skeleton used when a template has no `base_html`.
pub fn default_base_html() -> String {
    let slot = |s: Slot| maud::PreEscaped(s.token());
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (slot(Slot::MetaTitle)) }
                meta name="description" content=(slot(Slot::MetaDescription));
                link rel="stylesheet" href="/styles.css";
            }
            body {
                header.site-header {
                    a.site-brand href="/" { (slot(Slot::BrandName)) }
                    (slot(Slot::Navigation))
                }
                main.site-content {
                    (slot(Slot::Content))
                }
                (slot(Slot::Footer))
                (slot(Slot::Scripts))
            }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values() -> SlotValues<'static> {
        SlotValues {
            brand_name: "Acme",
            page_title: "Home",
            meta_title: "Acme Home",
            meta_description: "Welcome",
            content: "<p>body</p>",
            navigation: "<nav></nav>",
            footer: "",
            scripts: "",
        }
    }

    #[test]
    fn tokens_are_double_braced_names() {
        assert_eq!(Slot::Content.token(), "{{content}}");
        assert_eq!(Slot::MetaDescription.token(), "{{meta_description}}");
        for slot in Slot::ALL {
            assert_eq!(Slot::from_name(slot.name()), Some(slot));
        }
    }

    #[test]
    fn substitutes_every_known_token() {
        let result = substitute(
            "<title>{{meta_title}}</title><h1>{{brand_name}} / {{page_title}}</h1>{{navigation}}{{content}}{{footer}}",
            &values(),
        );
        assert_eq!(
            result.html,
            "<title>Acme Home</title><h1>Acme / Home</h1><nav></nav><p>body</p>"
        );
        assert!(result.unresolved.is_empty());
        assert_eq!(result.unused, vec![Slot::MetaDescription]);
    }

    #[test]
    fn repeated_tokens_all_replaced() {
        let result = substitute("{{brand_name}}|{{brand_name}}", &values());
        assert_eq!(result.html, "Acme|Acme");
    }

    #[test]
    fn unknown_tokens_left_literal_and_reported() {
        let result = substitute("{{content}}{{sidebar}}", &values());
        assert_eq!(result.html, "<p>body</p>{{sidebar}}");
        assert_eq!(result.unresolved, vec!["sidebar".to_string()]);
    }

    #[test]
    fn inserted_values_are_not_rescanned() {
        let v = SlotValues {
            content: "see {{footer}}",
            footer: "<footer>F</footer>",
            ..values()
        };
        let result = substitute("{{content}}", &v);
        assert_eq!(result.html, "see {{footer}}");
        assert!(result.unused.contains(&Slot::Footer));
    }

    #[test]
    fn unused_ignores_empty_values() {
        let result = substitute("{{content}}", &values());
        assert!(!result.unused.contains(&Slot::Footer));
        assert!(!result.unused.contains(&Slot::Scripts));
        assert!(result.unused.contains(&Slot::Navigation));
    }

    #[test]
    fn non_token_braces_kept() {
        let template = "<script>if (a) {{ b(); }}</script>{{content}}";
        let result = substitute(template, &values());
        assert_eq!(result.html, "<script>if (a) {{ b(); }}</script><p>body</p>");
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn extra_braces_around_token_kept_literal() {
        let result = substitute("<div>{{{content}}}</div>", &values());
        assert_eq!(result.html, "<div>{<p>body</p>}</div>");
        assert!(!result.unused.contains(&Slot::Content));

        let result = substitute("{{{{content}}}}", &values());
        assert_eq!(result.html, "{{<p>body</p>}}");
        assert!(result.unresolved.is_empty());
    }

    #[test]
    fn unterminated_braces_kept() {
        let result = substitute("{{content}} and {{oops", &values());
        assert_eq!(result.html, "<p>body</p> and {{oops");
    }

    #[test]
    fn spaced_tokens_are_not_slots() {
        let result = substitute("{{ content }}", &values());
        assert_eq!(result.html, "{{ content }}");
        assert!(result.unused.contains(&Slot::Content));
    }

    #[test]
    fn default_skeleton_has_core_slots() {
        let html = default_base_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        for slot in Slot::ALL {
            if slot == Slot::PageTitle {
                continue;
            }
            assert!(html.contains(&slot.token()), "missing {}", slot.token());
        }
        assert!(html.contains("href=\"/styles.css\""));
    }
}
