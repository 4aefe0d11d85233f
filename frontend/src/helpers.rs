//! Browser helpers shared by the components: toast and alert feedback and
//! markdown rendering of chat answers.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Displays a temporary notification at the bottom of the screen. The toast
/// removes itself after three seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                html_toast.set_class_name("toast");

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

const SAFE_SCHEMES: [&str; 3] = ["http:", "https:", "mailto:"];

/// Absolute urls must use one of `SAFE_SCHEMES`; relative ones are kept.
fn is_safe_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    match url.find(':') {
        Some(colon) if !url[..colon].contains(['/', '?', '#']) => {
            SAFE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
        }
        _ => true,
    }
}

/// Renders an answer as HTML. Raw HTML in the answer is shown as text,
/// links and images with other url schemes lose their target, and single
/// newlines become line breaks.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            Event::SoftBreak => Event::HardBreak,
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
                link_type,
                dest_url: CowStr::Borrowed(""),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
                link_type,
                dest_url: CowStr::Borrowed(""),
                title,
                id,
            }),
            other => other,
        });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_html_in_answers_is_escaped() {
        let html = render_markdown("**12명**입니다.<script>alert(1)</script>");
        assert!(html.contains("<strong>12명</strong>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn script_urls_are_not_linked() {
        let html = render_markdown("[자세히](javascript:alert(document.cookie))");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("자세히"));

        let html = render_markdown("![x](JavaScript:alert(1)) [d](data:text/html,hi)");
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(!html.contains("data:text"));
    }

    #[test]
    fn web_links_are_kept() {
        let html = render_markdown("[출처](https://news.example.com/a?b=c:d) [메일](mailto:a@example.com) [상대](/api/health)");
        assert!(html.contains(r#"href="https://news.example.com/a?b=c:d""#));
        assert!(html.contains(r#"href="mailto:a@example.com""#));
        assert!(html.contains(r#"href="/api/health""#));
    }

    #[test]
    fn single_newlines_become_breaks() {
        assert_eq!(render_markdown("첫 줄\n둘째 줄"), "<p>첫 줄<br />\n둘째 줄</p>\n");
    }
}
