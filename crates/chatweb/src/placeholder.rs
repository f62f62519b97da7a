//! Inline page shown while a profile loads, or when it has no URL.
//!
//! The page carries no `<title>`: the native window keeps the profile's title
//! and the page's text never reaches unread detection.

use chatweb_core::Placeholder;

/// Render `page` as a self-contained HTML document.
pub fn render(page: &Placeholder) -> String {
    let actions = if page.show_actions {
        r#"<div class="actions">
      <button onclick="window.chatWeb && window.chatWeb.openConfig()">Open Configuration</button>
      <button class="ghost" onclick="window.chatWeb && window.chatWeb.clearConfig()">Clear Configuration</button>
    </div>"#
    } else {
        ""
    };

    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <style>
      html, body {{ height: 100%; margin: 0; }}
      body {{
        display: flex; align-items: center; justify-content: center;
        background: #0c1117; color: #e6edf3;
        font-family: -apple-system, "Segoe UI", Roboto, sans-serif;
      }}
      main {{ text-align: center; max-width: 560px; padding: 24px; }}
      h1 {{ font-size: 22px; margin: 0 0 8px; }}
      p {{ margin: 6px 0; color: #9da7b3; word-break: break-all; }}
      .actions {{ margin-top: 20px; display: flex; gap: 12px; justify-content: center; }}
      button {{
        background: #2f81f7; color: #fff; border: 0; border-radius: 6px;
        padding: 8px 16px; font-size: 14px; cursor: pointer;
      }}
      button.ghost {{ background: transparent; border: 1px solid #30363d; color: #e6edf3; }}
    </style>
  </head>
  <body>
    <main>
      <h1>{title}</h1>
      <p>{subtitle}</p>
      <p><small>{hint}</small></p>
    {actions}
    </main>
  </body>
</html>"#,
        title = escape_html(&page.title),
        subtitle = escape_html(&page.subtitle),
        hint = escape_html(&page.hint),
        actions = actions,
    )
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
