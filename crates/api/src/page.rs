//! HTML fragments emitted by the default responders.

/// Escape text for HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted JavaScript string inside a `<script>` block.
pub fn js_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(c),
        }
    }
    out
}

/// Warning panel shown when a signed-in user opens a page outside their menus.
pub fn warning_panel(title: &str, notice: &str, signed_in_as: &str) -> String {
    format!(
        r#"<div class="panel panel-warning" role="alert">
  <div class="panel-heading"><h3 class="panel-title">{title}</h3></div>
  <div class="panel-body">
    <p>{notice}</p>
    <p class="text-muted">{user}</p>
  </div>
</div>"#,
        title = html_escape(title),
        notice = html_escape(notice),
        user = html_escape(signed_in_as),
    )
}

/// Script telling the user the session is gone, then navigating to `login_url` after 3s.
pub fn login_expired_notice(title: &str, text: &str, button: &str, login_url: &str) -> String {
    let title = js_escape(title);
    let text = js_escape(text);
    let button = js_escape(button);
    let url = js_escape(login_url);

    format!(
        r##"<script>
  if (typeof(swal) === "function") {{
    swal({{
      type: "info",
      title: "{title}",
      text: "{text}",
      showCancelButton: false,
      confirmButtonColor: "#3c8dbc",
      confirmButtonText: "{button}",
    }});
    setTimeout(function () {{ location.href = "{url}"; }}, 3000);
  }} else {{
    alert("{text}");
    location.href = "{url}";
  }}
</script>"##
    )
}

/// Placeholder login page; credential exchange is handled elsewhere.
pub fn login_page(return_to: Option<&str>) -> String {
    let hidden = return_to
        .map(|r| format!(r#"<input type="hidden" name="ref" value="{}">"#, html_escape(r)))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html><head><title>Sign in</title></head>
<body>
  <form method="post">{hidden}
    <input name="username" placeholder="username">
    <input name="password" type="password" placeholder="password">
    <button type="submit">Sign in</button>
  </form>
</body></html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_neutralises_markup() {
        let escaped = html_escape("<script>alert('x')</script>");
        assert_eq!(escaped, "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;");
    }

    #[test]
    fn notice_keeps_url_inside_string_literal() {
        let html = login_expired_notice("t", "m", "ok", "/admin/login?ref=\"</script>");
        assert!(html.contains(r#"location.href = "/admin/login?ref=\"\u003c/script\u003e""#));
        assert!(!html.contains("ref=\"</script>"));
        assert!(html.contains("3000"));
    }

    #[test]
    fn panel_contains_escaped_user() {
        let html = warning_panel("permission denied", "403", "<b>Eve</b>");
        assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(html.contains("permission denied"));
    }
}
