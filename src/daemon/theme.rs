/// Escape HTML special characters for safe rendering.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

// ── Page Shell ──────────────────────────────────────────────

/// Render a complete themed HTML page.
///
/// Wraps the given body content in the Seahorse page shell with header,
/// busy indicator, and common styles. Page-specific CSS goes in
/// `extra_css`; `script_src` names an external script to load, if any.
pub fn render_page(title: &str, body: &str, extra_css: &str, script_src: Option<&str>) -> String {
    let mut html = String::with_capacity(4096 + body.len());
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" \
         content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str("<title>");
    html.push_str(&html_escape(title));
    html.push_str(" - Seahorse</title>\n<style>\n");
    html.push_str(COMMON_CSS);
    if !extra_css.is_empty() {
        html.push('\n');
        html.push_str(extra_css);
    }
    html.push_str("\n</style>\n</head>\n<body>\n");
    html.push_str(HEADER_HTML);
    html.push_str(SPINNER_HTML);
    html.push_str("<main class=\"sh-main\">\n");
    html.push_str(body);
    html.push_str("\n</main>\n");
    if let Some(src) = script_src {
        html.push_str("<script src=\"");
        html.push_str(&html_escape(src));
        html.push_str("\"></script>\n");
    }
    html.push_str("</body>\n</html>");
    html
}

// ── Private Constants ───────────────────────────────────────

const COMMON_CSS: &str = "\
:root {\
    --sea: #1F6F8B;\
    --sea-dark: #155266;\
    --coral: #E86A5A;\
    --sand: #F7F4EE;\
    --card-bg: #FFFFFF;\
    --text: #2E3438;\
    --text-light: #7A8489;\
    --border: #E3E0D8;\
    --ok: #2E9E6A;\
    --warn: #C98A1B;\
}\
@media(prefers-color-scheme:dark){:root{\
    --sand: #12181B;\
    --card-bg: #1B2328;\
    --text: #E4E8EA;\
    --text-light: #8C979C;\
    --border: #2A353B;\
}}\
*,*::before,*::after{margin:0;padding:0;box-sizing:border-box}\
body{\
    font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,'Helvetica Neue',Arial,sans-serif;\
    background:var(--sand);color:var(--text);\
    line-height:1.6;min-height:100vh;\
}\
code{font-family:'SF Mono',Monaco,'Cascadia Code',Menlo,Consolas,monospace;font-size:.88em}\
.sh-header{\
    background:linear-gradient(135deg,var(--sea) 0%,var(--sea-dark) 100%);\
    padding:16px 24px;color:#fff;\
}\
.sh-brand{max-width:1000px;margin:0 auto;font-size:1.3em;font-weight:700;letter-spacing:.03em}\
.sh-main{max-width:1000px;width:100%;margin:0 auto;padding:32px 24px}\
#spinner{\
    display:none;position:fixed;top:18px;right:24px;\
    width:22px;height:22px;border-radius:50%;\
    border:3px solid rgba(255,255,255,.35);border-top-color:#fff;\
    animation:spin .8s linear infinite;\
}\
@keyframes spin{to{transform:rotate(360deg)}}\
";

const HEADER_HTML: &str = concat!(
    r##"<header class="sh-header"><div class="sh-brand">Seahorse</div></header>"##,
    "\n",
);

const SPINNER_HTML: &str = "<div id=\"spinner\" role=\"status\" aria-label=\"Working\"></div>\n";
