use crate::domain::{Action, ContainerInfo, ContainerState};

use super::embedded_assets::SCRIPT_PATH;
use super::theme::{self, html_escape};

/// Render the container overview page.
pub fn render_index(containers: &[ContainerInfo]) -> String {
    let mut body = String::new();
    body.push_str("<h1 class=\"title\">Containers</h1>\n");

    if containers.is_empty() {
        body.push_str("<p class=\"empty\">No containers or compose templates found.</p>\n");
        return theme::render_page("Containers", &body, INDEX_CSS, Some(SCRIPT_PATH));
    }

    body.push_str("<table class=\"containers\">\n<thead><tr>");
    body.push_str("<th>Name</th><th>Image</th><th>State</th><th></th>");
    body.push_str("</tr></thead>\n<tbody>\n");
    for info in containers {
        push_row(&mut body, info);
    }
    body.push_str("</tbody>\n</table>\n");

    theme::render_page("Containers", &body, INDEX_CSS, Some(SCRIPT_PATH))
}

fn push_row(body: &mut String, info: &ContainerInfo) {
    let name = html_escape(info.name.as_str());

    body.push_str("<tr>");
    body.push_str("<td class=\"name\">");
    body.push_str(&name);
    body.push_str("</td><td><code>");
    body.push_str(&html_escape(info.image.as_deref().unwrap_or("-")));
    body.push_str("</code></td><td><span class=\"state ");
    body.push_str(state_class(&info.state));
    body.push_str("\" title=\"");
    body.push_str(&html_escape(info.status.as_deref().unwrap_or("")));
    body.push_str("\">");
    body.push_str(&html_escape(info.state.as_str()));
    body.push_str("</span></td><td class=\"actions\">");

    for action in actions_for(info) {
        body.push_str("<button data-action=\"");
        body.push_str(action.as_str());
        body.push_str("\" data-name=\"");
        body.push_str(&name);
        body.push_str("\">");
        body.push_str(action.as_str());
        body.push_str("</button>");
    }

    body.push_str("</td></tr>\n");
}

fn actions_for(info: &ContainerInfo) -> Vec<Action> {
    let mut actions = Vec::new();
    if info.state.is_installed() {
        // `docker start` does not unpause, so a paused container is
        // handled like a running one.
        if info.state.is_running() || info.state == ContainerState::Paused {
            actions.push(Action::Stop);
            actions.push(Action::Restart);
        } else {
            actions.push(Action::Start);
        }
        if info.is_installable() {
            actions.push(Action::Update);
        }
    } else if info.is_installable() {
        actions.push(Action::Install);
    }
    actions
}

fn state_class(state: &ContainerState) -> &'static str {
    match state {
        ContainerState::Running => "ok",
        ContainerState::NotInstalled => "none",
        ContainerState::Restarting | ContainerState::Paused | ContainerState::Created => "warn",
        _ => "off",
    }
}

const INDEX_CSS: &str = "\
.title{font-size:1.5em;margin-bottom:20px}\
.empty{color:var(--text-light)}\
.containers{\
    width:100%;border-collapse:collapse;background:var(--card-bg);\
    border:1px solid var(--border);border-radius:10px;overflow:hidden;\
}\
.containers th,.containers td{padding:10px 14px;text-align:left;border-bottom:1px solid var(--border)}\
.containers th{font-size:.8em;text-transform:uppercase;letter-spacing:.04em;color:var(--text-light)}\
.name{font-weight:600}\
.state{padding:2px 10px;border-radius:10px;font-size:.85em;color:#fff;background:var(--text-light)}\
.state.ok{background:var(--ok)}\
.state.warn{background:var(--warn)}\
.state.none{background:transparent;color:var(--text-light);border:1px dashed var(--border)}\
.actions{text-align:right;white-space:nowrap}\
.actions button{\
    margin-left:6px;padding:4px 12px;border-radius:6px;cursor:pointer;\
    border:1px solid var(--sea);background:transparent;color:var(--sea);\
}\
.actions button:hover{background:var(--sea);color:#fff}\
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContainerName;
    use std::path::PathBuf;

    fn info(name: &str, state: ContainerState, template: bool) -> ContainerInfo {
        ContainerInfo {
            name: ContainerName::new(name).unwrap(),
            template_dir: template.then(|| PathBuf::from("/t").join(name)),
            id: None,
            image: Some("nginx:1.27".into()),
            state,
            status: Some("Up 1 hour".into()),
        }
    }

    #[test]
    fn test_running_template_offers_stop_restart_update() {
        let actions = actions_for(&info("web", ContainerState::Running, true));
        assert_eq!(actions, vec![Action::Stop, Action::Restart, Action::Update]);
    }

    #[test]
    fn test_uninstalled_template_offers_install() {
        let actions = actions_for(&info("web", ContainerState::NotInstalled, true));
        assert_eq!(actions, vec![Action::Install]);
    }

    #[test]
    fn test_stopped_engine_container_offers_start() {
        let actions = actions_for(&info("db", ContainerState::Exited, false));
        assert_eq!(actions, vec![Action::Start]);
    }

    #[test]
    fn test_paused_container_offers_stop_restart() {
        let actions = actions_for(&info("db", ContainerState::Paused, false));
        assert_eq!(actions, vec![Action::Stop, Action::Restart]);
    }

    #[test]
    fn test_index_escapes_names() {
        let html = render_index(&[info("o'brien", ContainerState::Exited, false)]);
        assert!(html.contains("data-name=\"o&#x27;brien\""));
        assert!(html.contains("data-action=\"start\""));
        assert!(html.contains("/public/script.js"));
    }

    #[test]
    fn test_empty_index() {
        let html = render_index(&[]);
        assert!(html.contains("No containers"));
    }
}
