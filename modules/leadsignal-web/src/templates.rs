use leadsignal_common::{Priority, Signal};

/// One table row, with absent contacts already rendered as a dash.
pub struct SignalRow {
    pub id: String,
    pub priority: Priority,
    pub title: String,
    pub signal_type: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    pub keyword: String,
    pub date: String,
    pub url: String,
}

impl From<&Signal> for SignalRow {
    fn from(signal: &Signal) -> Self {
        let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        Self {
            id: signal.id.clone(),
            priority: signal.priority,
            title: signal.title.clone(),
            signal_type: signal.signal_type.clone(),
            email: dash(&signal.email),
            phone: dash(&signal.phone),
            institution: dash(&signal.institution_name),
            keyword: signal.source_keyword.clone(),
            date: signal.effective_date().to_string(),
            url: signal.url.clone(),
        }
    }
}

/// Render the dashboard: stats cards, the signals table and the regenerate control.
pub fn render_dashboard(rows: &[SignalRow], last_execution: &str, running: bool) -> String {
    let high = rows.iter().filter(|r| r.priority == Priority::High).count();
    let medium = rows.iter().filter(|r| r.priority == Priority::Medium).count();
    let with_email = rows.iter().filter(|r| r.email != "-").count();

    let mut body = String::new();
    if rows.is_empty() {
        body.push_str(r#"<tr><td colspan="10" class="empty">No signals yet. Regenerate to run the queries.</td></tr>"#);
    }

    for row in rows {
        let link = link_cell(&row.url);
        body.push_str(&format!(
            r#"<tr>
    <td class="mono">{id}</td>
    <td><span class="badge badge-{pc}">{pl}</span></td>
    <td>{title}</td>
    <td>{kind}</td>
    <td>{email}</td>
    <td>{phone}</td>
    <td>{institution}</td>
    <td>{keyword}</td>
    <td>{date}</td>
    <td>{link}</td>
</tr>"#,
            id = html_escape(&row.id),
            pc = row.priority.to_string().to_lowercase(),
            pl = row.priority,
            title = html_escape(&row.title),
            kind = html_escape(&row.signal_type),
            email = html_escape(&row.email),
            phone = html_escape(&row.phone),
            institution = html_escape(&row.institution),
            keyword = html_escape(&row.keyword),
            date = html_escape(&row.date),
        ));
    }

    let disabled = if running { " disabled" } else { "" };
    let button_label = if running { "Running..." } else { "Regenerate" };

    let content = format!(
        r#"<div class="container">
<div class="toolbar">
    <span id="last-execution">Last execution: {last}</span>
    <button id="regenerate" class="action-btn"{disabled}>{button_label}</button>
</div>
<div class="cards">
    <div class="card"><div class="num">{total}</div><div class="label">Total signals</div></div>
    <div class="card"><div class="num">{high}</div><div class="label">High priority</div></div>
    <div class="card"><div class="num">{medium}</div><div class="label">Medium priority</div></div>
    <div class="card"><div class="num">{with_email}</div><div class="label">With email</div></div>
</div>
<table>
<thead><tr><th>ID</th><th>Priority</th><th>Title</th><th>Type</th><th>Email</th><th>Phone</th><th>Institution</th><th>Keyword</th><th>Date</th><th>URL</th></tr></thead>
<tbody>{body}</tbody>
</table>
</div>
<script>
const button = document.getElementById('regenerate');

function waitForRun() {{
    fetch('/api/status')
        .then(r => r.json())
        .then(status => {{
            if (status.state === 'running') {{
                setTimeout(waitForRun, 3000);
            }} else {{
                window.location.reload();
            }}
        }});
}}

button.addEventListener('click', () => {{
    button.disabled = true;
    button.textContent = 'Running...';
    fetch('/regenerate', {{ method: 'POST' }})
        .then(r => r.json())
        .then(() => setTimeout(waitForRun, 3000));
}});

if (button.disabled) {{
    waitForRun();
}}
</script>"#,
        last = html_escape(last_execution),
        total = rows.len(),
    );

    build_page("Dashboard", &content)
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Lead Signals Madrid</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.header{{background:#1a1a1a;color:#fff;padding:12px 24px;display:flex;align-items:center;justify-content:space-between;}}
.header h1{{font-size:18px;font-weight:600;}}
.container{{max-width:1280px;margin:0 auto;padding:24px;}}
.toolbar{{display:flex;justify-content:space-between;align-items:center;margin-bottom:16px;font-size:13px;color:#666;}}
.cards{{display:grid;grid-template-columns:repeat(4,1fr);gap:12px;margin-bottom:24px;}}
.card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;text-align:center;}}
.card .num{{font-size:28px;font-weight:700;}}
.card .label{{font-size:12px;color:#888;text-transform:uppercase;margin-top:4px;}}
table{{width:100%;border-collapse:collapse;background:#fff;border:1px solid #e0e0e0;font-size:13px;}}
th{{text-align:left;background:#f5f5f5;padding:8px;border-bottom:1px solid #e0e0e0;}}
td{{padding:8px;border-bottom:1px solid #f0f0f0;vertical-align:top;}}
td a{{color:#0066cc;}}
td.mono{{font-family:monospace;font-size:12px;}}
td.empty{{text-align:center;color:#888;padding:40px;}}
.badge{{display:inline-block;padding:2px 8px;border-radius:12px;font-size:11px;font-weight:600;text-transform:uppercase;}}
.badge-high{{background:#fce4ec;color:#c62828;}}
.badge-medium{{background:#fff3e0;color:#e65100;}}
.badge-low{{background:#e3f2fd;color:#1565c0;}}
.action-btn{{padding:6px 16px;background:#0066cc;color:#fff;border:none;border-radius:4px;font-size:13px;font-weight:500;cursor:pointer;}}
.action-btn:hover{{background:#004499;}}
.action-btn:disabled{{background:#999;cursor:default;}}
</style>
</head>
<body>
<div class="header">
    <h1>Lead Signals Madrid</h1>
</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
    )
}

/// A link only for http(s) URLs; anything else is shown as inert text.
fn link_cell(raw: &str) -> String {
    let is_web = url::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if is_web {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">Open</a>"#,
            html_escape(raw)
        )
    } else {
        format!(r#"<span class="mono">{}</span>"#, html_escape(raw))
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
