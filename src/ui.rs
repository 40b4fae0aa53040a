use crate::models::{VisitLog, VisitRecord, DIRECT_REFERRER};
use chrono::{DateTime, Utc};

pub fn render_index() -> &'static str {
    INDEX_HTML
}

pub fn render_login() -> String {
    ADMIN_LOGIN_HTML.to_string()
}

/// Visitor table, most recent first.
pub fn render_dashboard(username: &str, log: &VisitLog) -> String {
    let rows = if log.visitors.is_empty() {
        r#"<tr><td colspan="3" class="empty">No visits recorded yet.</td></tr>"#.to_string()
    } else {
        log.visitors.iter().rev().map(render_row).collect::<Vec<_>>().join("\n")
    };

    ADMIN_DASHBOARD_HTML
        .replace("{{USER}}", &escape_html(username))
        .replace("{{TOTAL}}", &log.total_visits.to_string())
        .replace("{{SHOWN}}", &log.visitors.len().to_string())
        .replace("{{ROWS}}", &rows)
}

fn render_row(visit: &VisitRecord) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape_html(&display_time(&visit.timestamp)),
        escape_html(display_source(&visit.referrer)),
        escape_html(&visit.user_agent),
    )
}

pub fn display_source(referrer: &str) -> &str {
    if referrer == DIRECT_REFERRER {
        "Direct Visit"
    } else {
        referrer
    }
}

pub fn display_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| {
            parsed
                .with_timezone(&Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        })
        .unwrap_or_else(|_| timestamp.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Portfolio</title>
  <style>
    :root {
      --bg: #0b0f17;
      --panel: #131a26;
      --ink: #e6e9ef;
      --muted: #8b93a3;
      --accent: #3b82f6;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: linear-gradient(180deg, #111827, #000 80%);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      line-height: 1.6;
    }

    section {
      max-width: 960px;
      margin: 0 auto;
      padding: 72px 24px;
    }

    .hero {
      min-height: 80vh;
      display: grid;
      place-content: center;
      text-align: center;
    }

    .hero h1 {
      font-size: clamp(2.4rem, 6vw, 4rem);
      margin: 0;
    }

    .hero h2 {
      color: var(--accent);
      font-weight: 500;
      margin: 8px 0 16px;
    }

    .actions a {
      display: inline-block;
      margin: 6px;
      padding: 10px 22px;
      border-radius: 999px;
      background: var(--accent);
      color: #fff;
      text-decoration: none;
    }

    h3.section-title {
      font-size: 1.9rem;
      margin: 0 0 24px;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 18px;
    }

    .card {
      background: var(--panel);
      border-radius: 14px;
      padding: 20px;
    }

    .card h4 {
      margin: 0 0 6px;
    }

    .muted {
      color: var(--muted);
    }

    .tags span {
      display: inline-block;
      margin: 3px;
      padding: 3px 10px;
      border-radius: 6px;
      background: #1f2937;
      font-size: 0.9rem;
    }

    .visitor-badge {
      position: fixed;
      right: 16px;
      bottom: 16px;
      padding: 8px 14px;
      border-radius: 10px;
      background: rgba(31, 41, 55, 0.9);
      color: var(--muted);
      font-size: 0.9rem;
    }

    .visitor-badge strong {
      color: var(--accent);
    }
  </style>
</head>
<body>
  <section class="hero" id="hero">
    <h1>Hello, I build things.</h1>
    <h2>Machine Learning Engineer &amp; Software Developer</h2>
    <p class="muted">Building intelligent solutions and crafting elegant code to solve complex problems.</p>
    <div class="actions">
      <a href="#projects">View Projects</a>
      <a href="#contact">Contact Me</a>
    </div>
  </section>

  <section id="about">
    <h3 class="section-title">About</h3>
    <p>I work across the stack from data pipelines to model serving, with a focus on systems that keep working after the demo.</p>
  </section>

  <section id="skills">
    <h3 class="section-title">Skills</h3>
    <div class="grid">
      <div class="card"><h4>Languages</h4><div class="tags"><span>Python</span><span>Java</span><span>Scala</span><span>SQL</span><span>Rust</span></div></div>
      <div class="card"><h4>ML</h4><div class="tags"><span>PyTorch</span><span>TensorFlow</span><span>scikit-learn</span><span>Hugging Face</span></div></div>
      <div class="card"><h4>Data</h4><div class="tags"><span>Apache Spark</span><span>Airflow</span><span>Kafka</span><span>Delta Lake</span></div></div>
      <div class="card"><h4>Platform</h4><div class="tags"><span>Docker</span><span>Kubernetes</span><span>MLflow</span><span>CI/CD</span></div></div>
    </div>
  </section>

  <section id="experience">
    <h3 class="section-title">Experience</h3>
    <div class="grid">
      <div class="card"><h4>Open-source AI Engineer</h4><p class="muted">2025 – Present</p><p>Agent tooling and evaluation pipelines for research groups.</p></div>
      <div class="card"><h4>ML Engineer</h4><p class="muted">2021 – 2023</p><p>Recommendation and topic-modelling systems serving app-store traffic.</p></div>
      <div class="card"><h4>Data Scientist</h4><p class="muted">2020 – 2021</p><p>Demand forecasting for sign-up and bureau-fetch peaks.</p></div>
    </div>
  </section>

  <section id="projects">
    <h3 class="section-title">Projects</h3>
    <div class="grid">
      <div class="card"><h4>Code Explainer</h4><p>Walks a repository and produces annotated summaries of each module.</p></div>
      <div class="card"><h4>Ad Category Classifier</h4><p>Multilingual text classifier mapping pages onto the IAB taxonomy.</p></div>
      <div class="card"><h4>RL-GAN-Net</h4><p>Reinforcement-learning agent steering a GAN for point-cloud completion.</p></div>
    </div>
  </section>

  <section id="contact">
    <h3 class="section-title">Contact</h3>
    <p>Find me on <a href="https://github.com/">GitHub</a> or send an email; I read everything.</p>
  </section>

  <div class="visitor-badge">Visitors: <strong id="visitor-count">...</strong></div>

  <script>
    fetch("/visit", { method: "POST" })
      .then((response) => response.json())
      .then((data) => {
        if (data.success && typeof data.count === "number") {
          document.getElementById("visitor-count").textContent = data.count.toLocaleString();
        }
      })
      .catch(() => {});
  </script>
</body>
</html>
"##;

const ADMIN_LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Admin Login</title>
  <style>
    body {
      margin: 0;
      min-height: 100vh;
      display: grid;
      place-items: center;
      background: #111827;
      color: #e5e7eb;
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    form {
      background: #1f2937;
      padding: 32px;
      border-radius: 12px;
      display: grid;
      gap: 12px;
      width: min(360px, 90vw);
    }

    input, button {
      padding: 10px;
      border-radius: 8px;
      border: 1px solid #374151;
      font: inherit;
    }

    button {
      background: #2563eb;
      color: #fff;
      border: none;
      cursor: pointer;
    }

    .error {
      color: #f87171;
      min-height: 1.2em;
    }
  </style>
</head>
<body>
  <form id="login">
    <h1>Admin Login</h1>
    <input name="username" placeholder="Username" autocomplete="username" required />
    <input name="password" type="password" placeholder="Password" autocomplete="current-password" required />
    <button type="submit">Sign in</button>
    <div class="error" id="error"></div>
  </form>
  <script>
    document.getElementById("login").addEventListener("submit", async (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      const response = await fetch("/login", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ username: form.get("username"), password: form.get("password") }),
      });
      if (response.ok) {
        window.location.reload();
      } else {
        document.getElementById("error").textContent = "Invalid username or password";
      }
    });
  </script>
</body>
</html>
"#;

const ADMIN_DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Visitor Statistics</title>
  <style>
    body {
      margin: 0;
      background: #111827;
      color: #e5e7eb;
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    main {
      max-width: 1100px;
      margin: 0 auto;
      padding: 32px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .panel {
      background: #1f2937;
      border-radius: 10px;
      padding: 24px;
      margin-top: 24px;
    }

    .total {
      font-size: 1.6rem;
      font-weight: 700;
      color: #3b82f6;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 10px 6px;
      border-bottom: 1px solid #374151;
      vertical-align: top;
    }

    th {
      color: #9ca3af;
    }

    td.empty {
      color: #9ca3af;
      text-align: center;
    }

    button {
      padding: 8px 16px;
      border: none;
      border-radius: 8px;
      background: #dc2626;
      color: #fff;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Visitor Statistics</h1>
      <div>Signed in as {{USER}} <button id="logout">Logout</button></div>
    </header>

    <div class="panel">
      <h2>Summary</h2>
      <div class="total">Total Visits: {{TOTAL}}</div>
      <p>Showing the {{SHOWN}} most recent visits.</p>
    </div>

    <div class="panel">
      <h2>Recent Visitors</h2>
      <table>
        <thead>
          <tr><th>Time</th><th>Source</th><th>Device</th></tr>
        </thead>
        <tbody>
{{ROWS}}
        </tbody>
      </table>
    </div>
  </main>
  <script>
    document.getElementById("logout").addEventListener("click", async () => {
      await fetch("/logout", { method: "POST" });
      window.location.reload();
    });
  </script>
</body>
</html>
"#;
