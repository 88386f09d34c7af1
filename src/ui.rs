use crate::catalog;
use crate::models::{Gym, GymStats, UserProfile};

pub fn render_index(gyms: &[Gym], stats: &GymStats, profile: &UserProfile) -> String {
    let rows: String = gyms.iter().map(|gym| render_gym_card(gym, stats, profile)).collect();

    // User-editable text goes in last so its braces are never expanded.
    INDEX_HTML
        .replace("{{VISITS}}", &stats.total_visits().to_string())
        .replace("{{CLIMBS}}", &stats.total_climbs.to_string())
        .replace("{{GYMS}}", &stats.unique_gyms().to_string())
        .replace("{{ROWS}}", &rows)
        .replace("{{IDENTITY}}", &render_identity(profile))
}

fn render_identity(profile: &UserProfile) -> String {
    format!(
        r#"<span class="avatar">{}</span>
      <div>
        <h1>{}</h1>"#,
        escape_html(&profile.avatar),
        escape_html(&profile.display_name),
    )
}

fn render_gym_card(gym: &Gym, stats: &GymStats, profile: &UserProfile) -> String {
    let key = gym.id.to_string();
    let (visits, climbs) = stats
        .visits
        .get(&key)
        .map_or((0, 0), |visit| (visit.visit_count, visit.climb_count));
    let badges: String = gym
        .facilities
        .iter()
        .map(|facility| format!(r#"<span title="{}">{}</span>"#, facility.label(), facility.icon()))
        .collect();
    let home = if profile.home_gym_id.as_deref() == Some(key.as_str()) {
        r#"<span class="home">Home gym</span>"#
    } else {
        ""
    };

    format!(
        r#"<article class="gym" data-id="{id}">
  <img src="{banner}" alt="" />
  <div class="gym-body">
    <h2>{name} {home}</h2>
    <p class="meta">{location} · {distance:.1} mi · ⭐ {rating:.1} · Open {open} - {close}</p>
    <p class="badges">{badges}</p>
    <p class="counts"><strong>{visits}</strong> visits · <strong>{climbs}</strong> climbs</p>
    <div class="actions">
      <button data-action="visit">Mark visited</button>
      <button data-action="climb">Log climb</button>
      <button data-action="home" class="ghost">Set home</button>
    </div>
  </div>
</article>
"#,
        id = gym.id,
        banner = catalog::banner_for(&gym.name),
        name = escape_html(&gym.name),
        location = escape_html(&gym.location),
        distance = gym.distance,
        rating = gym.rating,
        open = escape_html(&gym.hours.open),
        close = escape_html(&gym.hours.close),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Gym Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f0;
      --bg-2: #bfd8c8;
      --ink: #1f2a26;
      --accent: #e4572e;
      --accent-2: #29524a;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(41, 82, 74, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f6fbf8 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      display: grid;
      gap: 24px;
    }

    header {
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 28px 32px;
      display: flex;
      align-items: center;
      gap: 18px;
    }

    .avatar {
      font-size: 2.6rem;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .totals {
      margin: 4px 0 0;
      color: #4d5b56;
    }

    .gym {
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      overflow: hidden;
    }

    .gym img {
      width: 100%;
      height: 120px;
      object-fit: cover;
      background: var(--bg-2);
      display: block;
    }

    .gym-body {
      padding: 20px 24px 24px;
    }

    .gym h2 {
      margin: 0 0 6px;
      font-size: 1.3rem;
    }

    .meta,
    .counts {
      margin: 4px 0;
      color: #4d5b56;
    }

    .badges span {
      margin-right: 6px;
      font-size: 1.2rem;
    }

    .home {
      font-size: 0.8rem;
      background: var(--accent-2);
      color: #fff;
      border-radius: 999px;
      padding: 2px 10px;
      vertical-align: middle;
    }

    .actions {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      margin-top: 12px;
    }

    button {
      border: none;
      border-radius: 14px;
      padding: 10px 16px;
      font: inherit;
      font-weight: 600;
      background: var(--accent);
      color: #fff;
      cursor: pointer;
    }

    button.ghost {
      background: transparent;
      color: var(--accent-2);
      border: 2px solid var(--accent-2);
    }

    .notice {
      min-height: 1.2em;
      color: var(--accent);
      margin: 0;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      {{IDENTITY}}
        <p class="totals">{{VISITS}} visits · {{CLIMBS}} climbs · {{GYMS}} gyms</p>
      </div>
    </header>
    <p class="notice" id="notice"></p>
    {{ROWS}}
  </main>
  <script>
    const notice = document.getElementById('notice');

    document.querySelectorAll('.gym button').forEach((button) => {
      button.addEventListener('click', async () => {
        const id = button.closest('.gym').dataset.id;
        const action = button.dataset.action;
        const response = await fetch(`/api/gyms/${id}/${action}`, { method: 'POST' });
        if (response.ok) {
          window.location.reload();
          return;
        }
        notice.textContent = await response.text();
      });
    });
  </script>
</body>
</html>
"#;
