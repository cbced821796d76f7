//! Standalone HTML snapshot of the dashboard

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};

use qd_core::{DashboardController, MagnitudeBand, StatCard};

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; background: #f8fafc; color: #1e293b; margin: 2rem; }
    h1 { font-size: 1.5rem; margin-bottom: 0.25rem; }
    .generated { color: #64748b; font-size: 0.85rem; }
    .cards { display: flex; gap: 1rem; margin: 1.5rem 0; }
    .card { background: #fff; border: 1px solid #e2e8f0; border-radius: 8px; padding: 1rem; flex: 1; }
    .card .caption { color: #64748b; font-size: 0.8rem; }
    .card .headline { font-size: 1.6rem; font-weight: 700; }
    .card .detail { font-size: 0.85rem; }
    table { border-collapse: collapse; width: 100%; background: #fff; margin-bottom: 1.5rem; }
    th, td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #e2e8f0; }
    .mag-value { font-weight: 700; }
    .felt { background: #e0f2fe; border-radius: 4px; padding: 0 0.4rem; font-size: 0.8rem; }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render the stat cards, current filters, strong-quake list and per-year counts
pub fn render_snapshot_html(dashboard: &DashboardController, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();
    let thresholds = dashboard.thresholds();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Earthquake dashboard snapshot</title>\n<style>");
    html.push_str(STYLE);
    html.push_str(&band_styles());
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str("<h1>Earthquake dashboard</h1>\n");
    let _ = writeln!(
        html,
        "<p class=\"generated\">Generated {} UTC. Filters: magnitude {}, years {}. {} on map.</p>",
        generated_at.format("%d/%m/%Y %H:%M"),
        escape_html(&thresholds.magnitude_label()),
        escape_html(&thresholds.year_label()),
        dashboard.visible_count(),
    );

    html.push_str("<div class=\"cards\">\n");
    for card in dashboard.stats().cards() {
        render_card(&mut html, &card);
    }
    html.push_str("</div>\n");

    html.push_str("<h2>Strong quakes</h2>\n");
    let rows = dashboard.strong_quakes();
    if rows.is_empty() {
        html.push_str("<p>No strong earthquakes recorded.</p>\n");
    } else {
        html.push_str("<table>\n<tr><th>Mag</th><th>Place</th><th>Date</th><th>Felt</th></tr>\n");
        for row in rows {
            let felt = row
                .felt_badge()
                .map(|badge| format!("<span class=\"felt\">{}</span>", escape_html(&badge)))
                .unwrap_or_default();
            let _ = writeln!(
                html,
                "<tr id=\"quake-{id}\"><td class=\"mag-value {class}\">{mag}</td><td>{place}</td><td>{date}</td><td>{felt}</td></tr>",
                id = escape_html(&row.quake_id),
                class = row.band.css_class(),
                mag = escape_html(&row.magnitude_label),
                place = escape_html(&row.place_label),
                date = escape_html(&row.date_label),
                felt = felt,
            );
        }
        html.push_str("</table>\n");
    }

    let series = dashboard.year_series();
    if !series.is_empty() {
        html.push_str("<h2>By year</h2>\n");
        html.push_str("<table>\n<tr><th>Year</th><th>Earthquakes</th><th>Strongest</th></tr>\n");
        for bucket in series.buckets() {
            let _ = writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td class=\"mag-value {}\">M {:.1}</td></tr>",
                bucket.year,
                bucket.count,
                MagnitudeBand::classify(bucket.max_magnitude).css_class(),
                bucket.max_magnitude,
            );
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Render and write the snapshot to `path`
pub fn write_snapshot(
    path: &Path,
    dashboard: &DashboardController,
    generated_at: DateTime<Utc>,
) -> std::io::Result<()> {
    std::fs::write(path, render_snapshot_html(dashboard, generated_at))?;
    tracing::info!("Wrote snapshot to {}", path.display());
    Ok(())
}

fn render_card(html: &mut String, card: &StatCard) {
    let class = card.band.map(MagnitudeBand::css_class).unwrap_or("");
    let _ = writeln!(
        html,
        "<div class=\"card\"><div class=\"caption\">{}</div><div class=\"headline mag-value {}\">{}</div><div class=\"detail\">{}</div></div>",
        escape_html(&card.caption),
        class,
        escape_html(&card.headline),
        card.detail.as_deref().map(escape_html).unwrap_or_default(),
    );
}

fn band_styles() -> String {
    [
        MagnitudeBand::Major,
        MagnitudeBand::Strong,
        MagnitudeBand::Moderate,
        MagnitudeBand::Light,
    ]
    .iter()
    .map(|band| format!("    .{} {{ color: {}; }}\n", band.css_class(), band.hex()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::TimeZone;
    use qd_core::{Dataset, DashboardSettings, EventBus, GeoCoord, Quake};

    fn dashboard(quakes: Vec<Quake>) -> DashboardController {
        DashboardController::new(
            Dataset::new(quakes),
            DashboardSettings::default(),
            Arc::new(EventBus::new()),
        )
    }

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_snapshot_contains_cards_and_rows() {
        let dashboard = dashboard(vec![
            Quake::new("us1", 1_615_118_400_000, Some(5.1), "Sylhet, Bangladesh", GeoCoord::new(24.77, 91.93))
                .with_felt(37),
            Quake::new("us2", 1_715_118_400_000, Some(3.2), "Dhaka, Bangladesh", GeoCoord::new(23.7, 90.4)),
        ]);
        let html = render_snapshot_html(&dashboard, generated());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Generated 01/05/2024 12:30 UTC"));
        assert!(html.contains("Total Recorded Quakes"));
        assert!(html.contains("Strongest Ever"));
        assert!(html.contains("<tr id=\"quake-us1\"><td class=\"mag-value mag-5\">M 5.1</td><td>Sylhet</td>"));
        assert!(html.contains("Felt: 37"));
        // Below the list threshold
        assert!(!html.contains("quake-us2"));
        assert!(html.contains("<td>2021</td><td>1</td>"));
        assert!(html.contains("<td>2024</td><td>1</td>"));
    }

    #[test]
    fn test_snapshot_escapes_untrusted_text() {
        let dashboard = dashboard(vec![Quake::new(
            "<id>",
            1_615_118_400_000,
            Some(6.3),
            "<script>alert(1)</script>, Somewhere",
            GeoCoord::new(24.0, 91.0),
        )]);
        let html = render_snapshot_html(&dashboard, generated());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("quake-&lt;id&gt;"));
    }

    #[test]
    fn test_snapshot_of_empty_dataset() {
        let html = render_snapshot_html(&dashboard(Vec::new()), generated());
        assert!(html.contains("No strong earthquakes recorded."));
        assert!(html.contains("No data"));
        assert!(!html.contains("By year"));
    }

    #[test]
    fn test_write_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.html");
        write_snapshot(&path, &dashboard(Vec::new()), generated()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Earthquake dashboard"));
    }
}
