//! HTML page listing the cached versions

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::monitor::types::Snapshot;
use crate::server::drift::classify;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; }
th, td { padding: 0.4em 1em; border-bottom: 1px solid #ddd; text-align: left; }
tr.outdated td { background: #fde2e1; }
tr.newer td { background: #e1ecfd; }
tr.unknown td { background: #fdf6e1; }
footer { margin-top: 1em; color: #666; font-size: 0.9em; }
"#;

/// Render `snapshot` as a complete HTML document, rows sorted by target name
pub fn render(snapshot: &Snapshot) -> String {
    let mut versions: Vec<_> = snapshot.versions.iter().collect();
    versions.sort_by(|a, b| a.name.cmp(&b.name));

    let mut rows = String::new();
    for version in versions {
        let drift = classify(&version.current, &version.latest);
        // Writing into a String cannot fail
        let _ = writeln!(
            rows,
            r#"<tr class="{}"><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            encode_double_quoted_attribute(drift.as_str()),
            encode_text(&version.name),
            encode_text(&version.current),
            encode_text(&version.latest),
        );
    }

    let fetched_at = snapshot
        .fetched_at
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Version Monitor</title>
<style>{STYLE}</style>
</head>
<body>
<h1>Version Monitor</h1>
<table>
<thead><tr><th>Name</th><th>Current</th><th>Latest</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<footer>Fetched at {fetched_at}</footer>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::types::Version;
    use chrono::{TimeZone, Utc};

    fn version(name: &str, current: &str, latest: &str) -> Version {
        Version {
            name: name.to_string(),
            current: current.to_string(),
            latest: latest.to_string(),
        }
    }

    #[test]
    fn render_sorts_rows_and_marks_drift() {
        let snapshot = Snapshot {
            versions: vec![version("zeta", "1.0.0", "1.0.0"), version("alpha", "1.0.0", "2.0.0")],
            fetched_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
        };

        let html = render(&snapshot);

        let alpha = html
            .find(r#"<tr class="outdated"><td>alpha</td><td>1.0.0</td><td>2.0.0</td></tr>"#)
            .unwrap();
        let zeta = html
            .find(r#"<tr class="up-to-date"><td>zeta</td>"#)
            .unwrap();
        assert!(alpha < zeta);
        assert!(html.contains("Fetched at 2024-05-01 12:30:00 UTC"));
    }

    #[test]
    fn render_escapes_version_strings() {
        let snapshot = Snapshot {
            versions: vec![version("<svc>", "1.0 & more", "\"2.0\" </td>")],
            fetched_at: None,
        };

        let html = render(&snapshot);

        assert!(html.contains(r#"<td>&lt;svc&gt;</td><td>1.0 &amp; more</td><td>"2.0" &lt;/td&gt;</td>"#));
        assert!(!html.contains("<svc>"));
        assert!(html.contains("Fetched at never"));
    }
}
