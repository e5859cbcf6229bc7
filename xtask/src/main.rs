use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::fs;
use tracing_subscriber::EnvFilter;

const VIEWPORT_WIDTH: f64 = 1200.0;
const VIEWPORT_HEIGHT: f64 = 900.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => {
            let Some(dir) = args.get(2) else {
                usage();
                std::process::exit(1);
            };
            let dir = Utf8PathBuf::from(dir);
            let out = args
                .get(3)
                .map(Utf8PathBuf::from)
                .unwrap_or_else(|| dir.join("gallery.html"));
            gallery(&dir, &out);
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command>");
    eprintln!("Commands:");
    eprintln!("  gallery <dir> [out]    Render every drawing in <dir> into one HTML page");
}

/// One rendered drawing: its file name and either SVG or an error report
struct Entry {
    name: String,
    outcome: Result<String, String>,
}

fn gallery(dir: &Utf8Path, out: &Utf8Path) {
    let mut paths: Vec<Utf8PathBuf> = dir
        .read_dir_utf8()
        .unwrap_or_else(|e| panic!("Failed to read {dir}: {e}"))
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.extension() == Some("json"))
        .collect();
    paths.sort();

    let entries: Vec<Entry> = paths
        .par_iter()
        .map(|path| {
            let name = path.file_name().unwrap_or(path.as_str()).to_string();
            let outcome = fs::read_to_string(path)
                .map_err(|e| format!("Error: {e}"))
                .and_then(|source| {
                    plansvg::render_json(&source, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
                        .map_err(|report| format!("{report:?}"))
                });
            Entry { name, outcome }
        })
        .collect();

    let failed = entries.iter().filter(|e| e.outcome.is_err()).count();

    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Drawing Gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 0; background: #eee; color: #333; }
        .page { max-width: 1280px; margin: 0 auto; padding: 24px; }
        h1 { font-weight: 600; font-size: 20px; margin: 0 0 24px 0; }
        .card { background: white; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.08); margin-bottom: 16px; overflow: hidden; }
        .card-header { padding: 12px 16px; border-bottom: 1px solid #eee; background: #fafafa; font-weight: 500; }
        .card-body { padding: 16px; }
        .card-body svg { max-width: 100%; height: auto; }
        .error { background: #fff5f5; color: #c53030; white-space: pre-wrap; font-family: monospace; font-size: 12px; }
    </style>
</head>
<body>
<div class="page">
"#,
    );
    html.push_str(&format!(
        "<h1>{} drawings, {} failed</h1>\n",
        entries.len(),
        failed
    ));

    for entry in &entries {
        html.push_str(r#"<div class="card">"#);
        html.push_str(&format!(
            r#"<div class="card-header">{}</div>"#,
            html_escape(&entry.name)
        ));
        match &entry.outcome {
            Ok(svg) => html.push_str(&format!(r#"<div class="card-body">{svg}</div>"#)),
            Err(report) => html.push_str(&format!(
                r#"<div class="card-body error">{}</div>"#,
                html_escape(report)
            )),
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</body>\n</html>\n");

    fs::write(out, html).unwrap_or_else(|e| panic!("Failed to write {out}: {e}"));
    eprintln!("Wrote {out} ({} drawings, {failed} failed)", entries.len());
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
