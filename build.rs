use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=frontend/dist");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        eprintln!("Warning: CARGO_MANIFEST_DIR is not set, skipping frontend check");
        return;
    };
    let dist_path = Path::new(&manifest_dir).join("frontend/dist");

    if !dist_path.exists() {
        eprintln!("Warning: frontend/dist directory not found!");
        eprintln!("Build the dashboard first:");
        eprintln!("  cd frontend && npm install && npm run build");

        if let Err(e) = create_placeholder(&dist_path) {
            eprintln!("Warning: failed to create placeholder dashboard: {e}");
        }
    }
}

/// 前端未构建时生成占位页面，保证 rust-embed 目录存在
fn create_placeholder(dist_path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dist_path.join("assets"))?;

    let placeholder_html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>School Admin - dashboard not built</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 600px;
            margin: 100px auto;
            padding: 20px;
            text-align: center;
        }
        .notice {
            background: #e8f1ff;
            border: 1px solid #b6d0f7;
            padding: 20px;
            border-radius: 8px;
        }
        code {
            background: #f1f3f4;
            padding: 2px 6px;
            border-radius: 4px;
        }
    </style>
</head>
<body>
    <h1>School Admin</h1>
    <div class="notice">
        <p>The API is running, but the dashboard bundle was not found.</p>
        <p><code>cd frontend && npm install && npm run build</code></p>
    </div>
</body>
</html>"#;

    fs::write(dist_path.join("index.html"), placeholder_html)?;
    fs::write(dist_path.join("favicon.ico"), [])?;
    Ok(())
}
