use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }"
                    "table { border-collapse: collapse; width: 100%; }"
                    "th, td { text-align: left; padding: 0.35rem 0.5rem; border-bottom: 1px solid #e5e7eb; }"
                    ".badge { padding: 0.1rem 0.5rem; border-radius: 999px; font-size: 0.85em; }"
                    ".badge-active { background: #dcfce7; color: #166534; }"
                    ".badge-pending { background: #fef9c3; color: #854d0e; }"
                    ".badge-inactive { background: #f3f4f6; color: #4b5563; }"
                }
            }
            body {
                header {
                    h3 { "Property Job Map" }
                    nav {
                        a href="/" { "Overview" }
                        " · "
                        a href="/markers" { "Markers (JSON)" }
                        " · "
                        a href="/refreshes" { "Refresh log" }
                    }
                }
                (content)
            }
        }
    }
}
