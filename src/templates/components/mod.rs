use crate::domain::MarkerStatus;
use maud::{html, Markup};

pub mod error;

pub use error::error_page;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

pub fn status_badge(status: MarkerStatus) -> Markup {
    html! {
        span class=(format!("badge badge-{}", status.as_str())) { (status.as_str()) }
    }
}
