// templates/pages/overview.rs

use crate::domain::{MapState, MarkerStatus};
use crate::templates::{card, desktop_layout, status_badge};
use maud::{html, Markup};

pub fn overview_page(state: &MapState) -> Markup {
    let summary = state.markers().summary();
    let unmapped = state.properties().len().saturating_sub(state.markers().len());

    desktop_layout(
        "Overview",
        html! {
            main class="container" {
                h1 { "Overview" }
                p { "Revision " strong { (state.revision()) } }

                (card("Markers", html! {
                    ul {
                        li { (status_badge(MarkerStatus::Active)) " " (summary.active) }
                        li { (status_badge(MarkerStatus::Pending)) " " (summary.pending) }
                        li { (status_badge(MarkerStatus::Inactive)) " " (summary.inactive) }
                    }
                    @if unmapped > 0 {
                        p { (unmapped) " properties have no usable coordinates and are not on the map." }
                    }
                }))

                (card("Properties", html! {
                    @if state.markers().is_empty() {
                        p { "No properties on the map yet." }
                    } @else {
                        table {
                            thead {
                                tr {
                                    th { "Property" }
                                    th { "Address" }
                                    th { "Location" }
                                    th { "Status" }
                                    th { "Jobs" }
                                }
                            }
                            tbody {
                                @for marker in state.markers().iter() {
                                    tr {
                                        td { (marker.name.as_deref().unwrap_or(&marker.id)) }
                                        td { (marker.address.as_deref().unwrap_or("-")) }
                                        td { (format!("{:.5}, {:.5}", marker.coordinates.latitude, marker.coordinates.longitude)) }
                                        td { (status_badge(marker.status)) }
                                        td {
                                            @for job in &marker.jobs {
                                                div {
                                                    (job.title.as_deref().unwrap_or(&job.id))
                                                    " (" (job.status) ")"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }))
            }
        },
    )
}
