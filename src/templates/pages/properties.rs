use crate::domain::{PropertyPage, PropertySort};
use crate::templates::{desktop_layout, format_amount, Nav};
use maud::{html, Markup};

fn page_href(page: u32, sort: PropertySort) -> String {
    format!("/properties?page={}&sort={}", page, sort.code())
}

pub fn properties_page(nav: &Nav, page: &PropertyPage) -> Markup {
    let sort = page.query.sort;

    desktop_layout(
        "Properties",
        nav,
        html! {
            main class="container" {
                h1 { "Available properties" }

                form action="/properties" method="get" class="inline" {
                    label for="sort" { "Sort by" }
                    select name="sort" id="sort" onchange="this.form.submit()" {
                        @for choice in PropertySort::ALL {
                            option value=(choice.code()) selected[choice == sort] { (choice.label()) }
                        }
                    }
                    noscript { button type="submit" { "Apply" } }
                }

                p class="muted" { (page.total_count) " properties" }

                @if page.listings.is_empty() {
                    p { "No properties are listed right now." }
                } @else {
                    div class="grid" {
                        @for listing in &page.listings {
                            article class="card property" {
                                h3 { (listing.name) }
                                @if let Some(location) = &listing.location {
                                    p class="muted" { (location) }
                                }
                                p {
                                    strong { (format_amount(listing.monthly_price)) } " / month"
                                }
                                p {
                                    (listing.available_rooms) " room(s) available"
                                    @if let Some(kind) = &listing.property_type {
                                        " · " (kind)
                                    }
                                }
                            }
                        }
                    }
                }

                nav class="pagination" {
                    @if page.has_prev() {
                        a href=(page_href(page.query.page - 1, sort)) rel="prev" { "← Previous" }
                    }
                    span { "Page " (page.query.page) " of " (page.total_pages()) }
                    @if page.has_next() {
                        a href=(page_href(page.query.page + 1, sort)) rel="next" { "Next →" }
                    }
                }
            }
        },
    )
}
