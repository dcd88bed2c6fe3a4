//! JSON API consumed by the dashboard, plus the embeddable badge.

mod badge;
mod check;
mod endpoints;

#[cfg(test)]
mod tests;

macros_utils::routes! {
    configure endpoints::routes,
    configure check::routes,
    configure badge::routes,
}
