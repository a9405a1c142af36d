//! CardAnimated: Thaw `Card` with the `card-appear` entrance animation.
//!
//! ```ignore
//! <CardAnimated delay_ms=0>"first"</CardAnimated>
//! <CardAnimated delay_ms=80>"second"</CardAnimated>
//! ```

use leptos::prelude::*;
use thaw::Card;

/// Обёртка над Thaw [`Card`] с анимацией `card-appear` из `index.css`.
#[component]
pub fn CardAnimated(
    /// Задержка анимации в миллисекундах (stagger-эффект)
    #[prop(optional)]
    delay_ms: u32,
    /// Дополнительный CSS class карточки
    #[prop(optional, into)]
    class: String,
    #[prop(optional, into)]
    title: Option<String>,
    children: Children,
) -> impl IntoView {
    let style = format!("animation: card-appear 0.28s ease-out {}ms both;", delay_ms);
    let class = if class.is_empty() {
        "dashboard-card".to_string()
    } else {
        format!("dashboard-card {}", class)
    };

    view! {
        <Card attr:style=style attr:class=class>
            {title.map(|t| view! { <h3 class="dashboard-card__title">{t}</h3> })}
            {children()}
        </Card>
    }
}
