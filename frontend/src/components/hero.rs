//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"POC Deck Generator"</h1>
            <p class="subtitle">
                "Upload the Excel datasheet and your PowerPoint template. "
                "The tables and charts of the template are refreshed and the updated deck is downloaded."
            </p>
        </div>
    }
}
