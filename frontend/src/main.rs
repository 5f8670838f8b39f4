use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::standards_page::StandardsPage;

#[function_component(App)]
fn app() -> Html {
    html! {
        <StandardsPage />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
