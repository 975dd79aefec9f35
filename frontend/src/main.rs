use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::demo_booking_form::DemoBookingForm;
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());

    html! {
        <main class="demo-page">
            <DemoBookingForm api_client={(*api_client).clone()} />
        </main>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
