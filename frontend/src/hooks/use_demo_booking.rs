use shared::DemoBookingRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Which half of the booking form is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPanel {
    Details,
    Calendar,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStatus {
    Idle,
    Submitting,
    Success(String),
    Failed(String),
}

#[derive(Clone, PartialEq)]
pub struct DemoBookingState {
    pub panel: BookingPanel,
    pub details: DemoBookingRequest,
    pub status: SubmitStatus,
}

pub struct UseDemoBookingResult {
    pub state: DemoBookingState,
    pub actions: UseDemoBookingActions,
}

#[derive(Clone, PartialEq)]
pub struct UseDemoBookingActions {
    pub show_calendar: Callback<MouseEvent>,
    pub show_details: Callback<MouseEvent>,
    pub on_firm_name_change: Callback<InputEvent>,
    pub on_company_type_change: Callback<InputEvent>,
    pub on_person_name_change: Callback<InputEvent>,
    pub on_title_change: Callback<InputEvent>,
    pub on_email_change: Callback<InputEvent>,
    pub on_team_size_change: Callback<Event>,
    /// Submits the details together with the chosen (date, time)
    pub submit: Callback<(String, String)>,
}

fn text_field(
    details: &UseStateHandle<DemoBookingRequest>,
    apply: fn(&mut DemoBookingRequest, String),
) -> Callback<InputEvent> {
    let details = details.clone();
    Callback::from(move |e: InputEvent| {
        let value = e.target_unchecked_into::<HtmlInputElement>().value();
        let mut updated = (*details).clone();
        apply(&mut updated, value);
        details.set(updated);
    })
}

#[hook]
pub fn use_demo_booking(api_client: &ApiClient) -> UseDemoBookingResult {
    let panel = use_state(|| BookingPanel::Details);
    let details = use_state(DemoBookingRequest::default);
    let status = use_state(|| SubmitStatus::Idle);

    let show_calendar = {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| panel.set(BookingPanel::Calendar))
    };

    let show_details = {
        let panel = panel.clone();
        Callback::from(move |_: MouseEvent| panel.set(BookingPanel::Details))
    };

    let on_team_size_change = {
        let details = details.clone();
        Callback::from(move |e: Event| {
            let value = e.target_unchecked_into::<HtmlSelectElement>().value();
            let mut updated = (*details).clone();
            updated.team_size = value;
            details.set(updated);
        })
    };

    let submit = {
        let api_client = api_client.clone();
        let details = details.clone();
        let status = status.clone();
        Callback::from(move |(meeting_date, meeting_time): (String, String)| {
            if *status == SubmitStatus::Submitting {
                return;
            }

            let request = DemoBookingRequest {
                meeting_date,
                meeting_time,
                ..(*details).clone()
            };
            let missing = request.missing_fields();
            if !missing.is_empty() {
                status.set(SubmitStatus::Failed(format!(
                    "Please fill in: {}",
                    missing.join(", ").replace('_', " ")
                )));
                return;
            }

            let api_client = api_client.clone();
            let status = status.clone();
            status.set(SubmitStatus::Submitting);
            spawn_local(async move {
                match api_client.book_demo(&request).await {
                    Ok(response) => {
                        Logger::info_with_component(
                            "demo-booking",
                            &format!("Booked {} {}", request.meeting_date, request.meeting_time),
                        );
                        status.set(SubmitStatus::Success(response.message));
                    }
                    Err(e) => {
                        Logger::warn_with_component("demo-booking", &format!("Booking failed: {}", e));
                        status.set(SubmitStatus::Failed(e));
                    }
                }
            });
        })
    };

    let actions = UseDemoBookingActions {
        show_calendar,
        show_details,
        on_firm_name_change: text_field(&details, |d, v| d.firm_name = v),
        on_company_type_change: text_field(&details, |d, v| d.company_type = v),
        on_person_name_change: text_field(&details, |d, v| d.person_name = v),
        on_title_change: text_field(&details, |d, v| d.title = v),
        on_email_change: text_field(&details, |d, v| d.email = v),
        on_team_size_change,
        submit,
    };

    let state = DemoBookingState {
        panel: *panel,
        details: (*details).clone(),
        status: (*status).clone(),
    };

    UseDemoBookingResult { state, actions }
}
