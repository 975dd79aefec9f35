use yew::prelude::*;

use super::schedule_step::ScheduleStep;
use crate::hooks::use_booking_calendar::use_booking_calendar;
use crate::hooks::use_demo_booking::{use_demo_booking, BookingPanel};
use crate::services::api::ApiClient;

const TEAM_SIZES: [&str; 4] = ["1-10", "11-50", "51-200", "200+"];

#[derive(Properties, PartialEq)]
pub struct DemoBookingFormProps {
    pub api_client: ApiClient,
}

/// Two-panel demo booking form: contact details, then date and time
#[function_component(DemoBookingForm)]
pub fn demo_booking_form(props: &DemoBookingFormProps) -> Html {
    let calendar = use_booking_calendar(&props.api_client);
    let booking = use_demo_booking(&props.api_client);

    let state = &booking.state;
    let actions = &booking.actions;

    let onsubmit = {
        let submit = actions.submit.clone();
        let selection = calendar
            .state
            .selected_date()
            .map(str::to_string)
            .zip(calendar.state.selected_time().map(str::to_string));
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(selection) = selection.clone() {
                submit.emit(selection);
            }
        })
    };

    let details_style = match state.panel {
        BookingPanel::Details => "display: flex;",
        BookingPanel::Calendar => "display: none;",
    };
    let calendar_style = match state.panel {
        BookingPanel::Details => "display: none;",
        BookingPanel::Calendar => "display: flex;",
    };

    html! {
        <form class="demo-booking-form" {onsubmit}>
            <section class="book-appointment" style={details_style}>
                <h2>{"Book a demo"}</h2>
                <div class="form-group">
                    <label for="firm-name">{"Firm name"}</label>
                    <input type="text" id="firm-name" name="firm_name"
                        value={state.details.firm_name.clone()}
                        oninput={actions.on_firm_name_change.clone()} />
                </div>
                <div class="form-group">
                    <label for="company-type">{"Company type"}</label>
                    <input type="text" id="company-type" name="company_type"
                        value={state.details.company_type.clone()}
                        oninput={actions.on_company_type_change.clone()} />
                </div>
                <div class="form-group">
                    <label for="person-name">{"Your name"}</label>
                    <input type="text" id="person-name" name="person_name"
                        value={state.details.person_name.clone()}
                        oninput={actions.on_person_name_change.clone()} />
                </div>
                <div class="form-group">
                    <label for="title">{"Title"}</label>
                    <input type="text" id="title" name="title"
                        value={state.details.title.clone()}
                        oninput={actions.on_title_change.clone()} />
                </div>
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input type="email" id="email" name="email"
                        value={state.details.email.clone()}
                        oninput={actions.on_email_change.clone()} />
                </div>
                <div class="form-group">
                    <label for="team-size">{"Team size"}</label>
                    <select id="team-size" name="team_size" onchange={actions.on_team_size_change.clone()}>
                        <option value="" selected={state.details.team_size.is_empty()}>{"Select team size"}</option>
                        {for TEAM_SIZES.iter().map(|size| html! {
                            <option value={*size} selected={state.details.team_size == *size}>{*size}</option>
                        })}
                    </select>
                </div>
                <button type="button" class="btn next-btn" onclick={actions.show_calendar.clone()}>
                    {"Next"}
                </button>
            </section>

            <section class="calender-section" style={calendar_style}>
                <ScheduleStep
                    calendar={calendar.state.clone()}
                    actions={calendar.actions.clone()}
                    status={state.status.clone()}
                    on_back={actions.show_details.clone()}
                />
            </section>
        </form>
    }
}
