use shared::BookingCalendar;
use yew::prelude::*;

use super::availability_calendar::AvailabilityCalendar;
use super::time_slot_select::TimeSlotSelect;
use crate::hooks::use_booking_calendar::UseBookingCalendarActions;
use crate::hooks::use_demo_booking::SubmitStatus;
use crate::services::date_utils::format_date_for_display;

#[derive(Properties, PartialEq)]
pub struct ScheduleStepProps {
    pub calendar: BookingCalendar,
    pub actions: UseBookingCalendarActions,
    pub status: SubmitStatus,
    pub on_back: Callback<MouseEvent>,
}

/// Calendar, bound date input, time selector and submit button
#[function_component(ScheduleStep)]
pub fn schedule_step(props: &ScheduleStepProps) -> Html {
    let calendar = &props.calendar;
    let selected_date = calendar.selected_date().map(str::to_string);
    let submitting = props.status == SubmitStatus::Submitting;

    html! {
        <>
            <AvailabilityCalendar
                calendar={calendar.clone()}
                on_prev_month={props.actions.prev_month.clone()}
                on_next_month={props.actions.next_month.clone()}
                on_select_date={props.actions.select_date.clone()}
            />

            <div class="form-group">
                <label for="meeting-date">{"Date"}</label>
                <input
                    type="text"
                    id="meeting-date"
                    name="meeting_date"
                    readonly=true
                    placeholder="Pick a date above"
                    value={selected_date.clone().unwrap_or_default()}
                />
                {if let Some(date) = &selected_date {
                    html! { <small class="date-hint">{format_date_for_display(date)}</small> }
                } else { html! {} }}
            </div>

            <TimeSlotSelect
                options={calendar.time_options().to_vec()}
                selected={calendar.selected_time().map(str::to_string)}
                on_change={props.actions.select_time.clone()}
                disabled={selected_date.is_none()}
            />

            {match &props.status {
                SubmitStatus::Success(message) => html! {
                    <div class="form-message success">{message}</div>
                },
                SubmitStatus::Failed(error) => html! {
                    <div class="form-message error">{error}</div>
                },
                SubmitStatus::Idle | SubmitStatus::Submitting => html! {},
            }}

            <div class="form-actions">
                <button type="button" class="btn prev-btn" onclick={props.on_back.clone()}>
                    {"Back"}
                </button>
                <button
                    type="submit"
                    id="submit-booking"
                    class="btn btn-primary"
                    disabled={submitting || !calendar.is_complete()}
                >
                    {if submitting { "Booking..." } else { "Book demo" }}
                </button>
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlButtonElement, HtmlInputElement};

    use crate::components::test_support::{change_select, click, mount, query, settle};
    use crate::hooks::use_booking_calendar::{CalendarAction, CalendarStore};

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        loaded: bool,
    }

    /// Drives `ScheduleStep` from a local store instead of the network
    #[function_component(Harness)]
    fn harness(props: &HarnessProps) -> Html {
        let loaded = props.loaded;
        let store = use_reducer(move || {
            let mut calendar = BookingCalendar::new(2024, 3);
            if loaded {
                let mut booked = BTreeMap::new();
                booked.insert("2024-03-11".to_string(), vec!["09:00".to_string()]);
                calendar.set_booked_date_times(booked);
            }
            CalendarStore::new(calendar)
        });

        let dispatcher = store.dispatcher();
        let actions = UseBookingCalendarActions {
            prev_month: {
                let dispatcher = dispatcher.clone();
                Callback::from(move |_: MouseEvent| dispatcher.dispatch(CalendarAction::Navigate(-1)))
            },
            next_month: {
                let dispatcher = dispatcher.clone();
                Callback::from(move |_: MouseEvent| dispatcher.dispatch(CalendarAction::Navigate(1)))
            },
            select_date: {
                let dispatcher = dispatcher.clone();
                Callback::from(move |date: String| dispatcher.dispatch(CalendarAction::SelectDate(date)))
            },
            select_time: Callback::from(move |time: String| dispatcher.dispatch(CalendarAction::SelectTime(time))),
        };

        html! {
            <ScheduleStep
                calendar={store.calendar.clone()}
                {actions}
                status={SubmitStatus::Idle}
                on_back={Callback::noop()}
            />
        }
    }

    fn submit_disabled(root: &web_sys::Element) -> bool {
        query::<HtmlButtonElement>(root, "#submit-booking").disabled()
    }

    #[wasm_bindgen_test]
    async fn test_grid_empty_until_availability_loaded() {
        let root = mount();
        let _app = yew::Renderer::<Harness>::with_root_and_props(root.clone(), HarnessProps { loaded: false }).render();
        settle().await;

        assert_eq!(query::<web_sys::Element>(&root, "#calendar-grid").child_element_count(), 0);
        assert_eq!(query::<web_sys::Element>(&root, "#current-month").text_content().unwrap(), "March 2024");
        assert!(submit_disabled(&root));
    }

    #[wasm_bindgen_test]
    async fn test_date_click_fills_meeting_date() {
        let root = mount();
        let _app = yew::Renderer::<Harness>::with_root_and_props(root.clone(), HarnessProps { loaded: true }).render();
        settle().await;

        let meeting_date = query::<HtmlInputElement>(&root, "#meeting-date");
        assert_eq!(meeting_date.value(), "");

        click(&root, "[data-date='2024-03-09']"); // Saturday
        settle().await;
        assert_eq!(meeting_date.value(), "");

        click(&root, "[data-date='2024-03-11']");
        settle().await;
        assert_eq!(meeting_date.value(), "2024-03-11");
        let cell = query::<web_sys::Element>(&root, "[data-date='2024-03-11']");
        assert!(cell.get_attribute("class").unwrap().contains("selected"));
    }

    #[wasm_bindgen_test]
    async fn test_submit_enabled_only_with_date_and_time() {
        let root = mount();
        let _app = yew::Renderer::<Harness>::with_root_and_props(root.clone(), HarnessProps { loaded: true }).render();
        settle().await;
        assert!(submit_disabled(&root));

        click(&root, "[data-date='2024-03-11']");
        settle().await;
        assert!(submit_disabled(&root));

        change_select(&root, "#meeting-time", "09:00"); // booked on the 11th
        settle().await;
        assert!(submit_disabled(&root));

        change_select(&root, "#meeting-time", "10:00");
        settle().await;
        assert!(!submit_disabled(&root));

        change_select(&root, "#meeting-time", "");
        settle().await;
        assert!(submit_disabled(&root));
    }
}
