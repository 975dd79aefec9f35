use std::collections::BTreeMap;
use std::rc::Rc;

use shared::BookingCalendar;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::current_year_month;
use crate::services::logging::Logger;

const COMPONENT: &str = "booking-calendar";

/// Everything that can change the widget state
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarAction {
    Navigate(i32),
    SelectDate(String),
    SelectTime(String),
    BookedDatesLoaded(Vec<String>),
    BookedDateTimesLoaded(BTreeMap<String, Vec<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarStore {
    pub calendar: BookingCalendar,
}

impl CalendarStore {
    pub fn new(calendar: BookingCalendar) -> Self {
        Self { calendar }
    }
}

impl Reducible for CalendarStore {
    type Action = CalendarAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut calendar = self.calendar.clone();
        let changed = match action {
            CalendarAction::Navigate(delta) => {
                calendar.navigate(delta);
                true
            }
            CalendarAction::SelectDate(date) => calendar.select_date(&date),
            CalendarAction::SelectTime(time) => calendar.select_time(&time),
            CalendarAction::BookedDatesLoaded(dates) => {
                calendar.set_booked_dates(dates);
                true
            }
            CalendarAction::BookedDateTimesLoaded(date_times) => {
                calendar.set_booked_date_times(date_times);
                true
            }
        };

        if changed {
            Rc::new(Self { calendar })
        } else {
            self
        }
    }
}

pub struct UseBookingCalendarResult {
    pub state: BookingCalendar,
    pub actions: UseBookingCalendarActions,
}

#[derive(Clone, PartialEq)]
pub struct UseBookingCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub select_date: Callback<String>,
    pub select_time: Callback<String>,
}

/// Widget state plus the one-time availability fetch
#[hook]
pub fn use_booking_calendar(api_client: &ApiClient) -> UseBookingCalendarResult {
    let store = use_reducer(|| {
        let (year, month) = current_year_month();
        CalendarStore::new(BookingCalendar::new(year, month))
    });

    // Both requests run independently; each one renders when it lands.
    // A failed request leaves its half of the data empty.
    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            {
                let api_client = api_client.clone();
                let dispatcher = dispatcher.clone();
                spawn_local(async move {
                    match api_client.get_booked_dates().await {
                        Ok(sanitized) => {
                            if sanitized.rejected > 0 {
                                Logger::warn_with_component(
                                    COMPONENT,
                                    &format!("Dropped {} malformed booked date entries", sanitized.rejected),
                                );
                            }
                            Logger::debug_with_component(
                                COMPONENT,
                                &format!("Loaded {} booked dates", sanitized.data.len()),
                            );
                            dispatcher.dispatch(CalendarAction::BookedDatesLoaded(sanitized.data));
                        }
                        Err(e) => {
                            Logger::error_with_component(COMPONENT, &format!("Failed to fetch booked dates: {}", e));
                        }
                    }
                });
            }

            spawn_local(async move {
                match api_client.get_booked_dates_times().await {
                    Ok(sanitized) => {
                        if sanitized.rejected > 0 {
                            Logger::warn_with_component(
                                COMPONENT,
                                &format!("Dropped {} malformed booked slot entries", sanitized.rejected),
                            );
                        }
                        Logger::debug_with_component(
                            COMPONENT,
                            &format!("Loaded booked slots for {} dates", sanitized.data.len()),
                        );
                        dispatcher.dispatch(CalendarAction::BookedDateTimesLoaded(sanitized.data));
                    }
                    Err(e) => {
                        Logger::error_with_component(COMPONENT, &format!("Failed to fetch booked time slots: {}", e));
                    }
                }
            });

            || ()
        });
    }

    let prev_month = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: MouseEvent, _| {
            dispatcher.dispatch(CalendarAction::Navigate(-1));
        })
    };

    let next_month = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: MouseEvent, _| {
            dispatcher.dispatch(CalendarAction::Navigate(1));
        })
    };

    let select_date = {
        let dispatcher = store.dispatcher();
        use_callback((), move |date: String, _| {
            dispatcher.dispatch(CalendarAction::SelectDate(date));
        })
    };

    let select_time = {
        let dispatcher = store.dispatcher();
        use_callback((), move |time: String, _| {
            dispatcher.dispatch(CalendarAction::SelectTime(time));
        })
    };

    UseBookingCalendarResult {
        state: store.calendar.clone(),
        actions: UseBookingCalendarActions {
            prev_month,
            next_month,
            select_date,
            select_time,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn store() -> Rc<CalendarStore> {
        Rc::new(CalendarStore::new(BookingCalendar::new(2024, 3)))
    }

    #[wasm_bindgen_test]
    fn test_navigation_actions() {
        let state = store().reduce(CalendarAction::Navigate(-3));
        assert_eq!((state.calendar.year(), state.calendar.month()), (2023, 12));
    }

    #[wasm_bindgen_test]
    fn test_refused_selection_keeps_same_state() {
        let before = store();
        let after = before.clone().reduce(CalendarAction::SelectDate("2024-03-09".to_string()));
        assert!(Rc::ptr_eq(&before, &after));
    }

    #[wasm_bindgen_test]
    fn test_loaded_slots_disable_options() {
        let mut booked = BTreeMap::new();
        booked.insert("2024-03-11".to_string(), vec!["09:00".to_string()]);

        let state = store()
            .reduce(CalendarAction::BookedDateTimesLoaded(booked))
            .reduce(CalendarAction::SelectDate("2024-03-11".to_string()));

        assert!(state.calendar.has_availability());
        let disabled: Vec<_> = state
            .calendar
            .time_options()
            .iter()
            .filter(|o| o.disabled)
            .map(|o| o.value.clone())
            .collect();
        assert_eq!(disabled, vec!["09:00".to_string()]);
    }
}
