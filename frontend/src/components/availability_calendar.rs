use shared::{BookingCalendar, CalendarCell, DayAvailability, DayCell};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AvailabilityCalendarProps {
    pub calendar: BookingCalendar,
    pub on_prev_month: Callback<MouseEvent>,
    pub on_next_month: Callback<MouseEvent>,
    pub on_select_date: Callback<String>,
}

fn day_cell(cell: &DayCell, on_select_date: &Callback<String>) -> Html {
    let title = match cell.availability {
        DayAvailability::Available => None,
        DayAvailability::Weekend => Some("Not available on weekends"),
        DayAvailability::FullyBooked => Some("Fully booked"),
    };

    if !cell.availability.is_available() {
        return html! {
            <div class="day-cell unavailable" title={title} data-date={cell.date.clone()}>
                {cell.day}
            </div>
        };
    }

    let onclick = {
        let date = cell.date.clone();
        let on_select_date = on_select_date.clone();
        Callback::from(move |_: MouseEvent| on_select_date.emit(date.clone()))
    };

    html! {
        <div
            class={classes!("day-cell", cell.is_selected.then_some("selected"))}
            data-date={cell.date.clone()}
            {onclick}
        >
            {cell.day}
        </div>
    }
}

/// Month grid with prev/next navigation. Nothing is drawn into the grid until
/// availability has arrived.
#[function_component(AvailabilityCalendar)]
pub fn availability_calendar(props: &AvailabilityCalendarProps) -> Html {
    let calendar = &props.calendar;

    let grid = if calendar.has_availability() {
        let month = calendar.render();
        html! {
            <>
                {for month.headers.iter().map(|day| html! {
                    <div class="day-header">{*day}</div>
                })}
                {for month.cells.iter().map(|cell| match cell {
                    CalendarCell::Blank => html! { <div class="day-cell empty"></div> },
                    CalendarCell::Day(day) => day_cell(day, &props.on_select_date),
                })}
            </>
        }
    } else {
        html! {}
    };

    html! {
        <div class="calendar">
            <div class="calendar-header">
                <button type="button" id="prev-month" class="nav-button" onclick={props.on_prev_month.clone()}>
                    {"‹"}
                </button>
                <span id="current-month" class="month-year">{calendar.label()}</span>
                <button type="button" id="next-month" class="nav-button" onclick={props.on_next_month.clone()}>
                    {"›"}
                </button>
            </div>
            <div id="calendar-grid" class="calendar-grid">
                {grid}
            </div>
        </div>
    }
}
