use shared::TimeOption;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimeSlotSelectProps {
    pub options: Vec<TimeOption>,
    pub selected: Option<String>,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Time selector; booked slots stay listed but disabled
#[function_component(TimeSlotSelect)]
pub fn time_slot_select(props: &TimeSlotSelectProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            on_change.emit(e.target_unchecked_into::<HtmlSelectElement>().value());
        })
    };

    html! {
        <div class="form-group">
            <label for="meeting-time">{"Time"}</label>
            <select id="meeting-time" name="meeting_time" {onchange} disabled={props.disabled}>
                <option value="" selected={props.selected.is_none()}>{"Select a time"}</option>
                {for props.options.iter().map(|option| {
                    let is_selected = props.selected.as_deref() == Some(option.value.as_str());
                    html! {
                        <option
                            value={option.value.clone()}
                            disabled={option.disabled}
                            selected={is_selected}
                        >
                            {&option.value}
                            {if option.disabled { " (booked)" } else { "" }}
                        </option>
                    }
                })}
            </select>
        </div>
    }
}
