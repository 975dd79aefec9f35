pub mod availability_calendar;
pub mod demo_booking_form;
pub mod schedule_step;
pub mod time_slot_select;

#[cfg(test)]
mod test_support;
