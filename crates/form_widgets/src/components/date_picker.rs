use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use leptos::*;
use system_ui::prelude::*;

use crate::calendar::{
    is_selectable, parse_time_input, CalendarMonth, DateTimeSelection, WEEKDAY_LABELS,
};

fn day_class(in_month: bool, is_today: bool) -> &'static str {
    match (in_month, is_today) {
        (true, true) => "calendar-day calendar-day--today",
        (true, false) => "calendar-day",
        (false, _) => "calendar-day calendar-day--outside",
    }
}

#[component]
/// Calendar popover with an optional time field. The form value is ISO-8601.
pub fn DatePicker(
    #[prop(into)] name: String,
    #[prop(optional)] initial: Option<NaiveDateTime>,
    #[prop(optional)] with_time: bool,
    #[prop(optional)] min_date: Option<NaiveDate>,
    #[prop(optional)] max_date: Option<NaiveDate>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional)] on_change: Option<Callback<Option<NaiveDateTime>>>,
) -> impl IntoView {
    let today = Local::now().date_naive();
    let selection =
        create_rw_signal(initial.map(|value| DateTimeSelection::from_datetime(value, with_time)));
    let month = create_rw_signal(CalendarMonth::containing(
        initial.map_or(today, |value| value.date()),
    ));
    let open = create_rw_signal(false);
    let time_error = create_rw_signal(None::<String>);
    let placeholder = placeholder.unwrap_or_else(|| "Select a date".to_string());

    let commit = move |next: Option<DateTimeSelection>| {
        selection.set(next);
        if let Some(on_change) = on_change.as_ref() {
            on_change.call(next.map(|selected| selected.to_naive_datetime()));
        }
    };
    let pick_day = move |date: NaiveDate| {
        let time = selection
            .get_untracked()
            .and_then(|selected| selected.time)
            .or_else(|| with_time.then(NaiveTime::default));
        commit(Some(DateTimeSelection { date, time }));
        if !with_time {
            open.set(false);
        }
    };
    let trigger_label = Signal::derive(move || {
        selection
            .get()
            .map_or_else(|| placeholder.clone(), |selected| selected.format_display())
    });

    view! {
        <FieldGroup layout_class="date-picker" title=label.unwrap_or_default() error=time_error>
            <Popover
                open=open
                aria_label="Choose date"
                on_dismiss=Callback::new(move |_| open.set(false))
                trigger=Box::new(move || {
                    Fragment::new(vec![
                        view! {
                            <Button
                                leading_icon=IconName::Calendar
                                trailing_icon=IconName::ChevronDown
                                aria_haspopup="dialog".to_string()
                                aria_expanded=open
                                on_click=Callback::new(move |_| open.update(|open| *open = !*open))
                            >
                                {move || trigger_label.get()}
                            </Button>
                        }
                        .into_view(),
                    ])
                })
            >
                <Stack gap=LayoutGap::Sm layout_class="date-picker-panel">
                    <Cluster justify=LayoutJustify::Between>
                        <IconButton
                            icon=IconName::ChevronLeft
                            aria_label="Previous month"
                            on_click=Callback::new(move |_| month.update(|month| *month = month.prev()))
                        />
                        <Text role=TextRole::Label live=true>{move || month.get().title()}</Text>
                        <IconButton
                            icon=IconName::ChevronRight
                            aria_label="Next month"
                            on_click=Callback::new(move |_| month.update(|month| *month = month.next()))
                        />
                    </Cluster>
                    <Grid columns=7 aria_label=Signal::derive(move || month.get().title())>
                        {WEEKDAY_LABELS
                            .iter()
                            .map(|weekday| {
                                view! {
                                    <Text role=TextRole::Caption tone=TextTone::Secondary>
                                        {*weekday}
                                    </Text>
                                }
                            })
                            .collect_view()}
                        {move || {
                            month
                                .get()
                                .weeks()
                                .into_iter()
                                .flatten()
                                .map(|day| {
                                    let date = day.date;
                                    let is_selected = Signal::derive(move || {
                                        selection.get().is_some_and(|selected| selected.date == date)
                                    });
                                    view! {
                                        <Button
                                            size=ButtonSize::Sm
                                            variant=ButtonVariant::Quiet
                                            role="gridcell"
                                            ui_slot="calendar-day"
                                            layout_class=day_class(day.in_month, date == today)
                                            title=date.format("%Y-%m-%d").to_string()
                                            selected=is_selected
                                            aria_selected=is_selected
                                            disabled=!is_selectable(date, min_date, max_date)
                                            on_click=Callback::new(move |_| pick_day(date))
                                        >
                                            {date.day()}
                                        </Button>
                                    }
                                })
                                .collect_view()
                        }}
                    </Grid>
                    {with_time.then(|| {
                        view! {
                            <TextField
                                input_type="time"
                                aria_label="Time"
                                value=Signal::derive(move || {
                                    selection
                                        .get()
                                        .and_then(|selected| selected.time)
                                        .map(|time| time.format("%H:%M").to_string())
                                        .unwrap_or_default()
                                })
                                on_input=Callback::new(move |ev| {
                                    let raw = event_target_value(&ev);
                                    match parse_time_input(&raw) {
                                        Some(time) => {
                                            time_error.set(None);
                                            let date = selection
                                                .get_untracked()
                                                .map_or(today, |selected| selected.date);
                                            commit(Some(DateTimeSelection {
                                                date,
                                                time: Some(time),
                                            }));
                                        }
                                        None => time_error.set(Some(format!("Invalid time: {raw}"))),
                                    }
                                })
                            />
                        }
                    })}
                    <Cluster justify=LayoutJustify::Between>
                        <Button
                            size=ButtonSize::Sm
                            variant=ButtonVariant::Quiet
                            on_click=Callback::new(move |_| {
                                commit(None);
                                open.set(false);
                            })
                        >
                            "Clear"
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            variant=ButtonVariant::Primary
                            on_click=Callback::new(move |_| open.set(false))
                        >
                            "Done"
                        </Button>
                    </Cluster>
                </Stack>
            </Popover>
            {move || {
                let value = selection
                    .get()
                    .map(|selected| selected.iso_value())
                    .unwrap_or_default();
                view! { <HiddenField name=name.clone() value /> }
            }}
        </FieldGroup>
    }
}
