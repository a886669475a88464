//! Lead Form Components
//!
//! The controller lives in one `RwSignal`. Field markup is built once from
//! the schema; values, errors and button state are reactive reads of the
//! controller, so typing never rebuilds an input.

use std::sync::Arc;

use leptos::ev::SubmitEvent;
use leptos::logging;
use leptos::prelude::*;
use lead_core::{
    ControlKind, ControlView, FieldDescriptor, FieldEvent, FormController, FormCopy, FormError,
    FormSchema, LabelPosition, SubmissionSink, SubmitOutcome, deliver,
};

use crate::components::{Button, ButtonStyle, ChipList, ColorScheme};
use crate::submit::current_path;

const INPUT_CLASSES: &str = "border-[rgba(231,_231,_237,_1)] w-full rounded text-base mt-2";

/// Delivery tries per submission
const DELIVERY_ATTEMPTS: usize = 2;

fn log_rejection(context: &str, e: &FormError) {
    if e.is_user_error() {
        logging::warn!("{}: {}", context, e.user_message());
    } else {
        logging::error!("{}: {}", context, e);
    }
}

/// Apply an event, logging rejections instead of surfacing them
fn dispatch(form: RwSignal<FormController>, event: FieldEvent) {
    form.update(|f| {
        if let Err(e) = f.apply(event) {
            log_rejection("Field event rejected", &e);
        }
    });
}

#[component]
fn FieldLabel(field: FieldDescriptor) -> impl IntoView {
    let pointer = if field.control() == ControlKind::Checkbox {
        "cursor-pointer"
    } else {
        ""
    };
    let class = format!(
        "font-medium {} {}",
        pointer,
        field.layout.label_class.unwrap_or_default()
    );

    view! {
        <label class=class for=field.name>
            {field.label}
            {field.required.then(|| view! { " " <span class="text-red-400">"*"</span> })}
            {field.subtext.map(|s| view! { <br /> <span class="text-gray-500 text-sm">{s}</span> })}
        </label>
    }
}

/// One field: label plus the control its descriptor calls for
#[component]
pub fn InputItem(field: FieldDescriptor, form: RwSignal<FormController>) -> impl IntoView {
    let name = field.name.clone();

    let error_name = name.clone();
    let error = move || {
        form.with(|f| f.field_view(&error_name).and_then(|v| v.error))
            .map(|msg| view! { <div class="text-sm font-medium mt-2 text-[#9CA3AF]">{msg}</div> })
    };

    let control = match field.control() {
        ControlKind::Text => {
            let value_name = name.clone();
            let event_name = name.clone();
            view! {
                <input
                    class=INPUT_CLASSES
                    id=name.clone()
                    name=name.clone()
                    type="text"
                    placeholder=field.placeholder.clone().unwrap_or_default()
                    required=field.required
                    prop:value=move || form.with(|f| f.state().text(&value_name).to_string())
                    on:input=move |ev| {
                        dispatch(
                            form,
                            FieldEvent::TextChange {
                                field: event_name.clone(),
                                value: event_target_value(&ev),
                            },
                        );
                    }
                />
                {error}
            }
            .into_any()
        }
        ControlKind::Checkbox => {
            let checked_name = name.clone();
            let event_name = name.clone();
            view! {
                <input
                    class="border-[rgba(231,_231,_237,_1)] rounded-sm cursor-pointer"
                    id=name.clone()
                    name=name.clone()
                    type="checkbox"
                    required=field.required
                    prop:checked=move || form.with(|f| f.state().text(&checked_name) == "true")
                    on:change=move |ev| {
                        dispatch(
                            form,
                            FieldEvent::CheckboxChange {
                                field: event_name.clone(),
                                checked: event_target_checked(&ev),
                            },
                        );
                    }
                />
            }
            .into_any()
        }
        ControlKind::Select => {
            let view_name = name.clone();
            let value_name = name.clone();
            let event_name = name.clone();
            let muted = move || {
                form.with(|f| {
                    matches!(
                        f.field_view(&view_name).map(|v| v.control),
                        Some(ControlView::Select { placeholder_shown: true, .. })
                    )
                })
            };
            let options = field
                .visible_options()
                .map(|o| {
                    view! {
                        <option value=o.value.clone() disabled=o.disabled>
                            {o.label.clone()}
                        </option>
                    }
                })
                .collect_view();

            view! {
                <select
                    class=move || {
                        if muted() {
                            "w-full rounded text-base mt-2 text-gray-400"
                        } else {
                            "w-full rounded text-base mt-2"
                        }
                    }
                    id=name.clone()
                    name=name.clone()
                    required=field.required
                    prop:value=move || form.with(|f| f.state().text(&value_name).to_string())
                    on:change=move |ev| {
                        dispatch(
                            form,
                            FieldEvent::SelectChange {
                                field: event_name.clone(),
                                value: event_target_value(&ev),
                            },
                        );
                    }
                >
                    {options}
                </select>
            }
            .into_any()
        }
        ControlKind::Chips => {
            let selection_name = name.clone();
            let event_name = name.clone();
            let selected = Signal::derive(move || {
                form.with(|f| f.state().selection(&selection_name).to_vec())
            });
            let on_toggle = Callback::new(move |value: String| {
                dispatch(
                    form,
                    FieldEvent::ChipToggle {
                        field: event_name.clone(),
                        value,
                    },
                );
            });

            view! {
                <ChipList
                    chip_type=name.clone()
                    chips=field.options.clone()
                    selected=selected
                    on_toggle=on_toggle
                />
            }
            .into_any()
        }
    };

    let checkbox = field.control() == ControlKind::Checkbox;
    let wrapper = format!(
        "font-sans flex-auto w-full mb-4 {} {}",
        field.layout.class.clone().unwrap_or_default(),
        if checkbox { "cursor-pointer" } else { "" }
    );
    let (above, below) = match field.layout.label_position {
        LabelPosition::Above => (Some(field), None),
        LabelPosition::Below => (None, Some(field)),
    };

    view! {
        <div class=wrapper>
            {above.map(|field| view! { <FieldLabel field=field /> })}
            {control}
            {below.map(|field| view! { <FieldLabel field=field /> })}
        </div>
    }
}

/// The lead capture form with its submit button and confirmation
///
/// Accepted payloads go to `sink`.
#[component]
pub fn LeadForm(
    #[prop(into)] form_id: String,
    schema: Arc<FormSchema>,
    copy: Arc<FormCopy>,
    sink: Arc<dyn SubmissionSink>,
) -> impl IntoView {
    let form = RwSignal::new(FormController::new(schema.clone(), copy));
    let submitted = Memo::new(move |_| form.with(FormController::is_submitted));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let page = current_path();

        match form.try_update(|f| f.submit(&page)) {
            Some(Ok(SubmitOutcome::Submitted(payload))) => {
                let sink = sink.clone();
                leptos::task::spawn_local(async move {
                    if let Err(e) = deliver(sink.as_ref(), &payload, DELIVERY_ATTEMPTS).await {
                        logging::error!("{} sink: {}", sink.name(), e.user_message());
                    }
                });
            }
            Some(Ok(SubmitOutcome::AlternateCta)) => {
                logging::log!("Sign-up call to action selected");
            }
            Some(Err(e)) => log_rejection("Submit rejected", &e),
            None => {}
        }
    };

    let field_schema = schema.clone();
    let rows = move || {
        field_schema
            .rows()
            .into_iter()
            .map(|row| {
                let items = row
                    .fields
                    .into_iter()
                    .map(|field| view! { <InputItem field=field.clone() form=form /> })
                    .collect_view();
                if row.group.is_some() {
                    view! { <div class="grid w-full grid-cols-1 lg:grid-cols-2">{items}</div> }
                        .into_any()
                } else {
                    items.into_any()
                }
            })
            .collect_view()
    };

    let hidden_inputs = schema
        .auxiliary()
        .iter()
        .map(|aux| {
            let value_name = aux.name.clone();
            view! {
                <input
                    id=aux.name.clone()
                    name=aux.name.clone()
                    type="hidden"
                    prop:value=move || form.with(|f| f.state().text(&value_name).to_string())
                />
            }
        })
        .collect_view();

    let helper = move || {
        form.with(|f| f.show_sign_up_helper().then(|| f.copy().sign_up_helper_text.clone()))
            .map(|text| view! { <div class="mt-2 mb-5 text-sm">{text}</div> })
    };

    let confirmation = move || {
        form.with(|f| f.view().confirmation).map(|c| {
            view! {
                <div class="my-2">
                    {c.text}
                    <a href=c.link class="underline text-blue-400">{c.link_text}</a>
                    {c.trailing_text}
                </div>
            }
        })
    };

    let style = ButtonStyle {
        color_scheme: ColorScheme::Pink,
        ..Default::default()
    };

    view! {
        <form id=form_id class="grid my-2" on:submit=on_submit>
            <Show when=move || !submitted.get()>
                <div>{rows.clone()}</div>
            </Show>

            {hidden_inputs}

            <div class="font-sans flex-auto w-full">
                {helper}
                <Show when=move || !submitted.get()>
                    <Button
                        style=style
                        button_type="submit"
                        class="font-medium p-4 rounded-xl"
                        disabled=Signal::derive(move || form.with(FormController::submit_disabled))
                    >
                        {move || form.with(|f| f.submit_label().to_string())}
                    </Button>
                </Show>
                {confirmation}
            </div>
        </form>
    }
}
