use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::forms::{FieldKind, FieldSpec, FieldValue, LookupKind};
use crate::hooks::use_lookup;

pub const INPUT_CLASSES: &str = "w-full px-3 py-2 border border-neutral-300 \
    dark:border-neutral-600 rounded-md shadow-sm bg-white dark:bg-neutral-700 \
    text-neutral-900 dark:text-neutral-100 \
    focus:outline-none focus:ring-2 focus:ring-neutral-500 \
    focus:border-neutral-500 dark:focus:ring-neutral-400 \
    dark:focus:border-neutral-400 disabled:opacity-50";
pub const LABEL_CLASSES: &str =
    "block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-1";

#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub spec: FieldSpec,
    pub value: FieldValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<(&'static str, FieldValue)>,
}

/// One labelled input, chosen by the kind of field.
#[function_component]
pub fn FormField(props: &FormFieldProps) -> Html {
    let spec = &props.spec;
    let name = spec.name;
    let id = format!("field-{name}");
    let emit_text = {
        let on_change = props.on_change.clone();
        Callback::from(move |text: String| {
            on_change.emit((name, FieldValue::Text(text)));
        })
    };
    let text = match &props.value {
        FieldValue::Text(text) => text.clone(),
        FieldValue::Bool(_) | FieldValue::List(_) => String::new(),
    };
    let placeholder = spec.placeholder.unwrap_or_default();

    let input = match &spec.kind {
        FieldKind::Text | FieldKind::Email | FieldKind::Number => {
            let input_type = match spec.kind {
                FieldKind::Email => "email",
                FieldKind::Number => "number",
                _ => "text",
            };
            let oninput = emit_text.reform(|e: InputEvent| {
                e.target_unchecked_into::<HtmlInputElement>().value()
            });
            html! {
                <input
                    id={id.clone()}
                    type={input_type}
                    step={(spec.kind == FieldKind::Number).then_some("any")}
                    value={text}
                    {oninput}
                    {placeholder}
                    disabled={props.disabled}
                    class={INPUT_CLASSES}
                />
            }
        }
        FieldKind::TextArea => {
            let oninput = emit_text.reform(|e: InputEvent| {
                e.target_unchecked_into::<HtmlTextAreaElement>().value()
            });
            html! {
                <textarea
                    id={id.clone()}
                    rows="3"
                    value={text}
                    {oninput}
                    {placeholder}
                    disabled={props.disabled}
                    class={INPUT_CLASSES}
                />
            }
        }
        FieldKind::Checkbox => {
            let checked = matches!(props.value, FieldValue::Bool(true));
            let on_change = props.on_change.clone();
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                on_change.emit((name, FieldValue::Bool(input.checked())));
            });
            return html! {
                <div class="flex items-center gap-2">
                    <input
                        id={id.clone()}
                        type="checkbox"
                        {checked}
                        {onchange}
                        disabled={props.disabled}
                        class="h-4 w-4 rounded border-neutral-300 \
                               dark:border-neutral-600"
                    />
                    <label for={id} class="text-sm text-neutral-700 \
                                           dark:text-neutral-300">
                        {spec.label}
                    </label>
                    <FieldError error={props.error.clone()} />
                </div>
            };
        }
        FieldKind::Select(options) => {
            let options: Vec<(String, String)> = options
                .iter()
                .map(|(value, label)| (value.to_string(), label.to_string()))
                .collect();
            html! {
                <Select
                    id={id.clone()}
                    {options}
                    selected={text}
                    placeholder={(!spec.is_required()).then_some(AttrValue::from("None"))}
                    disabled={props.disabled}
                    on_change={emit_text}
                />
            }
        }
        FieldKind::Lookup(kind) => html! {
            <LookupSelect
                id={id.clone()}
                kind={*kind}
                selected={text}
                placeholder={format!("Select {}", spec.label.to_lowercase())}
                disabled={props.disabled}
                on_change={emit_text}
            />
        },
        FieldKind::Lines => {
            let lines = match &props.value {
                FieldValue::List(items) => items.join("\n"),
                FieldValue::Text(text) => text.clone(),
                FieldValue::Bool(_) => String::new(),
            };
            let on_change = props.on_change.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let area: HtmlTextAreaElement = e.target_unchecked_into();
                let items = area.value().lines().map(str::to_string).collect();
                on_change.emit((name, FieldValue::List(items)));
            });
            html! {
                <textarea
                    id={id.clone()}
                    rows="4"
                    value={lines}
                    {oninput}
                    {placeholder}
                    disabled={props.disabled}
                    class={INPUT_CLASSES}
                />
            }
        }
        FieldKind::Slots(count) => {
            let mut slots = match &props.value {
                FieldValue::List(items) => items.clone(),
                FieldValue::Text(_) | FieldValue::Bool(_) => Vec::new(),
            };
            slots.resize(*count, String::new());
            html! {
                <div id={id.clone()} class="space-y-2">
                    {for slots.iter().enumerate().map(|(index, slot)| {
                        let on_change = props.on_change.clone();
                        let current = slots.clone();
                        let oninput = Callback::from(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let mut next = current.clone();
                            next[index] = input.value();
                            on_change.emit((name, FieldValue::List(next)));
                        });
                        html! {
                            <div key={index} class="flex items-center gap-2">
                                <span class="w-6 text-sm font-medium \
                                             text-neutral-500">
                                    {slot_letter(index)}
                                </span>
                                <input
                                    type="text"
                                    value={slot.clone()}
                                    {oninput}
                                    disabled={props.disabled}
                                    class={INPUT_CLASSES}
                                />
                            </div>
                        }
                    })}
                </div>
            }
        }
    };

    html! {
        <div>
            <label for={id} class={LABEL_CLASSES}>
                {spec.label}
                if spec.is_required() {
                    <span class="text-red-600 dark:text-red-400">{" *"}</span>
                }
            </label>
            {input}
            if let Some(help) = spec.help {
                <p class="mt-1 text-xs text-neutral-500 dark:text-neutral-400">
                    {help}
                </p>
            }
            <FieldError error={props.error.clone()} />
        </div>
    }
}

/// Option label of the `index`th slot: A, B, C...
fn slot_letter(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .filter(u8::is_ascii_uppercase)
        .map_or_else(|| (index + 1).to_string(), |c| char::from(c).to_string())
}

#[derive(Properties, PartialEq)]
struct FieldErrorProps {
    error: Option<AttrValue>,
}

#[function_component]
fn FieldError(props: &FieldErrorProps) -> Html {
    match &props.error {
        Some(error) => html! {
            <p class="mt-1 text-sm text-red-600 dark:text-red-400">{error}</p>
        },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectProps {
    #[prop_or_default]
    pub id: Option<String>,
    /// `(value, label)` pairs
    pub options: Vec<(String, String)>,
    pub selected: String,
    /// Label of the empty choice; no empty choice when `None`.
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<String>,
}

#[function_component]
pub fn Select(props: &SelectProps) -> Html {
    let onchange = props.on_change.reform(|e: Event| {
        e.target_unchecked_into::<HtmlSelectElement>().value()
    });

    html! {
        <select
            id={props.id.clone()}
            {onchange}
            disabled={props.disabled}
            class={INPUT_CLASSES}
        >
            if let Some(placeholder) = &props.placeholder {
                <option value="" selected={props.selected.is_empty()}>
                    {placeholder}
                </option>
            }
            {for props.options.iter().map(|(value, label)| html! {
                <option
                    key={value.clone()}
                    value={value.clone()}
                    selected={*value == props.selected}
                >
                    {label}
                </option>
            })}
        </select>
    }
}

#[derive(Properties, PartialEq)]
pub struct LookupSelectProps {
    #[prop_or_default]
    pub id: Option<String>,
    pub kind: LookupKind,
    pub selected: String,
    /// Label of the empty choice, e.g. "All subjects"
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    pub on_change: Callback<String>,
}

/// A [`Select`] filled from the backend.
#[function_component]
pub fn LookupSelect(props: &LookupSelectProps) -> Html {
    let options = use_lookup(props.kind);

    html! {
        <Select
            id={props.id.clone()}
            options={options
                .iter()
                .map(|option| (option.value.clone(), option.label.clone()))
                .collect::<Vec<_>>()}
            selected={props.selected.clone()}
            placeholder={Some(props.placeholder.clone())}
            disabled={props.disabled}
            on_change={props.on_change.clone()}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::slot_letter;

    #[test]
    fn slots_are_lettered() {
        assert_eq!(slot_letter(0), "A");
        assert_eq!(slot_letter(3), "D");
        assert_eq!(slot_letter(30), "31");
    }
}
