use crate::contexts::toast::{Toast, ToastContext, ToastType, use_toast};
use yew::prelude::*;

/// Colours and icon of a toast.
struct Palette {
    classes: &'static str,
    icon: &'static str,
    role: &'static str,
}

fn palette(toast_type: ToastType) -> Palette {
    match toast_type {
        ToastType::Error => Palette {
            classes: "bg-red-50 dark:bg-red-900 border-red-200 \
                      dark:border-red-800 text-red-700 dark:text-red-400",
            icon: "✕",
            role: "alert",
        },
        ToastType::Success => Palette {
            classes: "bg-green-50 dark:bg-green-900 border-green-200 \
                      dark:border-green-800 text-green-700 \
                      dark:text-green-400",
            icon: "✓",
            role: "status",
        },
        ToastType::Info => Palette {
            classes: "bg-neutral-50 dark:bg-neutral-800 border-neutral-200 \
                      dark:border-neutral-700 text-neutral-700 \
                      dark:text-neutral-300",
            icon: "ℹ",
            role: "status",
        },
    }
}

/// Stack of visible toasts, oldest on top.
#[function_component]
pub fn ToastContainer() -> Html {
    let toasts = use_context::<ToastContext>()
        .map(|context| context.toasts.clone())
        .unwrap_or_default();

    if toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="fixed top-4 right-4 z-[60] space-y-3 max-w-sm w-full">
            {for toasts.into_iter().map(|toast| {
                let key = toast.id.to_string();
                html! { <ToastItem key={key} {toast} /> }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
}

#[function_component]
fn ToastItem(props: &ToastItemProps) -> Html {
    let toast_handle = use_toast();
    let toast = &props.toast;
    let palette = palette(toast.toast_type);

    let on_close = {
        let toast_id = toast.id;
        Callback::from(move |_: MouseEvent| toast_handle.remove(toast_id))
    };

    html! {
        <div
            role={palette.role}
            class={format!(
                "relative p-4 rounded-lg border shadow-lg transition-all \
                 duration-300 ease-out {}",
                palette.classes
            )}
        >
            <div class="flex items-start gap-3">
                <span class="flex-shrink-0 text-sm font-medium">{palette.icon}</span>
                <p class="flex-1 min-w-0 text-sm font-medium leading-5 break-words">
                    {&toast.message}
                </p>
                <button
                    type="button"
                    onclick={on_close}
                    class="flex-shrink-0 text-neutral-400 hover:text-neutral-600 \
                           dark:hover:text-neutral-200 focus:outline-none"
                    title="Dismiss"
                >
                    <span class="text-lg leading-none">{"×"}</span>
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_interrupt_and_the_rest_do_not() {
        assert_eq!(palette(ToastType::Error).role, "alert");
        assert_eq!(palette(ToastType::Success).role, "status");
        assert_eq!(palette(ToastType::Info).role, "status");
    }
}
