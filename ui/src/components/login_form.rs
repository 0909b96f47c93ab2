use payloads::requests;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::forms::{FieldSpec, FormSchema, FormValues};
use crate::session::Session;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub on_success: Callback<Session>,
}

fn credentials_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldSpec::email("email", "Email")
            .required("Please enter your email")
            .valid_email("Please enter a valid email address"),
        FieldSpec::text("password", "Password")
            .required("Please enter your password"),
    ])
}

/// Check the typed credentials before anything is sent.
pub fn credentials(
    email: &str,
    password: &str,
) -> Result<requests::LoginCredentials, String> {
    let values = FormValues::new()
        .with_text("email", email)
        .with_text("password", password);
    credentials_schema()
        .prepare(&values, |values| {
            Ok(requests::LoginCredentials {
                email: values.text("email").to_lowercase(),
                // Passwords are sent exactly as typed
                password: password.to_string(),
            })
        })
        .map_err(|errors| errors.first_message().to_string())
}

#[function_component]
pub fn LoginForm(props: &LoginFormProps) -> Html {
    let dispatch = use_dispatch::<State>();

    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error_message = use_state(|| None::<String>);
    let is_loading = use_state(|| false);

    let on_submit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let error_message = error_message.clone();
        let is_loading = is_loading.clone();
        let on_success = props.on_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_loading {
                return;
            }

            let (Some(email_input), Some(password_input)) = (
                email_ref.cast::<HtmlInputElement>(),
                password_ref.cast::<HtmlInputElement>(),
            ) else {
                return;
            };

            let details =
                match credentials(&email_input.value(), &password_input.value()) {
                    Ok(details) => details,
                    Err(message) => {
                        error_message.set(Some(message));
                        return;
                    }
                };

            let error_message = error_message.clone();
            let is_loading = is_loading.clone();
            let on_success = on_success.clone();
            let dispatch = dispatch.clone();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error_message.set(None);

                let api_client = crate::get_api_client(None);
                match api_client.login(&details).await {
                    Ok(response) => {
                        let session = Session {
                            token: response.token,
                            admin: response.admin,
                        };
                        tracing::info!("Signed in as {}", session.admin.email);
                        dispatch.reduce_mut(|state| state.login(session.clone()));
                        on_success.emit(session);
                    }
                    Err(e) => {
                        tracing::warn!("Login failed: {e}");
                        error_message.set(Some(e.user_message()));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    html! {
        <div class="max-w-md w-full bg-white dark:bg-neutral-800 p-8 rounded-lg shadow-md">
            <div class="mb-8 text-center">
                <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100 mb-2">
                    {"MockTale Admin"}
                </h1>
                <p class="text-neutral-600 dark:text-neutral-400">
                    {"Sign in to manage exams, content and students"}
                </p>
            </div>

            <form onsubmit={on_submit} class="space-y-6" novalidate={true}>
                if let Some(error) = &*error_message {
                    <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                        <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
                    </div>
                }

                <div>
                    <label for="email" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                        {"Email"}
                    </label>
                    <input
                        ref={email_ref}
                        type="email"
                        id="email"
                        name="email"
                        autocomplete="email"
                        required={true}
                        class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                               rounded-md shadow-sm bg-white dark:bg-neutral-700
                               text-neutral-900 dark:text-neutral-100
                               focus:outline-none focus:ring-2 focus:ring-neutral-500 focus:border-neutral-500
                               dark:focus:ring-neutral-400 dark:focus:border-neutral-400"
                        placeholder="admin@mocktale.in"
                    />
                </div>

                <div>
                    <label for="password" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                        {"Password"}
                    </label>
                    <input
                        ref={password_ref}
                        type="password"
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        required={true}
                        class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                               rounded-md shadow-sm bg-white dark:bg-neutral-700
                               text-neutral-900 dark:text-neutral-100
                               focus:outline-none focus:ring-2 focus:ring-neutral-500 focus:border-neutral-500
                               dark:focus:ring-neutral-400 dark:focus:border-neutral-400"
                        placeholder="Enter your password"
                    />
                </div>

                <button
                    type="submit"
                    disabled={*is_loading}
                    class="w-full flex justify-center py-2 px-4 border border-transparent
                           rounded-md shadow-sm text-sm font-medium text-white
                           bg-neutral-900 hover:bg-neutral-800
                           dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                           focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-neutral-500
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors duration-200"
                >
                    {if *is_loading { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_checked_before_sending() {
        assert_eq!(
            credentials("", "secret").err().as_deref(),
            Some("Please enter your email")
        );
        assert_eq!(
            credentials("not-an-email", "secret").err().as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            credentials("admin@mocktale.in", "").err().as_deref(),
            Some("Please enter your password")
        );
    }

    #[test]
    fn email_is_trimmed_but_password_is_not() {
        let details = credentials(" Admin@MockTale.in ", " p4ss ").unwrap();
        assert_eq!(details.email, "admin@mocktale.in");
        assert_eq!(details.password, " p4ss ");
    }
}
