use leptos::prelude::*;

use crate::system::auth::context::use_auth;
use contracts::system::auth::{LoginRequest, SignupRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Signup,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let mode = RwSignal::new(Mode::Login);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);

    let is_signup = move || mode.get() == Mode::Signup;

    let switch_mode = move |_| {
        mode.update(|m| {
            *m = match m {
                Mode::Login => Mode::Signup,
                Mode::Signup => Mode::Login,
            }
        });
        error_message.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error_message.set(None);

        // успешный вход переключает AppShell на MainLayout
        let result = match mode.get_untracked() {
            Mode::Login => auth.login(LoginRequest {
                email: email.get_untracked(),
                password: password.get_untracked(),
            }),
            Mode::Signup => auth.signup(SignupRequest {
                name: name.get_untracked(),
                email: email.get_untracked(),
                password: password.get_untracked(),
            }),
        };

        match result {
            Ok(()) => password.set(String::new()),
            Err(e) => error_message.set(Some(e.to_string())),
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Laguna Dashboard"</h1>
                <h2>{move || if is_signup() { "Create an account" } else { "Sign in" }}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <Show when=is_signup>
                        <div class="form-group">
                            <label for="name">"Name"</label>
                            <input
                                type="text"
                                id="name"
                                prop:value=move || name.get()
                                on:input=move |ev| name.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>

                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="test@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>

                    <button type="submit" class="btn-primary">
                        {move || if is_signup() { "Sign up" } else { "Sign in" }}
                    </button>
                </form>

                <button class="login-switch" on:click=switch_mode>
                    {move || if is_signup() {
                        "Already have an account? Sign in"
                    } else {
                        "No account? Sign up"
                    }}
                </button>

                <div class="login-info">
                    <p>"Demo account:"</p>
                    <p>"Email: " <strong>"test@example.com"</strong></p>
                    <p>"Password: " <strong>"password"</strong></p>
                </div>
            </div>
        </div>
    }
}
