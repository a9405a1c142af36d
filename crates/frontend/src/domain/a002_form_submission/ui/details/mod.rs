pub mod view_model;

use self::view_model::FormSubmissionDetailsVm;
use crate::domain::a002_form_submission::model::SubmissionRow;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::ui::badge::SubmissionStatusBadge;
use crate::shared::date_utils::format_datetime;
use crate::shared::detail::DetailState;
use crate::shared::icons::icon;
use contracts::domain::a002_form_submission::SubmissionStatus;
use leptos::prelude::*;
use std::borrow::Cow;
use thaw::*;

#[component]
pub fn FormSubmissionDetails(id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let vm = FormSubmissionDetailsVm::new(id, ctx);

    view! {
        <div class="page page--detail">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("submissions")}
                    <h2>{move || format!("Submission #{}", vm.id.get_value())}</h2>
                    {move || vm.status().get().map(|status| view! { <SubmissionStatusBadge status=status /> })}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| vm.export()
                        disabled=Signal::derive(move || vm.status().get().is_none())
                    >
                        {icon("download")}
                        " Export JSON"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || match vm.state.get() {
                    DetailState::NotFound(id) => view! {
                        <div class="detail-not-found">
                            <h3>"Submission not found"</h3>
                            <p>{format!("There is no form submission with ID #{}.", id)}</p>
                        </div>
                    }
                    .into_any(),
                    DetailState::Found(row) => submission_body(row, vm).into_any(),
                }}
            </div>
        </div>
    }
}

fn submission_body(row: SubmissionRow, vm: FormSubmissionDetailsVm) -> impl IntoView {
    let s = &row.submission;
    let current = row.status;
    let email = s.email().map(Cow::into_owned);
    let message = s.message().map(Cow::into_owned);
    let extra: Vec<(String, String)> = s
        .extra_fields()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    view! {
        <div class="detail-grid">
            <div class="detail-grid__label">"Name"</div>
            <div class="detail-grid__value">{row.display_name().to_string()}</div>

            <div class="detail-grid__label">"Email"</div>
            <div class="detail-grid__value">
                {match email {
                    Some(email) => view! { <a href=format!("mailto:{}", email)>{email.clone()}</a> }.into_any(),
                    None => view! { <span class="text-muted">"N/A"</span> }.into_any(),
                }}
            </div>

            <div class="detail-grid__label">"Company"</div>
            <div class="detail-grid__value">{s.company().as_deref().unwrap_or("N/A").to_string()}</div>

            <div class="detail-grid__label">"Subject"</div>
            <div class="detail-grid__value">{s.subject().as_deref().unwrap_or("N/A").to_string()}</div>

            <div class="detail-grid__label">"Form"</div>
            <div class="detail-grid__value">{s.form_name.clone()}</div>

            <div class="detail-grid__label">"Submitted"</div>
            <div class="detail-grid__value">{format_datetime(&s.submitted_at)}</div>

            <div class="detail-grid__label">"Status"</div>
            <div class="detail-grid__value">
                <select
                    class="form__select"
                    prop:value=current.as_str()
                    on:change=move |ev| {
                        match event_target_value(&ev).parse::<SubmissionStatus>() {
                            Ok(status) if status != current => vm.change_status(status),
                            Ok(_) => {}
                            Err(e) => log::warn!("{}", e),
                        }
                    }
                >
                    {SubmissionStatus::ALL
                        .iter()
                        .map(|status| view! {
                            <option value=status.as_str() selected=*status == current>
                                {status.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
                <span class="detail-grid__hint">
                    {format!("Pipeline progress: {}%", current.stage_percentage())}
                </span>
            </div>
        </div>

        {message.map(|message| view! {
            <div class="detail-notes">
                <h4>"Message"</h4>
                <p>{message}</p>
            </div>
        })}

        {(!extra.is_empty()).then(|| view! {
            <div class="detail-fields">
                <h4>"Additional fields"</h4>
                <Table>
                    <TableBody>
                        {extra
                            .into_iter()
                            .map(|(key, value)| view! {
                                <TableRow>
                                    <TableCell><TableCellLayout>{key}</TableCellLayout></TableCell>
                                    <TableCell><TableCellLayout truncate=true>{value}</TableCellLayout></TableCell>
                                </TableRow>
                            })
                            .collect_view()}
                    </TableBody>
                </Table>
            </div>
        })}
    }
}
