pub mod state;
pub mod view_model;

use self::state::{create_state, persist_state};
use self::view_model::{derive_submission_list, subjects};
use crate::layout::global_context::{AppGlobalContext, ToastKind};
use crate::layout::tabs::{submission_detail_key, tab_title_for_key};
use crate::shared::components::ui::badge::{Badge, SubmissionStatusBadge};
use crate::shared::components::PaginationControls;
use crate::shared::date_utils::format_datetime;
use crate::shared::export::export_to_csv;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, highlight_matches, SearchInput};
use contracts::domain::a002_form_submission::SubmissionStatus;
use leptos::prelude::*;
use std::borrow::Cow;
use thaw::*;

#[component]
pub fn FormSubmissionList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let state = ctx.with_app(create_state);
    let subject_options = ctx.with_app(|app| subjects(&app.seed().submissions));

    Effect::new(move |_| {
        state.track();
        ctx.with_app(|app| persist_state(app, state));
    });

    let page = Memo::new(move |_| {
        ctx.track_statuses();
        let current = state.get();
        ctx.with_app(|app| {
            derive_submission_list(
                &app.seed().submissions,
                app.overlay(),
                &current.to_query(app.config().list.page_size),
            )
        })
    });

    let toggle_sort = move |field: &'static str| {
        state.update(|s| {
            if s.sort_field == field {
                s.sort_ascending = !s.sort_ascending;
            } else {
                s.sort_field = field.to_string();
                s.sort_ascending = true;
            }
            s.page = 1;
        });
    };

    let sort_mark = move |field: &'static str| {
        state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))
    };

    let open_detail = move |id: String| {
        let key = submission_detail_key(&id);
        ctx.open_tab(&key, &tab_title_for_key(&key));
    };

    let mark_contacted = move |id: String| {
        match ctx.with_app(|app| app.change_submission_status(&id, SubmissionStatus::Contacted)) {
            Ok(()) => ctx.notify(ToastKind::Success, format!("Submission #{} marked as contacted", id)),
            Err(e) => ctx.notify(ToastKind::Error, e),
        }
    };

    let export = move |_| {
        match page.with_untracked(|p| export_to_csv(&p.filtered, "form-submissions.csv")) {
            Ok(()) => ctx.notify(ToastKind::Success, "Submissions exported"),
            Err(e) => {
                log::warn!("Submission export failed: {}", e);
                ctx.notify(ToastKind::Error, e.to_string());
            }
        }
    };

    let search = Signal::derive(move || state.with(|s| s.filter.search.clone()));

    view! {
        <div class="page page--list">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("submissions")}
                    <h1 class="page__title">"Form Submissions"</h1>
                    <Badge variant="primary">
                        {move || page.with(|p| p.pagination.total_items.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=export>
                        {icon("download")}
                        " Export CSV"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |value: String| {
                                state.update(|s| {
                                    s.filter.search = value;
                                    s.page = 1;
                                });
                            })
                            placeholder="Search by name, email, subject or form..."
                        />

                        <select
                            class="form__select"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.status = (!value.is_empty()).then_some(value);
                                    s.page = 1;
                                });
                            }
                            prop:value=move || state.with(|s| s.filter.status.clone().unwrap_or_default())
                        >
                            <option value="">"All statuses"</option>
                            {SubmissionStatus::ALL
                                .iter()
                                .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                .collect_view()}
                        </select>

                        <select
                            class="form__select"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.category = (!value.is_empty()).then_some(value);
                                    s.page = 1;
                                });
                            }
                            prop:value=move || state.with(|s| s.filter.category.clone().unwrap_or_default())
                        >
                            <option value="">"All subjects"</option>
                            {subject_options
                                .into_iter()
                                .map(|subject| view! { <option value=subject.clone()>{subject.clone()}</option> })
                                .collect_view()}
                        </select>

                        <label class="form__label">"From:"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || state.with(|s| s.filter.date_from.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.date_from = value;
                                    s.page = 1;
                                });
                            }
                        />
                        <label class="form__label">"To:"</label>
                        <input
                            type="date"
                            class="form__input"
                            prop:value=move || state.with(|s| s.filter.date_to.clone())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| {
                                    s.filter.date_to = value;
                                    s.page = 1;
                                });
                            }
                        />

                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| state.update(|s| {
                                s.filter = Default::default();
                                s.page = 1;
                            })
                            disabled=Signal::derive(move || state.with(|s| s.filter.is_empty()))
                        >
                            "Reset"
                        </Button>
                    </Flex>
                </div>

                <div class="list-summary">
                    {move || {
                        page.with(|p| {
                            p.status_counts
                                .iter()
                                .map(|(status, count)| {
                                    let status = *status;
                                    view! {
                                        <span
                                            class="list-summary__chip"
                                            on:click=move |_| state.update(|s| {
                                                s.filter.status = Some(status.as_str().to_string());
                                                s.page = 1;
                                            })
                                        >
                                            {format!("{}: {}", status.label(), count)}
                                        </span>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=80.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("id")>
                                        "ID" <span>{move || sort_mark("id")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=150.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("submitted_at")>
                                        "Submitted" <span>{move || sort_mark("submitted_at")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("name")>
                                        "Contact" <span>{move || sort_mark("name")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("form_name")>
                                        "Form" <span>{move || sort_mark("form_name")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    <div class="table__sortable-header" on:click=move |_| toggle_sort("status")>
                                        "Status" <span>{move || sort_mark("status")}</span>
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>"Actions"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || page.with(|p| p.rows.clone())
                                key=|row| (row.submission.id.clone(), row.status)
                                children=move |row| {
                                    let id = row.submission.id.clone();
                                    let id_for_open = id.clone();
                                    let id_for_action = id.clone();
                                    let status = row.status;
                                    let name = row.display_name().into_owned();
                                    let email = row.submission.email().map(Cow::into_owned).unwrap_or_default();
                                    let form_name = row.submission.form_name.clone();
                                    let subject = row.submission.subject().map(Cow::into_owned);
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <a href="#" class="table__link"
                                                        on:click=move |e| {
                                                            e.prevent_default();
                                                            open_detail(id_for_open.clone());
                                                        }
                                                    >
                                                        {format!("#{}", id)}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_datetime(&row.submission.submitted_at)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div class="table__primary">{move || highlight_matches(&name, &search.get())}</div>
                                                    <div class="table__secondary">{move || highlight_matches(&email, &search.get())}</div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <div class="table__primary">{move || highlight_matches(&form_name, &search.get())}</div>
                                                    {subject.map(|subject| view! {
                                                        <div class="table__secondary">{move || highlight_matches(&subject, &search.get())}</div>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <SubmissionStatusBadge status=status />
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {(status == SubmissionStatus::New).then(|| view! {
                                                        <Button
                                                            appearance=ButtonAppearance::Subtle
                                                            size=ButtonSize::Small
                                                            on_click=move |_| mark_contacted(id_for_action.clone())
                                                        >
                                                            "Mark as contacted"
                                                        </Button>
                                                    })}
                                                </TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || page.with(|p| p.rows.is_empty())>
                        <div class="table__empty">"No submissions match the current filters"</div>
                    </Show>
                </div>

                <PaginationControls
                    info=Signal::derive(move || page.with(|p| p.pagination))
                    on_page_change=Callback::new(move |new_page: usize| state.update(|s| s.page = new_page))
                />
            </div>
        </div>
    }
}
