//! Excel + template upload form.
//!
//! Holds the two file slots and the submission state as signals and hands
//! the actual work to [`Submitter`].

use std::rc::Rc;

use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::config::{submit_label, EXCEL_ACCEPT, GENERATE_ENDPOINT, PRIVACY_NOTICE, TEMPLATE_ACCEPT};
use crate::services::{BrowserDownloader, FetchTransport};
use crate::submission::{SubmissionView, Submitter};
use crate::types::SubmitError;

/// Writes submission state into the form's signals.
#[derive(Clone, Copy)]
struct SignalView {
    set_loading: WriteSignal<bool>,
    set_error: WriteSignal<Option<SubmitError>>,
}

impl SubmissionView for SignalView {
    fn set_loading(&self, loading: bool) {
        self.set_loading.set(loading);
    }

    fn set_error(&self, error: Option<SubmitError>) {
        self.set_error.set(error);
    }
}

/// First file of a file input's selection, if any.
fn first_file(ev: &Event) -> Option<File> {
    let input: HtmlInputElement = event_target(ev);
    input.files().and_then(|files| files.get(0))
}

#[component]
pub fn UploadForm() -> impl IntoView {
    let (excel, set_excel) = create_signal(None::<File>);
    let (template, set_template) = create_signal(None::<File>);
    let (loading, set_loading) = create_signal(false);
    let (error, set_error) = create_signal(None::<SubmitError>);

    let submitter = Rc::new(Submitter::new(
        FetchTransport::new(GENERATE_ENDPOINT),
        BrowserDownloader,
    ));
    let view_state = SignalView { set_loading, set_error };

    let on_submit = move |event: ev::SubmitEvent| {
        event.prevent_default();

        let submitter = Rc::clone(&submitter);
        let excel = excel.get_untracked();
        let template = template.get_untracked();

        spawn_local(async move {
            // Errors are already in the error signal.
            let _ = submitter
                .submit(excel.as_ref(), template.as_ref(), &view_state)
                .await;
        });
    };

    view! {
        <form class="upload-card" on:submit=on_submit>
            <div class="upload-fields">
                <div>
                    <label class="field-label">"Excel file"</label>
                    <input
                        type="file"
                        accept=EXCEL_ACCEPT
                        class="file-input"
                        on:change=move |ev| set_excel.set(first_file(&ev))
                    />
                </div>
                <div>
                    <label class="field-label">"PPT template"</label>
                    <input
                        type="file"
                        accept=TEMPLATE_ACCEPT
                        class="file-input"
                        on:change=move |ev| set_template.set(first_file(&ev))
                    />
                </div>
            </div>

            <Show
                when=move || error.get().is_some()
                fallback=|| view! { }
            >
                <p class="error-message">
                    {move || error.get().map(|e| e.to_string()).unwrap_or_default()}
                </p>
            </Show>

            <button
                type="submit"
                class="submit-button"
                disabled=move || loading.get()
            >
                {move || submit_label(loading.get())}
            </button>

            <p class="privacy-notice">{PRIVACY_NOTICE}</p>
        </form>
    }
}
