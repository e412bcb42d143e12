use chrono::Local;
use form_widgets::{ArrayInput, Combobox, DatePicker, MediaUploader, RemoteFile};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use platform_host::FilePayload;
use platform_host_web::BrowserFile;

use crate::demo_data::{avatar_config, cuisine_options, gallery_config, stored_media};

const MAX_LOG_LINES: usize = 12;

fn describe_files(files: &[BrowserFile]) -> String {
    if files.is_empty() {
        return "none".to_string();
    }
    files
        .iter()
        .map(BrowserFile::file_name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Form widgets" />
        <Meta name="description" content="Media uploader, array input, date picker, and combobox demo." />

        <Router>
            <main class="site-root">
                <nav class="site-nav">
                    <A href="/">"Listing form"</A>
                    <A href="/avatar">"Avatar"</A>
                </nav>
                <Routes>
                    <Route path="" view=DemoForm />
                    <Route path="/avatar" view=AvatarDemo />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
/// Full listing form exercising every widget against seeded server data.
pub fn DemoForm() -> impl IntoView {
    let existing = create_rw_signal(stored_media());
    let reload_stored = move |_: ev::MouseEvent| existing.set(stored_media());
    let events = create_rw_signal(Vec::<String>::new());
    let record = move |line: String| {
        logging::log!("{line}");
        events.update(|events| {
            events.insert(0, line);
            events.truncate(MAX_LOG_LINES);
        });
    };

    let on_existing_file_remove = Callback::new(move |file: RemoteFile| {
        record(format!("removed {} (#{})", file.name, file.id));
    });

    view! {
        <form class="demo-form" method="post" action="/listing" on:submit=|ev| ev.prevent_default()>
            <h1>"Edit listing"</h1>
            <MediaUploader
                label="Photos and documents"
                description="Stored files can be restored for 10 seconds after removal."
                config=gallery_config()
                existing_files=existing
                on_files_change=Callback::new(move |files: Vec<BrowserFile>| {
                    record(format!("selected: {}", describe_files(&files)));
                })
                on_upload_complete=Callback::new(move |files: Vec<BrowserFile>| {
                    record(format!("uploaded: {}", describe_files(&files)));
                })
                on_error=Callback::new(move |message: String| record(format!("error: {message}")))
                on_existing_file_remove
            />
            <ArrayInput
                name="tags[]"
                label="Tags"
                placeholder="e.g. outdoor seating"
                initial=vec!["family friendly".to_string()]
                max_items=5
                on_change=Callback::new(move |items: Vec<String>| {
                    record(format!("tags: {}", items.join(" | ")));
                })
            />
            <DatePicker
                name="opens_at"
                label="Opening"
                with_time=true
                min_date=Local::now().date_naive()
                on_change=Callback::new(move |value: Option<chrono::NaiveDateTime>| {
                    record(format!(
                        "opening: {}",
                        value.map_or_else(|| "cleared".to_string(), |value| value.to_string())
                    ));
                })
            />
            <Combobox
                name="cuisines[]"
                label="Cuisines"
                options=cuisine_options()
                max_selected=3
                on_change=Callback::new(move |values: Vec<String>| {
                    record(format!("cuisines: {}", values.join(", ")));
                })
            />
            <button type="button" on:click=reload_stored>"Reload stored files"</button>
            <button type="submit">"Save"</button>
        </form>
        <section class="demo-log" aria-live="polite">
            <h2>"Events"</h2>
            <ul>
                {move || {
                    events
                        .get()
                        .into_iter()
                        .map(|line| view! { <li>{line}</li> })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}

#[component]
/// Single-file uploader restricted to small images.
pub fn AvatarDemo() -> impl IntoView {
    let status = create_rw_signal(String::from("No avatar selected"));

    view! {
        <form class="demo-form" method="post" action="/profile" on:submit=|ev| ev.prevent_default()>
            <h1>"Profile picture"</h1>
            <MediaUploader
                label="Avatar"
                description="PNG, JPEG, or WebP up to 2MB."
                config=avatar_config()
                on_upload_complete=Callback::new(move |files: Vec<BrowserFile>| {
                    status.set(format!("Uploaded {}", describe_files(&files)));
                })
                on_error=Callback::new(move |message: String| status.set(message))
            />
            <p class="demo-status">{move || status.get()}</p>
            <button type="submit">"Save"</button>
        </form>
    }
}
