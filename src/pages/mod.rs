use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardFooter, CardHeader, CardTitle, Input, Label, Spinner, Textarea,
};
use crate::models::{JournalEntry, Media, MediaKind, PersonalInfo};
use crate::state::{AppContext, NoticeKind, ProfileTab};
use crate::util::{read_file, selected_file};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

const NAV_LINK: &str = "rounded-md px-3 py-1.5 text-muted-foreground hover:bg-accent hover:text-accent-foreground";

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Login,
    Register,
}

#[component]
fn NoticeBar() -> impl IntoView {
    let store = expect_context::<AppContext>().0;

    view! {
        {move || {
            store.notice.get().map(|notice| {
                let class = match notice.kind {
                    NoticeKind::Info => "",
                    NoticeKind::Error => "border-destructive/30 text-destructive",
                };
                view! {
                    <Alert class=class>
                        <AlertDescription>{notice.message}</AlertDescription>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            on:click=move |_| store.dismiss_notice()
                        >
                            "Dismiss"
                        </Button>
                    </Alert>
                }
            })
        }}
    }
}

#[component]
fn AuthPanel() -> impl IntoView {
    let store = expect_context::<AppContext>().0;

    let mode = RwSignal::new(AuthMode::Login);
    let username: RwSignal<String> = RwSignal::new(String::new());
    let nickname: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get_untracked();
        let nickname_val = nickname.get_untracked();
        let password_val = password.get_untracked();
        let register = mode.get_untracked() == AuthMode::Register;

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = if register {
                store.register(username_val, nickname_val, password_val).await
            } else {
                store.login(username_val, password_val).await
            };
            match result {
                Ok(()) => {
                    password.set(String::new());
                    store.close_auth_modal();
                }
                Err(e) => error.set(Some(e)),
            }
            loading.set(false);
        });
    };

    let toggle_mode = move |_| {
        error.set(None);
        mode.update(|m| {
            *m = match m {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            }
        });
    };

    view! {
        <Card class="mx-auto w-full max-w-sm">
            <CardHeader>
                <CardTitle class="text-lg">
                    {move || match mode.get() {
                        AuthMode::Login => "Log in",
                        AuthMode::Register => "Create account",
                    }}
                </CardTitle>
                <CardDescription class="text-xs">"Sign in to sync your travel journals."</CardDescription>
            </CardHeader>

            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="username">"Username"</Label>
                        <Input id="username" bind_value=username required=true class="h-8" />
                    </div>

                    <Show when=move || mode.get() == AuthMode::Register fallback=|| ().into_view()>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="nickname">"Nickname"</Label>
                            <Input id="nickname" bind_value=nickname required=true class="h-8" />
                        </div>
                    </Show>

                    <div class="flex flex-col gap-1.5">
                        <Label html_for="password">"Password"</Label>
                        <Input
                            id="password"
                            r#type="password"
                            placeholder="••••••••"
                            bind_value=password
                            required=true
                            class="h-8"
                        />
                    </div>

                    {move || {
                        error.get().map(|e| {
                            view! {
                                <Alert class="border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                </Alert>
                            }
                        })
                    }}

                    <Button class="w-full" size=ButtonSize::Sm attr:disabled=move || loading.get()>
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || loading.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || match mode.get() {
                                AuthMode::Login => "Continue",
                                AuthMode::Register => "Register",
                            }}
                        </span>
                    </Button>
                </form>
            </CardContent>

            <CardFooter class="justify-between text-xs text-muted-foreground">
                <Button variant=ButtonVariant::Link size=ButtonSize::Sm on:click=toggle_mode>
                    {move || match mode.get() {
                        AuthMode::Login => "No account? Register",
                        AuthMode::Register => "Have an account? Log in",
                    }}
                </Button>
                <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=move |_| store.close_auth_modal()>
                    "Close"
                </Button>
            </CardFooter>
        </Card>
    }
}

/// Navigation, session controls, notices and the login panel.
#[component]
fn Header() -> impl IntoView {
    let store = expect_context::<AppContext>().0;

    view! {
        <header class="flex flex-col gap-3 border-b px-4 py-3">
            <div class="flex items-center justify-between">
                <nav class="flex items-center gap-1 text-sm">
                    <a class=NAV_LINK href="/">"Journals"</a>
                    <a class=NAV_LINK href="/editor">"Editor"</a>
                    <a class=NAV_LINK href="/personal">"Profile"</a>
                </nav>

                <Show
                    when=move || store.logged_in.get()
                    fallback=move || view! {
                        <Button size=ButtonSize::Sm on:click=move |_| store.open_auth_modal()>"Log in"</Button>
                    }
                >
                    <div class="flex items-center gap-2 text-sm">
                        <span class="text-muted-foreground">
                            {move || store.personal_info.with(|p| p.nickname.clone())}
                        </span>
                        <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| store.logout()>
                            "Log out"
                        </Button>
                    </div>
                </Show>
            </div>

            <NoticeBar />

            <Show when=move || store.auth_modal_open.get() fallback=|| ().into_view()>
                <AuthPanel />
            </Show>
        </header>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let store = expect_context::<AppContext>().0;
    let navigate = StoredValue::new(use_navigate());
    let selected: RwSignal<Vec<i64>> = RwSignal::new(vec![]);
    let creating: RwSignal<bool> = RwSignal::new(false);

    Effect::new(move |_| {
        if store.logged_in.get() {
            spawn_local(store.fetch_journals());
        }
    });

    let on_create = move |_| {
        creating.set(true);
        spawn_local(async move {
            store.create_journal().await;
            creating.set(false);
            navigate.with_value(|nav| nav("/editor", Default::default()));
        });
    };

    let on_delete = move |_| {
        let ids = selected.get_untracked();
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            store.delete_journals(ids).await;
            selected.set(vec![]);
        });
    };

    let journal_row = move |entry: JournalEntry| {
        let Some(id) = entry.id else {
            return ().into_any();
        };
        let updated = entry.updated_at.clone().unwrap_or_default();
        let media_count = entry.media_list.len();

        view! {
            <li class="flex items-center gap-3 rounded-md border px-3 py-2">
                <input
                    type="checkbox"
                    prop:checked=move || selected.with(|s| s.contains(&id))
                    on:change=move |_| {
                        selected.update(|s| {
                            if let Some(pos) = s.iter().position(|x| *x == id) {
                                s.remove(pos);
                            } else {
                                s.push(id);
                            }
                        })
                    }
                />
                <button
                    class="flex flex-1 flex-col items-start text-left hover:cursor-pointer"
                    on:click=move |_| {
                        spawn_local(store.select_journal(id));
                        navigate.with_value(|nav| nav("/editor", Default::default()));
                    }
                >
                    <span class="text-sm font-medium">{entry.title}</span>
                    <span class="text-xs text-muted-foreground">
                        {format!("{updated} · {media_count} media")}
                    </span>
                </button>
            </li>
        }
        .into_any()
    };

    view! {
        <div class="min-h-screen bg-background">
            <Header />
            <main class="mx-auto flex w-full max-w-2xl flex-col gap-4 px-4 py-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-xl font-semibold">"Travel journals"</h1>
                    <Show when=move || store.logged_in.get() fallback=|| ().into_view()>
                        <div class="flex items-center gap-2">
                            <Button
                                variant=ButtonVariant::Destructive
                                size=ButtonSize::Sm
                                attr:disabled=move || selected.with(|s| s.is_empty())
                                on:click=on_delete
                            >
                                "Delete selected"
                            </Button>
                            <Button size=ButtonSize::Sm attr:disabled=move || creating.get() on:click=on_create>
                                "New journal"
                            </Button>
                        </div>
                    </Show>
                </div>

                <Show
                    when=move || store.logged_in.get()
                    fallback=|| view! { <div class="text-sm text-muted-foreground">"Log in to see your journals."</div> }
                >
                    <Show
                        when=move || !store.journals.with(|j| j.is_empty())
                        fallback=|| view! { <div class="text-sm text-muted-foreground">"No journals yet."</div> }
                    >
                        <ul class="flex flex-col gap-2">
                            {move || store.journals.get().into_iter().map(journal_row).collect_view()}
                        </ul>
                    </Show>
                </Show>
            </main>
        </div>
    }
}

fn media_view(media: Media, graphic: bool) -> AnyView {
    let is_video = media.kind.eq_ignore_ascii_case(MediaKind::Video.as_str());
    match (graphic, is_video) {
        (true, true) => view! { <video class="w-full rounded-md" src=media.url controls=true /> }.into_any(),
        (true, false) => view! { <img class="w-full rounded-md" src=media.url alt="" /> }.into_any(),
        (false, _) => view! {
            <a class="text-xs text-primary underline underline-offset-4" href=media.url.clone() target="_blank">
                {media.url.clone()}
            </a>
        }
        .into_any(),
    }
}

#[component]
pub fn EditorPage() -> impl IntoView {
    let store = expect_context::<AppContext>().0;
    let saving: RwSignal<bool> = RwSignal::new(false);
    let uploading: RwSignal<bool> = RwSignal::new(false);
    let upload_error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_save = move |_| {
        saving.set(true);
        spawn_local(async move {
            store.save_current_journal().await;
            saving.set(false);
        });
    };

    let on_pick_media = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        uploading.set(true);
        upload_error.set(None);
        spawn_local(async move {
            let result = match read_file(file).await {
                Ok(upload) => {
                    let kind = MediaKind::from_mime(&upload.mime);
                    store.upload_media(upload, kind).await.map(|_| ()).map_err(|e| e.to_string())
                }
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                upload_error.set(Some(e));
            }
            uploading.set(false);
        });
    };

    let content = Signal::derive(move || store.editor.with(|e| e.current.content.clone()));
    let on_content = Callback::new(move |v: String| store.editor.update(|e| e.current.content = v));

    view! {
        <div class="min-h-screen bg-background">
            <Header />
            <main class="mx-auto flex w-full max-w-2xl flex-col gap-4 px-4 py-6">
                <div class="flex items-center gap-2">
                    <input
                        class="flex-1 bg-transparent text-xl font-semibold outline-none"
                        placeholder="Title"
                        prop:value=move || store.editor.with(|e| e.current.title.clone())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            store.editor.update(|e| e.current.title = v);
                        }
                    />
                    <Show when=move || store.has_unsaved_changes() fallback=|| ().into_view()>
                        <span class="text-xs text-muted-foreground">"Unsaved changes"</span>
                    </Show>
                </div>

                <div class="flex items-center gap-2">
                    <label class="flex items-center gap-2 text-xs text-muted-foreground">
                        <input
                            type="checkbox"
                            prop:checked=move || store.graphic_mode.get()
                            on:change=move |ev| store.set_graphic_mode(event_target_checked(&ev))
                        />
                        "Image-text mode"
                    </label>
                    <label class="ml-auto text-xs text-muted-foreground">
                        {move || if uploading.get() { "Uploading..." } else { "Attach photo or video" }}
                        <input
                            type="file"
                            accept="image/*,video/*"
                            class="hidden"
                            on:change=on_pick_media
                        />
                    </label>
                </div>

                <Textarea rows=16 placeholder="Write about your trip..." value=content on_value=on_content />

                {move || {
                    upload_error.get().map(|e| {
                        view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        }
                    })
                }}

                <div class="grid gap-2 sm:grid-cols-2">
                    {move || {
                        let graphic = store.graphic_mode.get();
                        store
                            .editor
                            .with(|e| e.current.media_list.clone())
                            .into_iter()
                            .map(|m| media_view(m, graphic))
                            .collect_view()
                    }}
                </div>

                <div class="flex items-center justify-end gap-2">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || !store.has_unsaved_changes()
                        on:click=move |_| store.reset_current_journal()
                    >
                        "Discard changes"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || saving.get() || store.is_current_journal_empty()
                        on:click=on_save
                    >
                        <span class="inline-flex items-center gap-2">
                            <Show when=move || saving.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            "Save"
                        </span>
                    </Button>
                </div>
            </main>
        </div>
    }
}

#[component]
fn ProfileEditor() -> impl IntoView {
    let store = expect_context::<AppContext>().0;
    let info = store.personal_info.get_untracked();

    let nickname = RwSignal::new(info.nickname);
    let signature = RwSignal::new(info.signature);
    let birthday = RwSignal::new(info.birthday.unwrap_or_default());
    let gender = RwSignal::new(info.gender);

    let on_save = move |_| {
        store.personal_info.update(|p| {
            p.nickname = nickname.get_untracked();
            p.signature = signature.get_untracked();
            let b = birthday.get_untracked();
            p.birthday = (!b.trim().is_empty()).then_some(b);
            p.gender = gender.get_untracked();
        });
        store.set_edit_modal_open(false);
        spawn_local(store.save_personal_info());
    };

    view! {
        <div class="flex w-full flex-col gap-3">
            <div class="flex flex-col gap-1.5">
                <Label html_for="profile-nickname">"Nickname"</Label>
                <Input id="profile-nickname" bind_value=nickname class="h-8" />
            </div>
            <div class="flex flex-col gap-1.5">
                <Label html_for="signature">"Signature"</Label>
                <Input id="signature" bind_value=signature class="h-8" />
            </div>
            <div class="flex flex-col gap-1.5">
                <Label html_for="birthday">"Birthday"</Label>
                <Input id="birthday" r#type="date" bind_value=birthday class="h-8" />
            </div>
            <div class="flex flex-col gap-1.5">
                <Label html_for="gender">"Gender"</Label>
                <Input id="gender" bind_value=gender class="h-8" />
            </div>
            <div class="flex justify-end gap-2">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    on:click=move |_| store.set_edit_modal_open(false)
                >
                    "Cancel"
                </Button>
                <Button size=ButtonSize::Sm on:click=on_save>"Save"</Button>
            </div>
        </div>
    }
}

#[component]
pub fn PersonalPage() -> impl IntoView {
    let store = expect_context::<AppContext>().0;

    // Covers landing on /personal directly, not only tab clicks.
    Effect::new(move |_| {
        store.current_tab.track();
        store.logged_in.track();
        spawn_local(store.load_current_tab());
    });

    let on_pick_avatar = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match read_file(file).await {
                Ok(upload) => store.upload_avatar(upload).await,
                Err(e) => log::error!("failed to read avatar file: {e}"),
            }
        });
    };

    let counter = move |label: &'static str, value: fn(&PersonalInfo) -> i64| {
        view! {
            <div class="flex flex-col items-center">
                <span class="text-lg font-semibold">{move || store.personal_info.with(value)}</span>
                <span class="text-xs text-muted-foreground">{label}</span>
            </div>
        }
    };

    let tab_button = move |tab: ProfileTab, label: &'static str| {
        move || {
            if store.current_tab.get() == tab {
                view! { <Button size=ButtonSize::Sm>{label}</Button> }.into_any()
            } else {
                view! {
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |_| store.set_current_tab(tab)
                    >
                        {label}
                    </Button>
                }
                .into_any()
            }
        }
    };

    view! {
        <div class="min-h-screen bg-background">
            <Header />
            <main class="mx-auto flex w-full max-w-2xl flex-col gap-4 px-4 py-6">
                <Show
                    when=move || store.logged_in.get()
                    fallback=|| view! { <div class="text-sm text-muted-foreground">"Log in to see your profile."</div> }
                >
                    <Card>
                        <CardHeader>
                            <div class="flex items-center gap-4">
                                <label class="hover:cursor-pointer" title="Change avatar">
                                    <img
                                        class="size-16 rounded-full border object-cover"
                                        src=move || store.personal_info.with(|p| p.avatar_url.clone())
                                        alt=""
                                    />
                                    <input type="file" accept="image/*" class="hidden" on:change=on_pick_avatar />
                                </label>
                                <div class="flex flex-col gap-1">
                                    <CardTitle>{move || store.personal_info.with(|p| p.nickname.clone())}</CardTitle>
                                    <CardDescription>
                                        {move || store.personal_info.with(|p| p.signature.clone())}
                                    </CardDescription>
                                </div>
                            </div>
                        </CardHeader>
                        <CardContent>
                            <div class="grid grid-cols-4 gap-2">
                                {counter("Posts", |p| p.post_count)}
                                {counter("Likes", |p| p.like_count)}
                                {counter("Comments", |p| p.comment_count)}
                                {counter("Check-ins", |p| p.travel_check_in_count)}
                            </div>
                        </CardContent>
                        <CardFooter>
                            <Show
                                when=move || store.edit_modal_open.get()
                                fallback=move || view! {
                                    <Button
                                        variant=ButtonVariant::Outline
                                        size=ButtonSize::Sm
                                        on:click=move |_| store.set_edit_modal_open(true)
                                    >
                                        "Edit profile"
                                    </Button>
                                }
                            >
                                <ProfileEditor />
                            </Show>
                        </CardFooter>
                    </Card>

                    <div class="flex items-center gap-1">
                        {tab_button(ProfileTab::HistoryFootprints, "Footprints")}
                        {tab_button(ProfileTab::Journals, "Journals")}
                    </div>

                    {move || match store.current_tab.get() {
                        ProfileTab::HistoryFootprints => view! {
                            <div class="text-sm text-muted-foreground">
                                {move || {
                                    let n = store.personal_info.with(|p| p.travel_check_in_count);
                                    format!("{n} places checked in so far.")
                                }}
                            </div>
                        }
                        .into_any(),
                        ProfileTab::Journals => view! {
                            <ul class="flex flex-col gap-1 text-sm">
                                {move || {
                                    store
                                        .journals
                                        .get()
                                        .into_iter()
                                        .map(|j| view! { <li>{j.title}</li> })
                                        .collect_view()
                                }}
                            </ul>
                        }
                        .into_any(),
                    }}
                </Show>
            </main>
        </div>
    }
}
