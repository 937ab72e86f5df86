use crate::pages::{EditorPage, HomePage, PersonalPage};
use crate::state::{AppContext, JournalStore};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let store = JournalStore::new();
    provide_context(AppContext(store));
    store.initialize();

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=HomePage />
                <Route path=path!("editor") view=EditorPage />
                <Route path=path!("personal") view=PersonalPage />
            </Routes>
        </Router>
    }
}
