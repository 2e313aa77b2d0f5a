use crate::{
    dashboard::DashboardView,
    state::{
        api_base_default, bootstrap_script_json, initial_bootstrap, provide_dash_ctx,
        BOOTSTRAP_ELEMENT_ID,
    },
    theme::GLOBAL_CSS,
};
use app_shell::{Bootstrap, HEADING};
use leptos::*;
use leptos_meta::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
    Loading,
    Ready(Bootstrap),
    Failed(String),
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let ctx = provide_dash_ctx(api_base_default());

    let load = create_rw_signal(match initial_bootstrap() {
        Some(boot) => LoadState::Ready(boot),
        None => LoadState::Loading,
    });

    // Static (csr) pages carry no embedded table: fetch it once.
    #[cfg(target_arch = "wasm32")]
    {
        if load.get_untracked() == LoadState::Loading {
            let api = ctx.api_base.clone();
            spawn_local(async move {
                let next = match app_shell::load_bootstrap_from_backend(&api).await {
                    Ok(boot) => LoadState::Ready(boot),
                    Err(err) => LoadState::Failed(err),
                };
                load.set(next);
            });
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = &ctx;

    view! {
        <Style>{GLOBAL_CSS}</Style>
        <Title text=HEADING/>
        {move || match load.get() {
            LoadState::Loading => {
                view! { <div class="dash-status">"Loading launch records…"</div> }.into_view()
            }
            LoadState::Failed(err) => view! {
                <div class="dash-status error">{format!("Failed to load launch records: {err}")}</div>
            }
            .into_view(),
            LoadState::Ready(boot) => {
                let json = bootstrap_script_json(&boot);
                view! {
                    <script type="application/json" id=BOOTSTRAP_ELEMENT_ID inner_html=json></script>
                    <DashboardView table=boot.records layout=boot.layout/>
                }
                .into_view()
            }
        }}
    }
}
