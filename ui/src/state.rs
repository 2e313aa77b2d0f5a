use app_shell::Bootstrap;
use leptos::*;

/// DOM id of the JSON script block the server embeds for hydration.
pub const BOOTSTRAP_ELEMENT_ID: &str = "dash-bootstrap";

#[derive(Clone)]
pub struct DashCtx {
    pub api_base: String,
}

pub fn api_base_default() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        read_global("DASH_API_BASE").unwrap_or_else(|| "/api".to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "/api".to_string()
    }
}

#[cfg(target_arch = "wasm32")]
fn read_global(key: &str) -> Option<String> {
    js_sys::Reflect::get(&js_sys::global(), &wasm_bindgen::JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

pub fn provide_dash_ctx(api_base: String) -> DashCtx {
    let ctx = DashCtx { api_base };
    provide_context(ctx.clone());
    ctx
}

/// Server side: make the loaded table available to `App` while rendering.
pub fn provide_bootstrap(bootstrap: Bootstrap) {
    provide_context(bootstrap);
}

/// Bootstrap from render context (SSR) or the embedded script block (hydrate).
pub fn initial_bootstrap() -> Option<Bootstrap> {
    if let Some(boot) = use_context::<Bootstrap>() {
        return Some(boot);
    }
    #[cfg(target_arch = "wasm32")]
    {
        embedded_bootstrap()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[cfg(target_arch = "wasm32")]
fn embedded_bootstrap() -> Option<Bootstrap> {
    let doc = web_sys::window()?.document()?;
    let text = doc.get_element_by_id(BOOTSTRAP_ELEMENT_ID)?.text_content()?;
    serde_json::from_str(&text).ok()
}

/// JSON safe to place inside a `<script>` element.
pub fn bootstrap_script_json(bootstrap: &Bootstrap) -> String {
    serde_json::to_string(bootstrap)
        .map(|json| json.replace('<', "\\u003c"))
        .unwrap_or_default()
}
