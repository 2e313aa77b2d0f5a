use app_shell::DashboardLayout;
use chart_render::{render_svg, Theme};
use dash_engine::{Dashboard, PayloadRange, SiteSelection};
use launch_core::LaunchTable;
use leptos::*;

/// Parse a slider value; ignores anything that is not a number.
fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn next_theme(theme: Theme) -> Theme {
    match theme {
        Theme::Dark => Theme::Light,
        Theme::Light => Theme::Dark,
    }
}

#[component]
pub fn DashboardView(table: LaunchTable, layout: DashboardLayout) -> impl IntoView {
    let dashboard = store_value(Dashboard::new(table));
    let initial = layout.initial_selection();

    // Input cells.
    let site = create_rw_signal(initial.site.clone());
    let low = create_rw_signal(initial.payload.low());
    let high = create_rw_signal(initial.payload.high());
    let theme = create_rw_signal(layout.theme);
    let (query, set_query) = create_signal(String::new());

    let payload = create_memo(move |_| PayloadRange::new(low.get(), high.get()));

    // Pie tracks the site only, so slider moves never recompute it.
    let pie = create_memo(move |_| {
        let site = site.get();
        dashboard.with_value(|d| d.pie(&site))
    });
    let scatter = create_memo(move |_| {
        let site = site.get();
        payload
            .get()
            .map(|range| dashboard.with_value(|d| d.scatter(&site, &range)))
    });

    let pie_svg = move || pie.with(|spec| render_svg(spec, theme.get()));
    let pie_title = move || pie.with(|spec| spec.title().to_string());
    let scatter_view = move || match scatter.get() {
        Ok(spec) => {
            let svg = render_svg(&spec, theme.get());
            let title = spec.title().to_string();
            view! { <div class="chart" role="img" aria-label=title inner_html=svg></div> }
                .into_view()
        }
        Err(err) => view! { <div class="chart-error">{err.to_string()}</div> }.into_view(),
    };

    let dropdown = layout.site_dropdown.clone();
    let slider = layout.payload_slider.clone();
    let options = store_value(dropdown.options.clone());
    let visible_options = move || {
        let q = query.get().to_lowercase();
        let current = site.with(|s| s.as_value().to_string());
        options.with_value(|opts| {
            opts.iter()
                .filter(|o| q.is_empty() || o.label.to_lowercase().contains(&q) || o.value == current)
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let theme_class = move || match theme.get() {
        Theme::Light => "dash-app light-theme",
        Theme::Dark => "dash-app",
    };
    let marks = slider.marks.clone();
    let marks_list = slider.marks.clone();

    view! {
        <main class=theme_class>
            <div class="dash-shell">
                <div class="control-row" style="justify-content: space-between;">
                    <h1 class="dash-heading">{layout.heading.clone()}</h1>
                    <button
                        class="theme-toggle"
                        on:click=move |_| theme.update(|t| *t = next_theme(*t))
                    >
                        {move || match theme.get() {
                            Theme::Dark => "Light theme",
                            Theme::Light => "Dark theme",
                        }}
                    </button>
                </div>

                <section class="panel control-row">
                    {dropdown.searchable.then(|| view! {
                        <div class="control-stack">
                            <label class="input-label" for="site-search">"Search"</label>
                            <input
                                id="site-search"
                                type="search"
                                placeholder=dropdown.placeholder.clone()
                                value=move || query.get()
                                on:input=move |ev| set_query.set(event_target_value(&ev))
                            />
                        </div>
                    })}
                    <div class="control-stack">
                        <label class="input-label" for=dropdown.id.clone()>"Launch site"</label>
                        <select
                            class="site-select"
                            id=dropdown.id.clone()
                            name=dropdown.id.clone()
                            prop:value=move || site.with(|s| s.as_value().to_string())
                            on:change=move |ev| site.set(SiteSelection::from_value(&event_target_value(&ev)))
                        >
                            {move || {
                                let current = site.with(|s| s.as_value().to_string());
                                visible_options()
                                    .into_iter()
                                    .map(|o| {
                                        let selected = o.value == current;
                                        view! { <option value=o.value selected=selected>{o.label}</option> }
                                    })
                                    .collect_view()
                            }}
                        </select>
                    </div>
                </section>

                <section class="panel" id=layout.pie_graph.id.clone()>
                    <div class="chart" role="img" aria-label=pie_title inner_html=pie_svg></div>
                </section>

                <section class="panel flex-col">
                    <p class="input-label">{layout.payload_label.clone()}</p>
                    <div class="slider-pair" id=slider.id.clone()>
                        <span class="slider-value">{move || format!("{:.0}", low.get())}</span>
                        <div class="control-stack">
                            <input
                                type="range"
                                aria-label="Minimum payload"
                                min=slider.min.to_string()
                                max=slider.max.to_string()
                                step=slider.step.to_string()
                                list="payload-marks"
                                prop:value=move || low.get().to_string()
                                on:input=move |ev| {
                                    if let Some(v) = parse_bound(&event_target_value(&ev)) {
                                        low.set(v);
                                    }
                                }
                            />
                            <input
                                type="range"
                                aria-label="Maximum payload"
                                min=slider.min.to_string()
                                max=slider.max.to_string()
                                step=slider.step.to_string()
                                list="payload-marks"
                                prop:value=move || high.get().to_string()
                                on:input=move |ev| {
                                    if let Some(v) = parse_bound(&event_target_value(&ev)) {
                                        high.set(v);
                                    }
                                }
                            />
                            <div class="slider-marks">
                                {marks.into_iter().map(|m| view! { <span>{m.label}</span> }).collect_view()}
                            </div>
                        </div>
                        <span class="slider-value">{move || format!("{:.0}", high.get())}</span>
                    </div>
                    <datalist id="payload-marks">
                        {marks_list
                            .into_iter()
                            .map(|m| view! { <option value=m.value.to_string()></option> })
                            .collect_view()}
                    </datalist>
                </section>

                <section class="panel" id=layout.scatter_graph.id.clone()>
                    {scatter_view}
                </section>
            </div>
        </main>
    }
}
