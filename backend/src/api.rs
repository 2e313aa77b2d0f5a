use std::collections::BTreeMap;
use std::sync::Arc;

use app_shell::Bootstrap;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chart_render::{render_svg, Theme, UnknownTheme};
use chrono::{DateTime, Utc};
use dash_engine::{
    ChartSpec, Dashboard, Figure, InputCell, PayloadRange, Selection, SelectionError, SiteSelection,
    UnknownInput,
};
use launch_core::LaunchTable;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Read-only state shared by every API handler.
#[derive(Clone)]
pub struct ApiState {
    pub dashboard: Dashboard,
    pub bootstrap: Arc<Bootstrap>,
    pub loaded_at: DateTime<Utc>,
}

impl ApiState {
    pub fn new(table: LaunchTable) -> Self {
        let bootstrap = Arc::new(Bootstrap::for_table(&table));
        Self {
            dashboard: Dashboard::new(table),
            bootstrap,
            loaded_at: Utc::now(),
        }
    }

    fn default_selection(&self) -> Selection {
        self.bootstrap.layout.initial_selection()
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("invalid query string: {0}")]
    Query(String),
    #[error("missing query parameter `{0}`")]
    Missing(&'static str),
    #[error(transparent)]
    UnknownInput(#[from] UnknownInput),
    #[error("unknown chart {0:?}; expected `pie.svg` or `scatter.svg`")]
    UnknownChart(String),
    #[error(transparent)]
    UnknownTheme(#[from] UnknownTheme),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "rejected request");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Query string shared by the chart endpoints. Missing fields fall back to
/// the page's initial control values.
#[derive(Debug, Default, Deserialize)]
pub struct DashParams {
    pub site: Option<String>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub changed: Option<String>,
    pub theme: Option<String>,
}

impl DashParams {
    pub fn site(&self) -> SiteSelection {
        self.site
            .as_deref()
            .map(SiteSelection::from_value)
            .unwrap_or_default()
    }

    pub fn payload(&self, fallback: PayloadRange) -> Result<PayloadRange, SelectionError> {
        PayloadRange::new(
            self.low.unwrap_or(fallback.low()),
            self.high.unwrap_or(fallback.high()),
        )
    }

    pub fn selection(&self, fallback: &Selection) -> Result<Selection, ApiError> {
        Ok(Selection::new(self.site(), self.payload(fallback.payload)?))
    }

    pub fn changed(&self) -> Result<InputCell, ApiError> {
        let raw = self.changed.as_deref().ok_or(ApiError::Missing("changed"))?;
        Ok(raw.parse()?)
    }

    pub fn theme(&self) -> Result<Theme, ApiError> {
        match self.theme.as_deref() {
            None => Ok(Theme::default()),
            Some(raw) => Ok(raw.parse()?),
        }
    }
}

/// `Query<DashParams>` whose rejection is an [`ApiError`], so malformed
/// values (e.g. `low=abc`) get the same JSON body as other bad requests.
pub struct DashQuery(pub DashParams);

#[async_trait]
impl<S> FromRequestParts<S> for DashQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<DashParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Query(rejection.body_text()))?;
        Ok(Self(params))
    }
}

fn by_dom_id(figures: Vec<Figure>) -> BTreeMap<String, ChartSpec> {
    figures
        .into_iter()
        .map(|f| (f.slot.dom_id().to_string(), f.spec))
        .collect()
}

pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ApiState: FromRef<S>,
{
    Router::new()
        .route("/api/health", get(health))
        .route("/api/layout", get(layout))
        .route("/api/records", get(records))
        .route("/api/bootstrap", get(bootstrap))
        .route("/api/pie", get(pie))
        .route("/api/scatter", get(scatter))
        .route("/api/recompute", get(recompute))
        .route("/api/figures", get(figures))
        .route("/api/chart/:file", get(chart_svg))
}

pub async fn health(State(state): State<ApiState>) -> Json<serde_json::Value> {
    let table = state.dashboard.table();
    Json(json!({
        "status": "ok",
        "records": table.len(),
        "sites": table.sites().len(),
        "loaded_at": state.loaded_at.to_rfc3339(),
    }))
}

pub async fn layout(State(state): State<ApiState>) -> Json<app_shell::DashboardLayout> {
    Json(state.bootstrap.layout.clone())
}

pub async fn records(State(state): State<ApiState>) -> Json<LaunchTable> {
    Json(state.dashboard.table().clone())
}

pub async fn bootstrap(State(state): State<ApiState>) -> Json<Bootstrap> {
    Json(state.bootstrap.as_ref().clone())
}

pub async fn pie(
    State(state): State<ApiState>,
    DashQuery(params): DashQuery,
) -> Json<ChartSpec> {
    let site = params.site();
    tracing::debug!(%site, "pie");
    Json(state.dashboard.pie(&site))
}

pub async fn scatter(
    State(state): State<ApiState>,
    DashQuery(params): DashQuery,
) -> Result<Json<ChartSpec>, ApiError> {
    let sel = params.selection(&state.default_selection())?;
    tracing::debug!(site = %sel.site, low = sel.payload.low(), high = sel.payload.high(), "scatter");
    Ok(Json(state.dashboard.scatter(&sel.site, &sel.payload)))
}

/// Figures for the outputs bound to `changed`, keyed by DOM id.
pub async fn recompute(
    State(state): State<ApiState>,
    DashQuery(params): DashQuery,
) -> Result<Json<BTreeMap<String, ChartSpec>>, ApiError> {
    let changed = params.changed()?;
    let sel = params.selection(&state.default_selection())?;
    let figures = state.dashboard.on_input_changed(changed, &sel);
    tracing::debug!(input = changed.dom_id(), outputs = figures.len(), "recompute");
    Ok(Json(by_dom_id(figures)))
}

/// Every output for one selection: the first paint for clients that skip the bootstrap.
pub async fn figures(
    State(state): State<ApiState>,
    DashQuery(params): DashQuery,
) -> Result<Json<BTreeMap<String, ChartSpec>>, ApiError> {
    let sel = params.selection(&state.default_selection())?;
    Ok(Json(by_dom_id(state.dashboard.render_all(&sel))))
}

pub async fn chart_svg(
    State(state): State<ApiState>,
    Path(file): Path<String>,
    DashQuery(params): DashQuery,
) -> Result<Response, ApiError> {
    let theme = params.theme()?;
    let spec = match file.as_str() {
        "pie.svg" => state.dashboard.pie(&params.site()),
        "scatter.svg" => {
            let sel = params.selection(&state.default_selection())?;
            state.dashboard.scatter(&sel.site, &sel.payload)
        }
        _ => return Err(ApiError::UnknownChart(file)),
    };
    let svg = render_svg(&spec, theme);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    const CSV: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,KSC LC-39A,1,5000,F9 v1.0 B0003,v1.0
1,2,KSC LC-39A,0,3000,F9 v1.0 B0004,v1.0
2,3,CCAFS SLC-40,1,7000,F9 v1.1 B1011,v1.1
";

    fn state() -> ApiState {
        ApiState::new(LaunchTable::from_reader(CSV.as_bytes()).unwrap())
    }

    fn params(site: Option<&str>, low: Option<f64>, high: Option<f64>) -> DashParams {
        DashParams {
            site: site.map(str::to_string),
            low,
            high,
            ..DashParams::default()
        }
    }

    #[test]
    fn params_fall_back_to_initial_selection() {
        let st = state();
        let sel = DashParams::default().selection(&st.default_selection()).unwrap();
        assert!(sel.site.is_all());
        assert_eq!(sel.payload, PayloadRange::new(3000.0, 7000.0).unwrap());

        let sel = params(Some("KSC LC-39A"), Some(0.0), None)
            .selection(&st.default_selection())
            .unwrap();
        assert_eq!(sel.site, SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(sel.payload, PayloadRange::new(0.0, 7000.0).unwrap());
    }

    #[test]
    fn changed_names() {
        let mut p = DashParams::default();
        assert!(matches!(p.changed(), Err(ApiError::Missing("changed"))));
        p.changed = Some("payload_range".into());
        assert_eq!(p.changed().unwrap(), InputCell::PayloadRange);
        p.changed = Some("theme".into());
        assert!(matches!(p.changed(), Err(ApiError::UnknownInput(_))));
    }

    #[tokio::test]
    async fn pie_for_site() {
        let Json(spec) = pie(State(state()), DashQuery(params(Some("KSC LC-39A"), None, None))).await;
        let pie = spec.as_pie().unwrap();
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(pie.total(), 2);
    }

    #[tokio::test]
    async fn scatter_filters_by_range() {
        let Json(spec) = scatter(State(state()), DashQuery(params(None, Some(4000.0), Some(8000.0))))
            .await
            .unwrap();
        assert_eq!(spec.as_scatter().unwrap().points.len(), 2);
    }

    #[tokio::test]
    async fn inverted_range_is_bad_request() {
        let err = scatter(State(state()), DashQuery(params(None, Some(9000.0), Some(1000.0))))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Selection(SelectionError::Inverted { .. })));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn recompute_payload_touches_scatter_only() {
        let mut p = params(Some("All"), Some(0.0), Some(10_000.0));
        p.changed = Some("payload_range".into());
        let Json(out) = recompute(State(state()), DashQuery(p)).await.unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.contains_key("success-payload-scatter-chart"));

        let mut p = params(Some("All"), None, None);
        p.changed = Some("site".into());
        let Json(out) = recompute(State(state()), DashQuery(p)).await.unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.contains_key("success-pie-chart"));
    }

    #[tokio::test]
    async fn svg_endpoint() {
        let resp = chart_svg(State(state()), Path("pie.svg".into()), DashQuery(DashParams::default()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );

        let err = chart_svg(State(state()), Path("bar.svg".into()), DashQuery(DashParams::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownChart(_)));

        let mut p = DashParams::default();
        p.theme = Some("neon".into());
        let err = chart_svg(State(state()), Path("scatter.svg".into()), DashQuery(p))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownTheme(_)));
    }

    async fn rejection_for(uri: &str) -> ApiError {
        let (mut parts, ()) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        match DashQuery::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("{uri} should be rejected"),
            Err(err) => err,
        }
    }

    #[tokio::test]
    async fn malformed_number_gets_json_error() {
        let err = rejection_for("/api/scatter?low=abc&high=5000").await;
        assert!(matches!(err, ApiError::Query(_)));

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let msg = body["error"].as_str().unwrap();
        assert!(msg.starts_with("invalid query string"), "{msg}");
    }

    #[tokio::test]
    async fn well_formed_query_extracts() {
        let (mut parts, ()) = Request::builder()
            .uri("/api/scatter?site=KSC%20LC-39A&low=0&high=5000")
            .body(())
            .unwrap()
            .into_parts();
        let DashQuery(p) = DashQuery::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(p.site.as_deref(), Some("KSC LC-39A"));
        assert_eq!((p.low, p.high), (Some(0.0), Some(5000.0)));
    }

    #[tokio::test]
    async fn figures_paint_every_output() {
        let Json(out) = figures(State(state()), DashQuery(DashParams::default()))
            .await
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out["success-pie-chart"].as_pie().unwrap().total(), 2);
        assert_eq!(
            out["success-payload-scatter-chart"].as_scatter().unwrap().points.len(),
            3
        );

        let err = figures(State(state()), DashQuery(params(None, Some(-1.0), None)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Selection(SelectionError::Negative { .. })));
    }

    #[tokio::test]
    async fn health_reports_counts() {
        let Json(body) = health(State(state())).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["records"], 3);
        assert_eq!(body["sites"], 2);
    }
}
