pub const GLOBAL_CSS: &str = r#"
:root {
  --bg: #05090f;
  --bg-elev-1: #0b111a;
  --panel: #0d1520;
  --border: rgba(255, 255, 255, 0.08);
  --border-strong: rgba(255, 255, 255, 0.16);
  --text: #e6edf7;
  --text-dim: #b7c6d9;
  --text-muted: #7f8ba0;
  --accent: #5cb0ff;
  --negative: #f0635c;
  --shadow-soft: 0 14px 42px rgba(0, 0, 0, 0.38);
  --radius: 10px;
  --radius-pill: 999px;
  --space-1: 4px;
  --space-2: 8px;
  --space-3: 12px;
  --space-4: 16px;
  --font-body: "Inter", "SF Pro Text", system-ui, -apple-system, sans-serif;
  --font-size-xs: 11px;
  --font-size-sm: 13px;
  --transition: 140ms ease-out;
}

.light-theme {
  --bg: #f8fbff;
  --bg-elev-1: #ffffff;
  --panel: #ffffff;
  --border: rgba(0, 0, 0, 0.06);
  --border-strong: rgba(0, 0, 0, 0.12);
  --text: #0c1625;
  --text-dim: #2c3a4f;
  --text-muted: #5b6678;
  --accent: #2563eb;
  --negative: #e11d48;
  --shadow-soft: 0 10px 36px rgba(0, 0, 0, 0.14);
}

* { box-sizing: border-box; }
html, body {
  padding: 0;
  margin: 0;
  background: var(--bg);
  color: var(--text);
  font-family: var(--font-body);
  font-size: var(--font-size-sm);
  line-height: 1.4;
}

input, select {
  background: var(--bg-elev-1);
  border: 1px solid var(--border);
  color: var(--text);
  padding: var(--space-2) var(--space-3);
  border-radius: var(--radius);
  font-size: var(--font-size-sm);
  outline: none;
  transition: border-color var(--transition);
}
input:focus, select:focus { border-color: var(--accent); }

.dash-app { background: var(--bg); color: var(--text); min-height: 100vh; }
.dash-shell { display: flex; flex-direction: column; gap: var(--space-4); padding: var(--space-4); max-width: 1080px; margin: 0 auto; }
.dash-heading { text-align: center; font-size: 40px; margin: var(--space-2) 0; }
.panel { background: var(--panel); border: 1px solid var(--border); border-radius: var(--radius); box-shadow: var(--shadow-soft); padding: var(--space-3); }
.control-row { display: flex; gap: var(--space-3); align-items: flex-end; flex-wrap: wrap; }
.control-stack { display: flex; flex-direction: column; gap: var(--space-1); }
.input-label { font-size: var(--font-size-xs); color: var(--text-muted); letter-spacing: 0.04em; text-transform: uppercase; }
.site-select { min-width: 260px; }
.slider-pair { display: grid; grid-template-columns: auto 1fr auto; gap: var(--space-2); align-items: center; }
.slider-pair input[type=range] { padding: 0; }
.slider-value { font-variant-numeric: tabular-nums; color: var(--text-dim); min-width: 56px; text-align: right; }
.slider-marks { display: flex; justify-content: space-between; font-size: var(--font-size-xs); color: var(--text-muted); padding: 0 var(--space-1); }
.chart { width: 100%; }
.chart svg { display: block; border-radius: var(--radius); }
.chart-error { border: 1px solid var(--negative); color: var(--negative); border-radius: var(--radius); padding: var(--space-3); }
.dash-status { padding: var(--space-4); color: var(--text-muted); text-align: center; }
.dash-status.error { color: var(--negative); }
.theme-toggle { background: transparent; color: var(--text-dim); border: 1px solid var(--border-strong); border-radius: var(--radius-pill); padding: var(--space-1) var(--space-3); cursor: pointer; }
"#;
