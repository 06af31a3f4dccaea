#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-clinic-ui]";

/// Default CSS for the report view along with overridable design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --clinic-font-family: 'Inter', system-ui, -apple-system, 'Segoe UI', sans-serif;
  --clinic-bg: #f6f8fb;
  --clinic-card-bg: #ffffff;
  --clinic-card-border: rgba(148, 163, 184, 0.3);
  --clinic-radius: 14px;
  --clinic-text: #1f2933;
  --clinic-muted: #52606d;
  --clinic-accent: #2563eb;
  --clinic-sidebar-bg: #0f3d57;
  --clinic-sidebar-text: #e6f1f8;
  --clinic-present: #16a34a;
  --clinic-absent: #dc2626;
  --clinic-unknown: #94a3b8;
  --clinic-empty: #e2e8f0;
  --clinic-notice-bg: rgba(220, 38, 38, 0.1);
  --clinic-notice-text: #991b1b;
}

.clinic-root {
  font-family: var(--clinic-font-family);
  color: var(--clinic-text);
  background: var(--clinic-bg);
  display: grid;
  grid-template-columns: 220px 1fr;
  min-height: 100%;
}

.clinic-root.sidebar-collapsed {
  grid-template-columns: 56px 1fr;
}

.clinic-sidebar {
  background: var(--clinic-sidebar-bg);
  color: var(--clinic-sidebar-text);
  padding: 16px 12px;
  display: flex;
  flex-direction: column;
  gap: 12px;
}

.clinic-sidebar ul {
  list-style: none;
  margin: 0;
  padding: 0;
  display: flex;
  flex-direction: column;
  gap: 4px;
}

.clinic-sidebar a {
  color: inherit;
  text-decoration: none;
  display: block;
  padding: 8px 10px;
  border-radius: 8px;
}

.clinic-sidebar a:hover {
  background: rgba(255, 255, 255, 0.12);
}

.sidebar-collapsed .clinic-sidebar a,
.sidebar-collapsed .sidebar-role {
  overflow: hidden;
  white-space: nowrap;
  text-overflow: clip;
  width: 32px;
}

.sidebar-toggle {
  align-self: flex-end;
  background: transparent;
  border: 1px solid rgba(255, 255, 255, 0.3);
  color: inherit;
  border-radius: 6px;
  cursor: pointer;
}

.sidebar-role {
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  opacity: 0.8;
}

.report-main {
  padding: 24px 28px;
  display: flex;
  flex-direction: column;
  gap: 18px;
}

.report-eyebrow {
  font-size: 12px;
  text-transform: uppercase;
  color: var(--clinic-muted);
}

.report-header h2 {
  margin: 4px 0;
}

.report-toolbar {
  display: flex;
  flex-wrap: wrap;
  align-items: flex-end;
  gap: 12px;
}

.report-toolbar label {
  display: flex;
  flex-direction: column;
  font-size: 13px;
  color: var(--clinic-muted);
  gap: 4px;
}

.report-toolbar button,
.assistant-panel button {
  border: 1px solid var(--clinic-card-border);
  background: var(--clinic-card-bg);
  border-radius: 8px;
  padding: 6px 12px;
  cursor: pointer;
}

.mode-tabs {
  display: flex;
  gap: 6px;
  margin-left: auto;
}

.mode-tab.is-active {
  background: var(--clinic-accent);
  color: #ffffff;
  border-color: var(--clinic-accent);
}

.report-warning,
.clinic-notice {
  background: var(--clinic-notice-bg);
  color: var(--clinic-notice-text);
  padding: 10px 14px;
  border-radius: 10px;
}

.report-panel {
  background: var(--clinic-card-bg);
  border: 1px solid var(--clinic-card-border);
  border-radius: var(--clinic-radius);
  padding: 20px;
}

.summary-grid {
  display: grid;
  grid-template-columns: repeat(3, minmax(0, 1fr));
  gap: 14px;
}

.report-card {
  border: 1px solid var(--clinic-card-border);
  border-radius: var(--clinic-radius);
  padding: 14px 16px;
}

.report-card.wide,
.summary-grid .report-card:nth-child(4) {
  grid-column: 1 / -1;
}

.rate-card .rate-value {
  font-size: 28px;
  font-weight: 600;
  display: block;
}

.rate-card[data-level="present"] .rate-value { color: var(--clinic-present); }
.rate-card[data-level="absent"] .rate-value { color: var(--clinic-absent); }
.rate-card[data-level="unknown"] .rate-value { color: var(--clinic-unknown); }

.rate-count,
.report-empty {
  color: var(--clinic-muted);
  font-size: 13px;
}

.indicator-list,
.month-bars,
.type-list,
.pie-legend {
  list-style: none;
  margin: 0;
  padding: 0;
  display: flex;
  flex-direction: column;
  gap: 8px;
}

.indicator-list li,
.month-bars li {
  display: grid;
  grid-template-columns: 160px 1fr 140px;
  align-items: center;
  gap: 10px;
}

.indicator-bar,
.month-bar {
  display: flex;
  height: 10px;
  border-radius: 999px;
  background: var(--clinic-empty);
  overflow: hidden;
}

.indicator-bar span {
  background: var(--clinic-accent);
}

.month-bar .present { background: var(--clinic-present); }
.month-bar .absent { background: var(--clinic-absent); }

.goal-series table,
.professional-table {
  width: 100%;
  border-collapse: collapse;
  font-size: 14px;
}

.goal-series th,
.goal-series td,
.professional-table th,
.professional-table td {
  text-align: left;
  padding: 6px 8px;
  border-bottom: 1px solid var(--clinic-card-border);
}

.pie-layout {
  display: grid;
  grid-template-columns: 200px 1fr;
  gap: 20px;
  align-items: center;
}

.attendance-pie {
  width: 180px;
  height: 180px;
  border-radius: 50%;
}

.pie-legend li {
  display: flex;
  align-items: center;
  gap: 8px;
}

.legend-swatch {
  width: 12px;
  height: 12px;
  border-radius: 3px;
  display: inline-block;
}

.pie-legend [data-level="present"] .legend-swatch { background: var(--clinic-present); }
.pie-legend [data-level="absent"] .legend-swatch { background: var(--clinic-absent); }
.pie-legend [data-level="unknown"] .legend-swatch { background: var(--clinic-unknown); }

.type-list {
  grid-column: 1 / -1;
}

.type-list li {
  display: flex;
  justify-content: space-between;
}

.assistant-panel {
  background: var(--clinic-card-bg);
  border: 1px solid var(--clinic-card-border);
  border-radius: var(--clinic-radius);
  padding: 18px 20px;
  display: flex;
  flex-direction: column;
  gap: 10px;
}

.assistant-panel textarea {
  min-height: 80px;
  font: inherit;
  padding: 8px;
  border-radius: 8px;
  border: 1px solid var(--clinic-card-border);
}

.assistant-panel button[disabled] {
  opacity: 0.6;
  cursor: progress;
}

.assistant-answer {
  white-space: pre-wrap;
  margin: 0;
}

@media (max-width: 860px) {
  .clinic-root {
    grid-template-columns: 1fr;
  }

  .summary-grid {
    grid-template-columns: 1fr;
  }

  .indicator-list li,
  .month-bars li {
    grid-template-columns: 1fr;
  }

  .mode-tabs {
    margin-left: 0;
    flex-wrap: wrap;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head> element"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-clinic-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
