//! Patient report view for the WebAssembly target.

pub mod view_model;

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::styles;
    use crate::view_model::{
        bar_width, date_input_value, parse_date_input, pie_gradient, MountOptions,
    };
    use chrono::{Local, NaiveDateTime};
    use clinic_core::{
        navigation_for, Appointment, AttendanceCounts, AttendanceRates, Capability, DateWindow,
        GoalSeries, IndicatorPoint, ReportConfig, ReportMode, ReportPayload, ReportSummary, Role,
    };
    use clinic_report::format::{format_numeric, format_window, NO_DATA_MARKER};
    use clinic_report::{
        parse_answer_value, parse_appointments_value, parse_report_value, strip_markdown,
        summarize_report, AskRequest,
    };
    use serde_wasm_bindgen::{from_value, to_value};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::{spawn_local, JsFuture};
    use web_sys::{console, Document, Element, HtmlInputElement, HtmlTextAreaElement, Window};
    use yew::events::InputEvent;
    use yew::prelude::*;
    use yew::TargetCast;

    #[derive(Properties, PartialEq)]
    pub struct ReportViewProps {
        pub report: ReportPayload,
        pub appointments: Vec<Appointment>,
        pub role: Role,
        pub initial_window: DateWindow,
        pub config: ReportConfig,
        pub ask: Option<js_sys::Function>,
    }

    #[function_component(ReportView)]
    fn report_view(props: &ReportViewProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let initial_window = props.initial_window;
        let window = use_state(move || initial_window);
        let mode = use_state(ReportMode::default);
        let collapsed = use_state(|| false);
        let question = use_state(String::new);
        let answer = use_state(|| None::<String>);
        let busy = use_state(|| false);
        let notice = use_state(|| None::<String>);

        let current_window = *window;
        let summary = summarize_report(&props.report, &props.appointments, &current_window);

        let on_start = {
            let window = window.clone();
            Callback::from(move |event: Event| {
                let input: HtmlInputElement = event.target_unchecked_into();
                let mut next = *window;
                next.start = parse_date_input(&input.value());
                window.set(next);
            })
        };

        let on_end = {
            let window = window.clone();
            Callback::from(move |event: Event| {
                let input: HtmlInputElement = event.target_unchecked_into();
                let mut next = *window;
                next.end = parse_date_input(&input.value());
                window.set(next);
            })
        };

        let on_clear_window = {
            let window = window.clone();
            Callback::from(move |_| window.set(DateWindow::unbounded()))
        };

        let on_reset_window = {
            let window = window.clone();
            Callback::from(move |_| window.set(initial_window))
        };

        let on_question = {
            let question = question.clone();
            Callback::from(move |event: InputEvent| {
                let input: HtmlTextAreaElement = event.target_unchecked_into();
                question.set(input.value());
            })
        };

        let on_ask = {
            let question = question.clone();
            let answer = answer.clone();
            let busy = busy.clone();
            let notice = notice.clone();
            let report = props.report.clone();
            let appointments = props.appointments.clone();
            let config = props.config.clone();
            let ask = props.ask.clone();
            Callback::from(move |_: MouseEvent| {
                if *busy {
                    return;
                }
                let Some(ask) = ask.clone() else {
                    return;
                };

                let request = match AskRequest::for_report(
                    (*question).clone(),
                    &report,
                    &appointments,
                    &current_window,
                    &config,
                ) {
                    Ok(request) => request,
                    Err(_) => {
                        notice.set(Some("Digite uma pergunta antes de enviar.".to_string()));
                        return;
                    }
                };
                let payload = match to_value(&request) {
                    Ok(payload) => payload,
                    Err(err) => {
                        notice.set(Some(format!("Não foi possível preparar a pergunta: {err}")));
                        return;
                    }
                };

                busy.set(true);
                notice.set(None);

                let busy = busy.clone();
                let answer = answer.clone();
                let notice = notice.clone();
                spawn_local(async move {
                    match call_assistant(&ask, &payload).await {
                        Ok(text) => answer.set(Some(text)),
                        Err(message) => {
                            console::error_1(&JsValue::from_str(&message));
                            notice.set(Some(message));
                        }
                    }
                    busy.set(false);
                });
            })
        };

        let can_view = props.role.can(Capability::ViewReports);
        let can_ask = props.role.can(Capability::AskAssistant) && props.ask.is_some();
        let patient = props
            .report
            .patient_name
            .clone()
            .unwrap_or_else(|| "Paciente".to_string());

        html! {
            <div class={classes!("clinic-root", (*collapsed).then_some("sidebar-collapsed"))}>
                { render_sidebar(props.role, collapsed.clone()) }
                <main class="report-main">
                    {
                        if (*notice).is_some() {
                            html! {
                                <div class="clinic-notice" role="alert">
                                    { (*notice).clone().unwrap_or_default() }
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                    <header class="report-header">
                        <span class="report-eyebrow">{"Relatório do paciente"}</span>
                        <h2>{ patient }</h2>
                        <p>{ format!("Período: {}", format_window(&current_window)) }</p>
                    </header>
                    {
                        if can_view {
                            html! {
                                <>
                                    <section class="report-toolbar">
                                        <label>
                                            {"Início"}
                                            <input type="date" value={date_input_value(current_window.start)} onchange={on_start} />
                                        </label>
                                        <label>
                                            {"Fim"}
                                            <input type="date" value={date_input_value(current_window.end)} onchange={on_end} />
                                        </label>
                                        <button type="button" onclick={on_reset_window}>{"Últimos dias"}</button>
                                        <button type="button" onclick={on_clear_window}>{"Todo o histórico"}</button>
                                        { render_mode_tabs(mode.clone()) }
                                    </section>
                                    {
                                        if current_window.is_inverted() {
                                            html! { <p class="report-warning">{"A data inicial é posterior à data final."}</p> }
                                        } else {
                                            html! {}
                                        }
                                    }
                                    <section class="report-panel">
                                        { render_mode(*mode, &summary) }
                                    </section>
                                </>
                            }
                        } else {
                            html! { <p class="report-denied">{"Seu perfil não tem acesso aos relatórios."}</p> }
                        }
                    }
                    {
                        if can_ask && can_view {
                            html! {
                                <section class="assistant-panel">
                                    <h3>{"Pergunte ao assistente"}</h3>
                                    <textarea
                                        value={(*question).clone()}
                                        oninput={on_question}
                                        placeholder="Ex.: Como evoluiu a adesão neste período?"
                                        aria-label="Pergunta para o assistente"
                                    />
                                    <button type="button" onclick={on_ask} disabled={*busy}>
                                        { if *busy { "Consultando..." } else { "Perguntar" } }
                                    </button>
                                    {
                                        match (*answer).clone() {
                                            Some(text) => html! { <p class="assistant-answer">{ text }</p> },
                                            None => html! {},
                                        }
                                    }
                                </section>
                            }
                        } else {
                            html! {}
                        }
                    }
                </main>
            </div>
        }
    }

    async fn call_assistant(ask: &js_sys::Function, payload: &JsValue) -> Result<String, String> {
        let returned = ask
            .call1(&JsValue::NULL, payload)
            .map_err(|err| format!("Falha ao consultar o assistente: {err:?}"))?;
        let reply = JsFuture::from(js_sys::Promise::resolve(&returned))
            .await
            .map_err(|err| format!("Falha ao consultar o assistente: {err:?}"))?;

        if let Some(text) = reply.as_string() {
            return Ok(strip_markdown(&text));
        }

        let value: serde_json::Value = from_value(reply)
            .map_err(|err| format!("Resposta do assistente ilegível: {err}"))?;
        parse_answer_value(&value)
            .map(|answer| strip_markdown(&answer))
            .map_err(|err| format!("Resposta do assistente inválida: {err}"))
    }

    fn render_sidebar(role: Role, collapsed: UseStateHandle<bool>) -> Html {
        let is_collapsed = *collapsed;
        let on_toggle = Callback::from(move |_| collapsed.set(!is_collapsed));

        html! {
            <nav class="clinic-sidebar" aria-label="Navegação principal">
                <button
                    type="button"
                    class="sidebar-toggle"
                    onclick={on_toggle}
                    aria-expanded={(!is_collapsed).to_string()}
                >
                    { if is_collapsed { "»" } else { "«" } }
                </button>
                <span class="sidebar-role">{ role.label() }</span>
                <ul>
                    {
                        for navigation_for(role).into_iter().map(|item| html! {
                            <li><a href={item.path} title={item.label}>{ item.label }</a></li>
                        })
                    }
                </ul>
            </nav>
        }
    }

    fn render_mode_tabs(mode: UseStateHandle<ReportMode>) -> Html {
        html! {
            <div class="mode-tabs" role="tablist" aria-label="Modo de exibição">
                {
                    for ReportMode::ALL.into_iter().map(|option| {
                        let is_active = *mode == option;
                        let mode = mode.clone();
                        let onclick = Callback::from(move |_| mode.set(option));
                        html! {
                            <button
                                type="button"
                                role="tab"
                                aria-selected={is_active.to_string()}
                                class={classes!("mode-tab", is_active.then_some("is-active"))}
                                onclick={onclick}
                            >
                                { option.label() }
                            </button>
                        }
                    })
                }
            </div>
        }
    }

    fn render_mode(mode: ReportMode, summary: &ReportSummary) -> Html {
        match mode {
            ReportMode::Summary => render_summary(summary),
            ReportMode::Pie => render_pie(summary),
            ReportMode::Monthly => render_monthly(summary),
            ReportMode::Professional => render_professionals(summary),
        }
    }

    fn render_summary(summary: &ReportSummary) -> Html {
        let counts = summary.attendance.counts;
        let rates = summary.attendance.rates;

        html! {
            <div class="summary-grid">
                { render_rate_card("Presenças", counts.present, rates.present, "present") }
                { render_rate_card("Faltas", counts.absent, rates.absent, "absent") }
                { render_rate_card("Não informado", counts.unknown, rates.unknown, "unknown") }
                <section class="report-card">
                    <h3>{"Indicadores mais recentes"}</h3>
                    { render_indicators(&summary.latest_indicators) }
                </section>
                <section class="report-card wide">
                    <h3>{"Evolução das metas"}</h3>
                    { render_goals(&summary.goal_series) }
                </section>
            </div>
        }
    }

    fn render_rate_card(title: &str, count: u32, rate: f64, level: &'static str) -> Html {
        html! {
            <section class="report-card rate-card" data-level={level}>
                <h3>{ title }</h3>
                <span class="rate-value">{ format!("{}%", format_numeric(rate)) }</span>
                <span class="rate-count">{ format!("{count} atendimento(s)") }</span>
            </section>
        }
    }

    fn render_indicators(points: &[IndicatorPoint]) -> Html {
        if points.is_empty() {
            return html! { <p class="report-empty">{ NO_DATA_MARKER }</p> };
        }
        html! {
            <ul class="indicator-list">
                {
                    for points.iter().map(|point| html! {
                        <li>
                            <span class="indicator-name">{ point.name.clone() }</span>
                            <span class="indicator-bar"><span style={format!("width: {}", bar_width(point.value))}></span></span>
                            <span class="indicator-value">{ format!("{}%", format_numeric(point.value)) }</span>
                        </li>
                    })
                }
            </ul>
        }
    }

    fn render_goals(series: &[GoalSeries]) -> Html {
        if series.is_empty() {
            return html! { <p class="report-empty">{ NO_DATA_MARKER }</p> };
        }
        html! {
            <div class="goal-list">
                {
                    for series.iter().map(|goal| html! {
                        <article class="goal-series">
                            <h4>{ goal.goal_description.clone() }</h4>
                            <table>
                                <thead><tr><th>{"Data"}</th><th>{"Item"}</th><th>{"Valor"}</th></tr></thead>
                                <tbody>
                                    {
                                        for goal.points.iter().map(|point| html! {
                                            <tr>
                                                <td>{ format_day(point.date) }</td>
                                                <td>{ point.label.clone() }</td>
                                                <td>{ format!("{}%", format_numeric(point.value)) }</td>
                                            </tr>
                                        })
                                    }
                                </tbody>
                            </table>
                        </article>
                    })
                }
            </div>
        }
    }

    fn render_pie(summary: &ReportSummary) -> Html {
        let attendance = &summary.attendance;
        if attendance.counts.total == 0 {
            return html! { <p class="report-empty">{ NO_DATA_MARKER }</p> };
        }

        html! {
            <div class="pie-layout">
                <div
                    class="attendance-pie"
                    role="img"
                    aria-label="Distribuição de presenças"
                    style={format!("background: {}", pie_gradient(&attendance.rates))}
                ></div>
                { render_legend(&attendance.counts, &attendance.rates) }
                <ul class="type-list">
                    {
                        for attendance.by_type.iter().map(|kind| html! {
                            <li>
                                <span>{ kind.attendance_type.clone() }</span>
                                <span>{ format!("{} atendimento(s), {}% presença", kind.counts.total, format_numeric(kind.rates.present)) }</span>
                            </li>
                        })
                    }
                </ul>
            </div>
        }
    }

    fn render_legend(counts: &AttendanceCounts, rates: &AttendanceRates) -> Html {
        let rows = [
            ("Presenças", counts.present, rates.present, "present"),
            ("Faltas", counts.absent, rates.absent, "absent"),
            ("Não informado", counts.unknown, rates.unknown, "unknown"),
        ];
        html! {
            <ul class="pie-legend">
                {
                    for rows.into_iter().map(|(label, count, rate, level)| html! {
                        <li data-level={level}>
                            <span class="legend-swatch"></span>
                            { format!("{label}: {count} ({}%)", format_numeric(rate)) }
                        </li>
                    })
                }
            </ul>
        }
    }

    fn render_monthly(summary: &ReportSummary) -> Html {
        let months = &summary.attendance.by_month;
        if months.is_empty() {
            return html! { <p class="report-empty">{ NO_DATA_MARKER }</p> };
        }
        html! {
            <ul class="month-bars">
                {
                    for months.iter().map(|month| html! {
                        <li>
                            <span class="month-label">{ month.month.to_string() }</span>
                            <span class="month-bar">
                                <span class="present" style={format!("width: {}", bar_width(month.rates.present))}></span>
                                <span class="absent" style={format!("width: {}", bar_width(month.rates.absent))}></span>
                            </span>
                            <span class="month-value">
                                { format!("{}% presença ({}/{})", format_numeric(month.rates.present), month.counts.present, month.counts.total) }
                            </span>
                        </li>
                    })
                }
            </ul>
        }
    }

    fn render_professionals(summary: &ReportSummary) -> Html {
        let professionals = &summary.attendance.by_professional;
        if professionals.is_empty() {
            return html! { <p class="report-empty">{ NO_DATA_MARKER }</p> };
        }
        html! {
            <table class="professional-table">
                <thead>
                    <tr>
                        <th>{"Profissional"}</th>
                        <th>{"Total"}</th>
                        <th>{"Presenças"}</th>
                        <th>{"Faltas"}</th>
                        <th>{"Não informado"}</th>
                        <th>{"Taxa de presença"}</th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for professionals.iter().map(|row| html! {
                            <tr>
                                <td>{ row.display_name().to_string() }</td>
                                <td>{ row.counts.total.to_string() }</td>
                                <td>{ row.counts.present.to_string() }</td>
                                <td>{ row.counts.absent.to_string() }</td>
                                <td>{ row.counts.unknown.to_string() }</td>
                                <td>{ format!("{}%", format_numeric(row.rates.present)) }</td>
                            </tr>
                        })
                    }
                </tbody>
            </table>
        }
    }

    fn format_day(date: Option<NaiveDateTime>) -> String {
        date.map(|dt| dt.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "--".to_string())
    }

    fn is_absent(value: &JsValue) -> bool {
        value.is_undefined() || value.is_null()
    }

    #[wasm_bindgen]
    pub fn mount_report_view(
        selector: &str,
        report: JsValue,
        appointments: JsValue,
        options: JsValue,
        ask: Option<js_sys::Function>,
    ) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Document is not accessible"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches the selector"))?;

        let report_value: serde_json::Value = from_value(report)?;
        let report = parse_report_value(&report_value)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let appointments = if is_absent(&appointments) {
            Vec::new()
        } else {
            let value: serde_json::Value = from_value(appointments)?;
            parse_appointments_value(&value).map_err(|err| JsValue::from_str(&err.to_string()))?
        };

        let options: MountOptions = if is_absent(&options) {
            MountOptions::default()
        } else {
            from_value(options)?
        };
        let role = options.role().unwrap_or_else(|err| {
            console::warn_1(&JsValue::from_str(&format!(
                "Unrecognised user type, showing reception view: {err}"
            )));
            Role::Reception
        });

        let props = ReportViewProps {
            report,
            appointments,
            role,
            initial_window: options.initial_window(Local::now().date_naive()),
            config: options.config.clone().unwrap_or_default(),
            ask,
        };

        yew::Renderer::<ReportView>::with_root_and_props(target, props).render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_report_view;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_report_view(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: wasm_bindgen::JsValue,
    _: wasm_bindgen::JsValue,
    _: Option<js_sys::Function>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "clinic-ui only supports the wasm32 target",
    ))
}
