//! Per-type markup for field descriptors.
//!
//! Each renderer returns the lines of its control block; [`render_field`]
//! wraps them with the question chrome and trailing extras. Conditional and
//! validation data attributes go on exactly one input per field.

use crate::markup::{attr, join_attrs, num, spaced};
use crate::schema::{Choice, Field, FieldKind, FollowUp, FollowUpKind, Section};

const DEFAULT_TEXTAREA_ROWS: u32 = 4;
const DEFAULT_STAR_MAX: i64 = 5;
const DEFAULT_LIKERT: (i64, i64) = (1, 10);
const DEFAULT_RANGE: (f64, f64, f64) = (0.0, 100.0, 1.0);
const DEFAULT_IMPORTANCE: (f64, f64, f64) = (1.0, 10.0, 5.0);

pub fn render_section(section: &Section) -> String {
    let mut html = vec![
        "<div class=\"section\">".to_string(),
        format!("  <h2 class=\"section-header\">{}</h2>", section.name),
    ];
    html.extend(section.questions.iter().map(render_field));
    html.push("</div>".to_string());
    html.join("\n")
}

pub fn render_field(field: &Field) -> String {
    let mut html = vec![
        format!(
            "<div class=\"question\" data-question=\"{}\">",
            attr(&field.id)
        ),
        format!("  <div class=\"question-title\">{}</div>", field.title),
    ];
    if let Some(context) = field.context.as_deref().filter(|c| !c.is_empty()) {
        html.push(format!("  <div class=\"context\">{context}</div>"));
    }

    let data = data_attributes(field);
    html.extend(match field.kind {
        FieldKind::Text => text_input(field, &data),
        FieldKind::Radio => radio_group(field, &data),
        FieldKind::Checkbox => checkbox_group(field, &data),
        FieldKind::Number => number_input(field, &data),
        FieldKind::Textarea => textarea(field, &data),
        FieldKind::Ranking => ranking(field, &data),
        FieldKind::StarRating => star_rating(field, &data),
        FieldKind::Likert => likert(field, &data),
        FieldKind::Range => range_slider(field, &data),
        FieldKind::Importance => importance_gauge(field, &data),
    });
    html.extend(extras(field));
    for (idx, follow_up) in field.follow_ups.iter().enumerate() {
        html.extend(follow_up_block(&field.id, idx, follow_up));
    }
    html.push("</div>".to_string());
    html.join("\n")
}

/// `data-*` attributes carrying validation rules and conditional
/// expressions for the client scripts.
pub fn data_attributes(field: &Field) -> String {
    let mut attrs = Vec::new();
    if let Some(rules) = field.validation.as_ref().filter(|v| has_rules(v)) {
        attrs.push(format!(
            "data-validation=\"{}\"",
            attr(&serde_json::to_string(rules).unwrap_or_default())
        ));
    }
    for (name, expr) in [
        ("data-show-if", &field.show_if),
        ("data-required-if", &field.required_if),
        ("data-disabled-if", &field.disabled_if),
    ] {
        if let Some(expr) = expr.as_deref().filter(|e| !e.is_empty()) {
            attrs.push(format!("{name}=\"{}\"", attr(expr)));
        }
    }
    attrs.join(" ")
}

fn has_rules(rules: &serde_json::Value) -> bool {
    match rules {
        serde_json::Value::Null => false,
        serde_json::Value::Object(map) => !map.is_empty(),
        serde_json::Value::Array(list) => !list.is_empty(),
        _ => true,
    }
}

fn placeholder(field: &Field) -> std::borrow::Cow<'_, str> {
    attr(field.placeholder.as_deref().unwrap_or(""))
}

fn sr_label(field: &Field) -> String {
    format!(
        "  <label for=\"{}\" class=\"sr-only\">{}</label>",
        attr(&field.id),
        field.title
    )
}

fn text_input(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    vec![
        sr_label(field),
        format!(
            "  <input type=\"text\" id=\"{id}\" name=\"{id}\" placeholder=\"{}\"{} aria-label=\"{}\">",
            placeholder(field),
            spaced(data),
            attr(&field.title)
        ),
    ]
}

fn number_input(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let bounds: String = [("min", field.min), ("max", field.max)]
        .into_iter()
        .filter_map(|(name, v)| v.map(|v| format!(" {name}=\"{}\"", num(v))))
        .collect();
    vec![
        sr_label(field),
        format!(
            "  <input type=\"number\" id=\"{id}\" name=\"{id}\" placeholder=\"{}\"{bounds}{} aria-label=\"{}\">",
            placeholder(field),
            spaced(data),
            attr(&field.title)
        ),
    ]
}

fn textarea(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    vec![
        sr_label(field),
        format!(
            "  <textarea id=\"{id}\" name=\"{id}\" rows=\"{}\" placeholder=\"{}\"{} aria-label=\"{}\"></textarea>",
            field.rows.unwrap_or(DEFAULT_TEXTAREA_ROWS),
            placeholder(field),
            spaced(data),
            attr(&field.title)
        ),
    ]
}

fn radio_group(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let first_attrs = join_attrs([format!("id=\"{id}\"").as_str(), data]);
    let mut html = Vec::new();
    for (idx, option) in field.options.iter().enumerate() {
        let class = if option.recommended {
            "option recommended"
        } else {
            "option"
        };
        let extra = if idx == 0 { first_attrs.as_str() } else { "" };
        html.push(format!("  <div class=\"{class}\">"));
        html.push("    <label class=\"option-label\">".to_string());
        html.push(format!(
            "      <input type=\"radio\" name=\"{id}\" value=\"{}\"{}>",
            attr(&option.value),
            spaced(extra)
        ));
        html.push("      <div>".to_string());
        html.push(format!("        <strong>{}</strong>", option.label));
        if option.recommended {
            html.push("        <span class=\"recommended-badge\">RECOMMENDED</span>".to_string());
        }
        html.extend(option_details(option));
        html.push("      </div>".to_string());
        html.push("    </label>".to_string());
        html.push("  </div>".to_string());
    }
    html
}

fn option_details(option: &Choice) -> Vec<String> {
    let mut html = Vec::new();
    if let Some(desc) = option.description.as_deref().filter(|d| !d.is_empty()) {
        html.push(format!("        <div>{desc}</div>"));
    }
    if !option.pros.is_empty() || !option.cons.is_empty() {
        html.push("        <div class=\"pros-cons\">".to_string());
        for (class, heading, items) in [
            ("pros", "Pros", &option.pros),
            ("cons", "Cons", &option.cons),
        ] {
            if items.is_empty() {
                continue;
            }
            html.push(format!("          <div class=\"{class}\"><strong>{heading}:</strong>"));
            html.push("            <ul>".to_string());
            html.extend(items.iter().map(|item| format!("              <li>{item}</li>")));
            html.push("            </ul>".to_string());
            html.push("          </div>".to_string());
        }
        html.push("        </div>".to_string());
    }
    if let Some(note) = option.implementation.as_deref().filter(|n| !n.is_empty()) {
        html.push(format!(
            "        <div class=\"implementation\"><strong>Implementation:</strong> {note}</div>"
        ));
    }
    html
}

fn checkbox_group(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let first_attrs = join_attrs([format!("id=\"{id}\"").as_str(), data]);
    let mut html = vec!["  <div class=\"checkbox-group\">".to_string()];
    for (idx, option) in field.options.iter().enumerate() {
        let value = attr(&option.value);
        let extra = if idx == 0 { first_attrs.as_str() } else { "" };
        html.push("    <label>".to_string());
        html.push(format!(
            "      <input type=\"checkbox\" name=\"{id}-{value}\" value=\"{value}\"{}>",
            spaced(extra)
        ));
        html.push(format!("      <strong>{}</strong>", option.label));
        if let Some(desc) = option.description.as_deref().filter(|d| !d.is_empty()) {
            html.push(format!("      <div>{desc}</div>"));
        }
        html.push("    </label>".to_string());
    }
    html.push("  </div>".to_string());
    html
}

fn ranking(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let count = field.options.len();
    let mut html = vec!["  <div class=\"ranking-list\">".to_string()];
    for (idx, option) in field.options.iter().enumerate() {
        let extra = if idx == 0 { data } else { "" };
        html.push("    <div class=\"ranking-item\">".to_string());
        html.push(format!(
            "      <input type=\"number\" name=\"{id}-{}\" min=\"1\" max=\"{count}\" value=\"{}\"{}>",
            attr(&option.value),
            idx + 1,
            spaced(extra)
        ));
        html.push(format!("      <span>{}</span>", option.label));
        html.push("    </div>".to_string());
    }
    html.push("  </div>".to_string());
    html
}

fn star_rating(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let max = field.max.map(|m| m as i64).unwrap_or(DEFAULT_STAR_MAX);
    let mut html = vec![
        "  <fieldset class=\"star-rating\">".to_string(),
        format!("    <legend class=\"sr-only\">{}</legend>", field.title),
    ];
    html.extend(scale_labels("rating", field.labels.min.as_deref(), field.labels.max.as_deref()));
    html.push("    <div class=\"stars\">".to_string());
    for value in (1..=max).rev() {
        let extra = if value == max { data } else { "" };
        let noun = if value == 1 { "star" } else { "stars" };
        html.push(format!(
            "      <input type=\"radio\" id=\"{id}-star{value}\" name=\"{id}\" value=\"{value}\"{}>",
            spaced(extra)
        ));
        html.push(format!(
            "      <label for=\"{id}-star{value}\" title=\"{value} {noun}\">★</label>"
        ));
    }
    html.push("    </div>".to_string());
    html.push("  </fieldset>".to_string());
    html
}

fn likert(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let min = field.min.map(|m| m as i64).unwrap_or(DEFAULT_LIKERT.0);
    let max = field.max.map(|m| m as i64).unwrap_or(DEFAULT_LIKERT.1);
    let mut html = vec![
        "  <fieldset class=\"likert-scale\">".to_string(),
        format!("    <legend class=\"sr-only\">{}</legend>", field.title),
    ];
    html.extend(scale_labels("scale", field.min_label.as_deref(), field.max_label.as_deref()));
    html.push("    <div class=\"scale-options\">".to_string());
    for value in min..=max {
        let extra = if value == min { data } else { "" };
        html.push("      <label class=\"scale-option\">".to_string());
        html.push(format!(
            "        <input type=\"radio\" id=\"{id}-{value}\" name=\"{id}\" value=\"{value}\"{}>",
            spaced(extra)
        ));
        html.push(format!("        <span>{value}</span>"));
        html.push("      </label>".to_string());
    }
    html.push("    </div>".to_string());
    html.push("  </fieldset>".to_string());
    html
}

fn scale_labels(prefix: &str, min: Option<&str>, max: Option<&str>) -> Vec<String> {
    if min.is_none() && max.is_none() {
        return Vec::new();
    }
    vec![
        format!("    <div class=\"{prefix}-labels\">"),
        format!(
            "      <span class=\"{prefix}-label-min\">{}</span>",
            min.unwrap_or("")
        ),
        format!(
            "      <span class=\"{prefix}-label-max\">{}</span>",
            max.unwrap_or("")
        ),
        "    </div>".to_string(),
    ]
}

/// Midpoint of `[min, max]` snapped down onto the step grid anchored at
/// `min`.
pub fn slider_default(min: f64, max: f64, step: f64) -> f64 {
    let mid = (min + max) / 2.0;
    if !(step.is_finite() && step > 0.0) {
        return mid;
    }
    let steps = ((mid - min) / step + 1e-9).floor();
    let snapped = min + steps * step;
    (snapped * 1e9).round() / 1e9
}

fn range_slider(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let (min, max, step) = (
        field.min.unwrap_or(DEFAULT_RANGE.0),
        field.max.unwrap_or(DEFAULT_RANGE.1),
        field.step.unwrap_or(DEFAULT_RANGE.2),
    );
    let value = field.default.unwrap_or_else(|| slider_default(min, max, step));
    let unit = field.unit.as_deref().unwrap_or("");

    let mut html = vec![
        "  <div class=\"range-input\">".to_string(),
        sr_label(field),
        format!(
            "    <input type=\"range\" id=\"{id}\" name=\"{id}\" min=\"{}\" max=\"{}\" step=\"{}\" value=\"{}\" data-unit=\"{}\"{}>",
            num(min),
            num(max),
            num(step),
            num(value),
            attr(unit),
            spaced(data)
        ),
    ];
    if field.show_value.unwrap_or(true) {
        html.push(format!(
            "    <output for=\"{id}\" class=\"range-value\" aria-live=\"polite\">{}{unit}</output>",
            num(value)
        ));
    }
    html.push("  </div>".to_string());
    html
}

/// Fill width of an importance gauge, in percent.
pub fn gauge_percent(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min) * 100.0
}

fn importance_gauge(field: &Field, data: &str) -> Vec<String> {
    let id = attr(&field.id);
    let (min, max, value) = (
        field.min.unwrap_or(DEFAULT_IMPORTANCE.0),
        field.max.unwrap_or(DEFAULT_IMPORTANCE.1),
        field.default.unwrap_or(DEFAULT_IMPORTANCE.2),
    );
    let percent = gauge_percent(value, min, max);
    vec![
        "  <div class=\"importance-gauge\">".to_string(),
        "    <div class=\"gauge-track\">".to_string(),
        format!(
            "      <div class=\"gauge-fill\" data-value=\"{}\" style=\"width: {}%\"></div>",
            num(value),
            num((percent * 100.0).round() / 100.0)
        ),
        "    </div>".to_string(),
        sr_label(field),
        format!(
            "    <input type=\"range\" id=\"{id}\" name=\"{id}\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{}\" class=\"gauge-input\"{}>",
            num(min),
            num(max),
            num(value),
            spaced(data)
        ),
        "    <div class=\"gauge-labels\">".to_string(),
        format!(
            "      <span>{}</span>",
            field.min_label.as_deref().unwrap_or("Low")
        ),
        format!(
            "      <span class=\"gauge-current-value\">{}</span>",
            num(value)
        ),
        format!(
            "      <span>{}</span>",
            field.max_label.as_deref().unwrap_or("Critical")
        ),
        "    </div>".to_string(),
        "  </div>".to_string(),
    ]
}

fn extras(field: &Field) -> Vec<String> {
    let id = attr(&field.id);
    let mut html = Vec::new();
    if let Some(help) = field.help_text.as_deref().filter(|h| !h.is_empty()) {
        html.push(format!("  <div class=\"help-text\">{help}</div>"));
    }
    if let Some(tip) = field.tooltip.as_deref().filter(|t| !t.is_empty()) {
        html.push(format!(
            "  <span class=\"tooltip\" title=\"{}\">?</span>",
            attr(tip)
        ));
    }
    if field.reasoning {
        html.push("  <label class=\"reasoning-label\">Your reasoning:</label>".to_string());
        html.push(format!(
            "  <textarea class=\"reasoning\" name=\"{id}-reasoning\" rows=\"3\" placeholder=\"Explain your choice...\"></textarea>"
        ));
    }
    if field.comments {
        html.push("  <label class=\"comments-label\">Comments / Additional thoughts:</label>".to_string());
        html.push(format!(
            "  <textarea class=\"comments\" name=\"{id}-comments\" rows=\"3\" placeholder=\"Any additional comments...\"></textarea>"
        ));
    }
    html
}

fn follow_up_block(field_id: &str, idx: usize, follow_up: &FollowUp) -> Vec<String> {
    let name = format!("{}-followup-{idx}", attr(field_id));
    let placeholder = attr(follow_up.placeholder.as_deref().unwrap_or(""));
    let mut html = vec![
        "  <div class=\"follow-up\">".to_string(),
        format!("    <div class=\"follow-up-title\">{}</div>", follow_up.title),
    ];
    match follow_up.kind {
        FollowUpKind::Text => html.push(format!(
            "    <input type=\"text\" name=\"{name}\" placeholder=\"{placeholder}\">"
        )),
        FollowUpKind::Number => html.push(format!(
            "    <input type=\"number\" name=\"{name}\" placeholder=\"{placeholder}\">"
        )),
        FollowUpKind::Textarea => html.push(format!(
            "    <textarea name=\"{name}\" rows=\"3\" placeholder=\"{placeholder}\"></textarea>"
        )),
        FollowUpKind::Radio => {
            for option in &follow_up.options {
                html.push(format!(
                    "    <label><input type=\"radio\" name=\"{name}\" value=\"{}\"> {}</label><br>",
                    attr(&option.value),
                    option.label
                ));
            }
        }
    }
    html.push("  </div>".to_string());
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_schema;

    fn field(yaml: &str) -> Field {
        let doc = format!(
            "title: T\nsections:\n  - name: S\n    questions:\n      - {}\n",
            yaml.trim().replace('\n', "\n        ")
        );
        let mut schema = parse_schema(&doc).unwrap();
        schema.sections.remove(0).questions.remove(0)
    }

    #[test]
    fn single_recommended_badge_on_second_option() {
        let html = render_field(&field(
            "id: db\ntitle: Database\ntype: radio\noptions:\n  - {value: a, label: A}\n  - {value: b, label: B, recommended: true}\n  - {value: c, label: C}",
        ));
        assert_eq!(html.matches("recommended-badge").count(), 1);
        let badge = html.find("recommended-badge").unwrap();
        assert!(html.find("value=\"b\"").unwrap() < badge);
        assert!(badge < html.find("value=\"c\"").unwrap());
        assert_eq!(html.matches("class=\"option recommended\"").count(), 1);
    }

    #[test]
    fn radio_first_input_carries_id_and_conditions() {
        let html = render_field(&field(
            "id: db\ntitle: Database\ntype: radio\nshow_if: \"env == 'prod'\"\noptions:\n  - {value: a, label: A}\n  - {value: b, label: B}",
        ));
        assert!(html.contains(
            "<input type=\"radio\" name=\"db\" value=\"a\" id=\"db\" data-show-if=\"env == &#39;prod&#39;\">"
        ));
        assert!(html.contains("<input type=\"radio\" name=\"db\" value=\"b\">"));
        assert_eq!(html.matches("data-show-if").count(), 1);
    }

    #[test]
    fn pros_cons_and_implementation() {
        let html = render_field(&field(
            "id: q\ntitle: Q\ntype: radio\noptions:\n  - {value: a, label: A, description: Fast, pros: [cheap], cons: [risky], implementation: one day}",
        ));
        assert!(html.contains("<div>Fast</div>"));
        assert!(html.contains("<li>cheap</li>"));
        assert!(html.contains("<div class=\"cons\">"));
        assert!(html.contains("<strong>Implementation:</strong> one day"));
    }

    #[test]
    fn checkbox_names_combine_id_and_value() {
        let html = render_field(&field(
            "id: langs\ntitle: Languages\ntype: checkbox\noptions:\n  - {value: rust, label: Rust}\n  - {value: 3, label: Three}",
        ));
        assert!(html.contains("class=\"checkbox-group\""));
        assert!(html.contains("name=\"langs-rust\" value=\"rust\" id=\"langs\">"));
        assert!(html.contains("name=\"langs-3\" value=\"3\">"));
    }

    #[test]
    fn text_number_and_textarea_controls() {
        let html = render_field(&field("id: n\ntitle: Name\ntype: text\nplaceholder: Jane"));
        assert!(html.contains("<label for=\"n\" class=\"sr-only\">Name</label>"));
        assert!(html.contains("placeholder=\"Jane\""));

        let html = render_field(&field("id: n\ntitle: Count\ntype: number\nmin: 1"));
        assert!(html.contains(" min=\"1\""));
        assert!(!html.contains(" max="));

        let html = render_field(&field("id: n\ntitle: Notes\ntype: textarea"));
        assert!(html.contains("rows=\"4\""));
        let html = render_field(&field("id: n\ntitle: Notes\ntype: textarea\nrows: 8"));
        assert!(html.contains("rows=\"8\""));
    }

    #[test]
    fn ranking_positions_follow_option_order() {
        let html = render_field(&field(
            "id: r\ntitle: Rank\ntype: ranking\noptions:\n  - {value: x, label: X}\n  - {value: y, label: Y}\n  - {value: z, label: Z}",
        ));
        assert!(html.contains("name=\"r-x\" min=\"1\" max=\"3\" value=\"1\""));
        assert!(html.contains("name=\"r-z\" min=\"1\" max=\"3\" value=\"3\""));
    }

    #[test]
    fn stars_descend_with_conditions_on_highest() {
        let html = render_field(&field(
            "id: s\ntitle: Stars\ntype: star-rating\nrequired_if: \"x == 1\"\nlabels: {min: Poor, max: Great}",
        ));
        let positions: Vec<usize> = (1..=5)
            .map(|i| html.find(&format!("id=\"s-star{i}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] > w[1]));
        assert!(html.contains("value=\"5\" data-required-if=\"x == 1\">"));
        assert_eq!(html.matches("data-required-if").count(), 1);
        assert!(html.contains("title=\"1 star\""));
        assert!(html.contains("<span class=\"rating-label-max\">Great</span>"));
    }

    #[test]
    fn likert_ascends_with_conditions_on_lowest() {
        let html = render_field(&field(
            "id: l\ntitle: Agree?\ntype: likert\nmin: 1\nmax: 5\ndisabled_if: \"off == yes\"\nmin_label: No\nmax_label: Yes",
        ));
        let positions: Vec<usize> = (1..=5)
            .map(|i| html.find(&format!("id=\"l-{i}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(html.contains("value=\"1\" data-disabled-if=\"off == yes\">"));
        assert!(!html.contains("id=\"l-6\""));
        assert!(html.contains("scale-label-min"));
    }

    #[test]
    fn likert_defaults_to_ten_points() {
        let html = render_field(&field("id: l\ntitle: Agree?\ntype: likert"));
        assert!(html.contains("id=\"l-10\""));
        assert!(!html.contains("labels\""));
    }

    #[test]
    fn slider_default_snaps_to_grid() {
        assert_eq!(slider_default(0.0, 100.0, 10.0), 50.0);
        assert_eq!(slider_default(1.0, 10.0, 1.0), 5.0);
        assert_eq!(slider_default(0.0, 10.0, 3.0), 3.0);
        assert_eq!(slider_default(0.0, 1.0, 0.1), 0.5);
    }

    #[test]
    fn range_renders_default_and_readout() {
        let html = render_field(&field(
            "id: budget\ntitle: Budget\ntype: range\nmin: 0\nmax: 100\nstep: 10\nunit: \"%\"",
        ));
        assert!(html.contains("step=\"10\" value=\"50\""));
        assert!(html.contains("aria-live=\"polite\">50%</output>"));

        let html = render_field(&field(
            "id: budget\ntitle: Budget\ntype: range\ndefault: 20\nshow_value: false",
        ));
        assert!(html.contains("value=\"20\""));
        assert!(!html.contains("<output"));
    }

    #[test]
    fn importance_gauge_width() {
        assert_eq!(gauge_percent(5.0, 1.0, 10.0), 4.0 / 9.0 * 100.0);
        assert_eq!(gauge_percent(3.0, 3.0, 3.0), 0.0);
        let html = render_field(&field("id: i\ntitle: Impact\ntype: importance\nmin: 0\nmax: 10\ndefault: 5"));
        assert!(html.contains("style=\"width: 50%\""));
        assert!(html.contains("<span>Low</span>"));
        assert!(html.contains("<span>Critical</span>"));
    }

    #[test]
    fn validation_rules_are_embedded_as_escaped_json() {
        let html = render_field(&field(
            "id: e\ntitle: Email\ntype: text\nvalidation: {required: true, preset: email}",
        ));
        assert!(html.contains("data-validation=\"{&quot;"));
        assert!(html.contains("&quot;preset&quot;:&quot;email&quot;"));
    }

    #[test]
    fn extras_follow_the_control_in_order() {
        let html = render_field(&field(
            "id: q\ntitle: Q\ntype: text\nhelp_text: Be brief\ntooltip: Shown on hover\nreasoning: true\ncomments: true\nfollow_ups:\n  - {title: Why, type: textarea}\n  - {title: Pick, type: radio, options: [{value: y, label: Yes}]}",
        ));
        let order = [
            "type=\"text\"",
            "help-text",
            "class=\"tooltip\"",
            "name=\"q-reasoning\"",
            "name=\"q-comments\"",
            "name=\"q-followup-0\"",
            "name=\"q-followup-1\" value=\"y\"> Yes</label><br>",
        ];
        let positions: Vec<usize> = order.iter().map(|s| html.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn section_wraps_fields() {
        let schema = parse_schema(
            "title: T\nsections:\n  - name: Intro\n    questions:\n      - {id: a, title: A, type: text}\n",
        )
        .unwrap();
        let html = render_section(&schema.sections[0]);
        assert!(html.starts_with("<div class=\"section\">\n  <h2 class=\"section-header\">Intro</h2>"));
        assert!(html.ends_with("</div>\n</div>"));
    }

    #[test]
    fn titles_keep_inline_markup() {
        let html = render_field(&field("id: q\ntitle: \"Use <code>cargo</code>?\"\ntype: text"));
        assert!(html.contains("<div class=\"question-title\">Use <code>cargo</code>?</div>"));
        assert!(html.contains("aria-label=\"Use &lt;code&gt;cargo&lt;/code&gt;?\""));
    }
}
