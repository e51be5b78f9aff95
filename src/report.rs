//! Rendering of command results.
//!
//! Every command yields a [`CommandResult`]: explanatory text for a terminal
//! and a one-line JSON document for scripts. Big integers are emitted as
//! decimal strings in JSON so no consumer truncates them.

use num_bigint::BigInt;
use serde::Serialize;

use crate::interpolation::least_squares;
use crate::point::{Point, PointSet};
use crate::reconstruct::{Diagnostic, SearchOutcome};
use crate::solve::SolveReport;

const RULE: &str = "============================================================";

/// Result from a command, separating readable output from the JSON result
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Human-readable output with decoded points and per-step details
    pub output: String,
    /// Compact JSON result
    pub result: String,
}

#[derive(Serialize)]
struct PointJson {
    x: String,
    y: String,
}

impl From<&Point> for PointJson {
    fn from(p: &Point) -> Self {
        Self {
            x: p.x.to_string(),
            y: p.y.to_string(),
        }
    }
}

#[derive(Serialize)]
struct SuspectJson {
    x: String,
    y: String,
    failures: usize,
}

#[derive(Serialize)]
struct MethodJson {
    method: String,
    coefficients: Vec<String>,
}

#[derive(Serialize)]
struct SolveJson {
    record: String,
    n: usize,
    k: usize,
    secret: String,
    coefficients: Vec<String>,
    methods: Vec<MethodJson>,
    mismatches: Vec<PointJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    least_squares: Option<Vec<f64>>,
}

#[derive(Serialize)]
struct RecoverJson {
    record: String,
    n: usize,
    k: usize,
    found: bool,
    /// Every point lies on the polynomial.
    exact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coefficients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subset: Option<Vec<usize>>,
    outliers: Vec<PointJson>,
    subsets_tried: usize,
    suspects: Vec<SuspectJson>,
}

fn strings(values: &[BigInt]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn suspects_json(suspects: &[(Point, usize)]) -> Vec<SuspectJson> {
    suspects
        .iter()
        .map(|(p, failures)| SuspectJson {
            x: p.x.to_string(),
            y: p.y.to_string(),
            failures: *failures,
        })
        .collect()
}

fn format_coefficients(values: &[BigInt]) -> String {
    format!("[{}]", strings(values).join(", "))
}

fn push_header(out: &mut String, record: &str, set: &PointSet) {
    out.push_str(&format!("Processing: {}\n", record));
    out.push_str(&format!("n (total points): {}\n", set.n()));
    out.push_str(&format!("k (minimum required): {}\n\n", set.k()));
    out.push_str("Decoded points (x, y):\n");
    for p in set.points() {
        out.push_str(&format!("{}\n", p));
    }
    out.push('\n');
}

fn push_suspects(out: &mut String, suspects: &[(Point, usize)]) {
    if suspects.is_empty() {
        return;
    }
    out.push_str("=== POTENTIAL INCORRECT POINTS ===\n");
    for (p, failures) in suspects {
        out.push_str(&format!("{}:{} failed {} times\n", p.x, p.y, failures));
    }
    out.push_str("===================================\n");
}

pub fn render_solve(record: &str, set: &PointSet, report: &SolveReport) -> CommandResult {
    let mut out = String::new();
    push_header(&mut out, record, set);

    out.push_str("--- Results ---\n");
    for (method, poly) in &report.by_method {
        out.push_str(&format!("{:<12} secret (a0): {}\n", method.name(), poly.secret()));
    }
    if let Some(ls) = &report.least_squares {
        match least_squares::rounded_secret(ls) {
            Some(secret) => out.push_str(&format!(
                "{:<12} secret (a0): {} (floating point, approximate)\n",
                "least-squares", secret
            )),
            None => out.push_str("least-squares secret: not finite\n"),
        }
    }

    out.push_str("\nFull coefficient arrays:\n");
    for (method, poly) in &report.by_method {
        out.push_str(&format!(
            "{:<12} {}\n",
            method.name(),
            format_coefficients(poly.coefficients())
        ));
    }
    if let Some(ls) = &report.least_squares {
        out.push_str(&format!("{:<12} {:?}\n", "least-squares", ls));
    }
    out.push_str(&format!("\nf(x) = {}\n", report.polynomial));

    if report.mismatches.is_empty() {
        out.push_str("All points lie on the polynomial.\n");
    } else {
        out.push_str("\nPoints off the polynomial:\n");
        for m in &report.mismatches {
            out.push_str(&format!(
                "Mismatch: x={} expected={} got={}\n",
                m.point.x, m.point.y, m.computed
            ));
        }
    }
    out.push_str(RULE);
    out.push('\n');

    let json = SolveJson {
        record: record.to_string(),
        n: set.n(),
        k: set.k(),
        secret: report.secret().to_string(),
        coefficients: strings(report.polynomial.coefficients()),
        methods: report
            .by_method
            .iter()
            .map(|(m, p)| MethodJson {
                method: m.name().to_string(),
                coefficients: strings(p.coefficients()),
            })
            .collect(),
        mismatches: report.mismatches.iter().map(|m| (&m.point).into()).collect(),
        least_squares: report.least_squares.clone(),
    };

    CommandResult {
        output: out,
        result: to_json(&json),
    }
}

pub fn render_recover(record: &str, set: &PointSet, outcome: &SearchOutcome) -> CommandResult {
    let mut out = String::new();
    push_header(&mut out, record, set);

    for event in outcome.diagnostics() {
        // Per-subset chatter is left to the tracing output
        if matches!(event, Diagnostic::SubsetTried { .. }) {
            continue;
        }
        out.push_str(&format!("{}\n", event));
    }

    let json = match outcome {
        SearchOutcome::Found(r) => {
            out.push_str(&format!("\n*** SECRET FOUND: {} ***\n", r.secret()));
            out.push_str(&format!(
                "Full polynomial coefficients (a0 ... a(k-1)): {}\n",
                format_coefficients(r.polynomial.coefficients())
            ));
            let xs: Vec<String> = r.subset.iter().map(|&i| set.points()[i].x.to_string()).collect();
            out.push_str(&format!("Interpolated from x = {}\n", xs.join(", ")));
            if !r.is_exact() {
                let listed: Vec<String> = r.outliers.iter().map(|p| p.to_string()).collect();
                out.push_str(&format!("Outliers: {}\n", listed.join(", ")));
                out.push_str("Best candidate only: no polynomial fits every point.\n");
            }
            push_suspects(&mut out, &r.suspects);

            RecoverJson {
                record: record.to_string(),
                n: set.n(),
                k: set.k(),
                found: true,
                exact: r.is_exact(),
                secret: Some(r.secret().to_string()),
                coefficients: Some(strings(r.polynomial.coefficients())),
                subset: Some(r.subset.clone()),
                outliers: r.outliers.iter().map(PointJson::from).collect(),
                subsets_tried: r.subsets_tried,
                suspects: suspects_json(&r.suspects),
            }
        }
        SearchOutcome::Exhausted(e) => {
            out.push_str(&format!("\nNo valid polynomial found for {}!\n", record));
            if e.truncated {
                out.push_str("(search stopped early by --max-subsets)\n");
            } else if e.ambiguous {
                out.push_str("(different polynomials fit equally well)\n");
            }
            push_suspects(&mut out, &e.suspects);

            RecoverJson {
                record: record.to_string(),
                n: set.n(),
                k: set.k(),
                found: false,
                exact: false,
                secret: None,
                coefficients: None,
                subset: None,
                outliers: Vec::new(),
                subsets_tried: e.subsets_tried,
                suspects: suspects_json(&e.suspects),
            }
        }
    };
    out.push_str(RULE);
    out.push('\n');

    CommandResult {
        output: out,
        result: to_json(&json),
    }
}

pub fn render_decode(digits: &str, base: u32, value: &BigInt) -> CommandResult {
    #[derive(Serialize)]
    struct DecodeJson<'a> {
        digits: &'a str,
        base: u32,
        value: String,
    }

    CommandResult {
        output: format!("{} (base {}) = {}\n", digits, base, value),
        result: to_json(&DecodeJson {
            digits,
            base,
            value: value.to_string(),
        }),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    // Only plain structs of strings and numbers reach here
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::{reconstruct, ReconstructOptions};
    use crate::solve::{solve, SolveOptions};

    fn reference(y3: i64) -> PointSet {
        let pts = vec![
            Point::new(1, 4),
            Point::new(2, 7),
            Point::new(3, y3),
            Point::new(6, 39),
        ];
        PointSet::new(pts, 4, 3).unwrap()
    }

    #[test]
    fn test_render_solve() {
        let set = reference(12);
        let report = solve(&set, &SolveOptions::default()).unwrap();
        let rendered = render_solve("case.json", &set, &report);

        assert!(rendered.output.contains("Processing: case.json"));
        assert!(rendered.output.contains("(6, 39)"));
        assert!(rendered.output.contains("[3, 0, 1]"));

        let json: serde_json::Value = serde_json::from_str(&rendered.result).unwrap();
        assert_eq!(json["secret"], "3");
        assert_eq!(json["coefficients"], serde_json::json!(["3", "0", "1"]));
        assert_eq!(json["methods"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_render_recover_with_outlier() {
        let set = reference(13);
        let outcome = reconstruct(&set, ReconstructOptions::default());
        let rendered = render_recover("bad.json", &set, &outcome);

        assert!(rendered.output.contains("*** SECRET FOUND: 3 ***"));
        assert!(rendered.output.contains("POTENTIAL INCORRECT POINTS"));
        assert!(rendered.output.contains("3:13 failed 1 times"));
        assert!(rendered.output.contains("Best candidate only"));

        let json: serde_json::Value = serde_json::from_str(&rendered.result).unwrap();
        assert_eq!(json["found"], true);
        assert_eq!(json["exact"], false);
        assert_eq!(json["outliers"][0]["y"], "13");
    }

    #[test]
    fn test_render_recover_failure() {
        let set = reference(13);
        let options = ReconstructOptions {
            strict: true,
            ..Default::default()
        };
        let outcome = reconstruct(&set, options);
        let rendered = render_recover("bad.json", &set, &outcome);

        assert!(rendered.output.contains("No valid polynomial found for bad.json!"));
        let json: serde_json::Value = serde_json::from_str(&rendered.result).unwrap();
        assert_eq!(json["found"], false);
        assert!(json.get("secret").is_none());
        assert_eq!(json["suspects"][0]["failures"], 1);
    }

    #[test]
    fn test_render_decode() {
        let rendered = render_decode("213", 4, &BigInt::from(39));
        assert_eq!(rendered.output, "213 (base 4) = 39\n");
        assert_eq!(rendered.result, r#"{"digits":"213","base":4,"value":"39"}"#);
    }
}
