use std::error::Error;
use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mathbox::{OutputTarget, Settings, TypesetContext, typeset};
use serde::Deserialize;

const CASES: &str = r#"[
    {"name": "Fractions", "tex": "\\frac{a+b}{c} + \\dfrac{1}{1+\\frac{1}{x}}"},
    {"name": "Scripts", "tex": "x_i^2 + e^{-x^2} + a_{n+1}^{(k)}"},
    {"name": "SqrtRoot", "tex": "\\sqrt{x^2+1} + \\sqrt[3]{\\frac{a}{b}}"},
    {"name": "LargeOps", "tex": "\\sum_{i=0}^{n} i^2 = \\int_0^1 f(x)\\,dx", "display": true},
    {"name": "Delimiters", "tex": "\\left(\\frac{a}{b}\\middle| c\\right)"},
    {"name": "Matrix", "tex": "\\begin{pmatrix}a&b&c\\\\d&e&f\\\\g&h&i\\end{pmatrix}", "display": true},
    {"name": "Macros", "tex": "\\newcommand{\\pair}[2]{(#1,#2)}\\pair{x}{y}+\\pair{\\alpha}{\\beta}"}
]"#;

const PACKAGES: [&str; 3] = ["ams", "newcommand", "boldsymbol"];

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    tex: String,
    #[serde(default)]
    display: bool,
}

fn load_cases() -> Result<Vec<Case>, Box<dyn Error>> {
    Ok(serde_json::from_str(CASES)?)
}

fn bench_target(c: &mut Criterion, target: OutputTarget) {
    let settings = Settings::builder().output(target).build();
    let ctx = Arc::new(TypesetContext::builder().settings(settings).build());
    let cases = load_cases().expect("failed to load benchmark cases");

    let mut group = c.benchmark_group(format!("typeset_{target}"));
    for case in cases {
        let ctx = Arc::clone(&ctx);
        let tex: Arc<str> = Arc::from(case.tex);

        // Ensure typesetting succeeds once before measuring performance.
        let primed = typeset(&ctx, &tex, &PACKAGES, case.display)
            .expect("typesetting failed while priming benchmark");
        assert!(primed.diagnostics.is_empty(), "{}: {:?}", case.name, primed.diagnostics);

        group.bench_function(case.name, move |b| {
            b.iter(|| {
                let out = typeset(&ctx, &tex, &PACKAGES, case.display)
                    .expect("typesetting failed during benchmark");
                black_box(out.output.to_markup().len());
            });
        });
    }

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    bench_target(c, OutputTarget::Chtml);
    bench_target(c, OutputTarget::Svg);
}

criterion_group!(benches, bench_rendering);
criterion_main!(benches);
