#![allow(dead_code)]

use std::panic::{UnwindSafe, catch_unwind};
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use mathbox::layout::{BoxNode, BoxTree};
use mathbox::{
    Diagnostic, ExpressionTree, FontTables, ParserConfiguration, Registry, Settings, layout, parse,
};

/// Routes `tracing` events to the test harness; `RUST_LOG=mathbox=debug`
/// shows handler overrides, retries and layout summaries.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mathbox=warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_target(true))
        .try_init();
}

static DEFAULT_CONTEXT: OnceLock<mathbox::TypesetContext> = OnceLock::new();
pub fn default_ctx() -> &'static mathbox::TypesetContext {
    DEFAULT_CONTEXT.get_or_init(|| {
        init_logging();
        mathbox::TypesetContext::default()
    })
}

static DEFAULT_FONTS: OnceLock<FontTables> = OnceLock::new();
pub fn fonts() -> &'static FontTables {
    DEFAULT_FONTS.get_or_init(FontTables::tex)
}

pub fn resolve(names: &[&str]) -> Result<ParserConfiguration, Diagnostic> {
    init_logging();
    Registry::with_builtin_packages().resolve(names)
}

pub fn get_parsed(source: &str, names: &[&str]) -> Result<ExpressionTree, Diagnostic> {
    let config = resolve(names)?;
    Ok(parse(source, &config, &Settings::default()))
}

pub fn get_built(source: &str, display: bool) -> Result<BoxTree, Diagnostic> {
    let config = resolve(&["ams"])?;
    let settings = Settings::builder().display_mode(display).build();
    let tree = parse(source, &config, &settings);
    Ok(layout(&tree, fonts(), &settings)
        .ready()
        .expect("built-in fonts are never deferred"))
}

/// The content row of a laid out expression.
pub fn body(tree: &BoxTree) -> &BoxNode {
    &tree.root.children()[0]
}

/// Runs one `it` block of a `describe`-style test function.
pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), Diagnostic> + UnwindSafe,
{
    match catch_unwind(test_fn) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test '{desc}' failed with Result::Err: {e}"),
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_owned()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_owned()
            };
            panic!("Test '{desc}' panicked: {msg}");
        }
    }
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{} \n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}
