//! The `ams` package: matrix-like environments, `cases`, `aligned`, and the
//! fraction and operator-name commands.

use crate::config::BASE_PACKAGE;
use crate::config::package::{ArgSpec, ColumnAlign, Construct, EnvironmentSpec, Handler, Package};

const TWO: &[ArgSpec] = &[ArgSpec::Braced, ArgSpec::Braced];
const ONE: &[ArgSpec] = &[ArgSpec::Braced];

const fn matrix(open: Option<&'static str>, close: Option<&'static str>) -> EnvironmentSpec {
    EnvironmentSpec {
        open,
        close,
        columns: &[],
        display: false,
    }
}

const fn fraction(
    bar: bool,
    open: Option<&'static str>,
    close: Option<&'static str>,
    display: Option<bool>,
) -> Handler {
    Handler::command(
        TWO,
        Construct::Fraction {
            bar,
            open,
            close,
            display,
        },
    )
}

/// The `ams` package.
#[must_use]
pub fn package() -> Package {
    Package::builder("ams")
        .depends_on(BASE_PACKAGE)
        .environment("matrix", matrix(None, None))
        .environment("pmatrix", matrix(Some("("), Some(")")))
        .environment("bmatrix", matrix(Some("["), Some("]")))
        .environment("Bmatrix", matrix(Some("{"), Some("}")))
        .environment("vmatrix", matrix(Some("|"), Some("|")))
        .environment("Vmatrix", matrix(Some("\u{2225}"), Some("\u{2225}")))
        .environment(
            "cases",
            EnvironmentSpec {
                open: Some("{"),
                close: None,
                columns: &[ColumnAlign::Left, ColumnAlign::Left],
                display: false,
            },
        )
        .environment(
            "aligned",
            EnvironmentSpec {
                open: None,
                close: None,
                columns: &[ColumnAlign::Right, ColumnAlign::Left],
                display: true,
            },
        )
        .macro_handler("\\dfrac", fraction(true, None, None, Some(true)))
        .macro_handler("\\tfrac", fraction(true, None, None, Some(false)))
        .macro_handler("\\binom", fraction(false, Some("("), Some(")"), None))
        .macro_handler("\\operatorname", Handler::command(ONE, Construct::OperatorName))
        .macro_handler(
            "\\iint",
            Handler::command(
                &[],
                Construct::LargeOperator {
                    symbol: "\u{222C}",
                    limits: false,
                },
            ),
        )
        .macro_handler(
            "\\iiint",
            Handler::command(
                &[],
                Construct::LargeOperator {
                    symbol: "\u{222D}",
                    limits: false,
                },
            ),
        )
        .build()
}
