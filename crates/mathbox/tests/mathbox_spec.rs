mod setup;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use mathbox::config::{Handler, InitContext, Package};
use mathbox::font::{Axis, PartRole};
use mathbox::layout::{BoxContent, BoxKind};
use mathbox::types::ErrorCode;
use mathbox::{
    Dependency, FontCharRecord, FontTables, FontVariantData, Node, OutputTarget, Registry,
    Settings, TypesetContext, TypesetRequest, render, typeset,
};
use setup::*;

// Every function is equivalent to a "describe" block

#[test]
fn a_package_resolver() {
    it("should not depend on the order packages are named in", || {
        let forward = resolve(&["ams", "base"])?;
        let backward = resolve(&["base", "ams"])?;
        assert_eq!(forward, backward);
        assert_eq!(forward.packages(), ["base", "ams"]);
        Ok(())
    });

    it("should merge identical package sets identically", || {
        let names = ["ams", "newcommand", "boldsymbol"];
        assert_eq!(resolve(&names)?, resolve(&names)?);
        Ok(())
    });

    it("should pull in dependencies of init hooks", || {
        let config = resolve(&["autobold"])?;
        assert!(config.packages().iter().any(|name| name == "boldsymbol"));
        assert!(config.macro_handler("\\boldsymbol").is_some());
        Ok(())
    });

    it("should fail on an unknown package", || {
        let err = resolve(&["physics"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownPackage);
        assert!(!err.is_recoverable());
        Ok(())
    });

    it("should fail on a dependency cycle", || {
        let mut registry = Registry::with_builtin_packages();
        registry.register(Package::builder("left").depends_on("right").build());
        registry.register(Package::builder("right").depends_on("left").build());
        let err = registry.resolve(&["left"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CyclicDependency);
        Ok(())
    });

    it("should run each init hook once per resolve", || {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn counted(cx: &mut InitContext) {
            CALLS.fetch_add(1, Ordering::SeqCst);
            // Adding a package forces another resolution round.
            cx.register(Package::builder("counted-extra").build());
            cx.require("counted-extra");
        }
        let mut registry = Registry::with_builtin_packages();
        registry.register(Package::builder("counted").init(counted).build());
        for round in 1..=3 {
            let config = registry.resolve(&["counted"])?;
            assert!(config.packages().iter().any(|name| name == "counted-extra"));
            assert_eq!(CALLS.load(Ordering::SeqCst), round);
        }
        assert!(!registry.contains("counted-extra"));
        Ok(())
    });

    it("should fail on a missing dependency", || {
        let mut registry = Registry::with_builtin_packages();
        registry.register(Package::builder("orphan").depends_on("parent").build());
        let err = registry.resolve(&["orphan"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnresolvedDependency);
        Ok(())
    });
}

#[test]
fn a_macro_expander() {
    it("should accept exactly as many arguments as declared", || {
        let mut registry = Registry::with_builtin_packages();
        registry.register(
            Package::builder("arity")
                .macro_handler("\\one", Handler::substitution("{#1}", 1))
                .macro_handler("\\two", Handler::substitution("\\frac{#1}{#2}", 2))
                .macro_handler("\\three", Handler::substitution("#1^{#2}_{#3}", 3))
                .build(),
        );
        let config = registry.resolve(&["arity"])?;
        for source in [r"\one{a}", r"\two{a}{b}", r"\three{a}{b}{c}", r"\two x y"] {
            let tree = mathbox::parse(source, &config, &Settings::default());
            assert!(tree.diagnostics.is_empty(), "{source}: {:?}", tree.diagnostics);
            assert!(tree.errors().is_empty(), "{source}");
        }
        Ok(())
    });

    it("should expand user definitions with arguments", || {
        let tree = get_parsed(
            r"\newcommand{\norm}[1]{\left|#1\right|} \norm{x} \def\sq#1{#1^2} \sq{y}",
            &["newcommand"],
        )?;
        assert!(tree.diagnostics.is_empty(), "{:?}", tree.diagnostics);
        Ok(())
    });

    it("should stop runaway recursion", || {
        let tree = get_parsed(r"\def\a{\a}\a", &["newcommand"])?;
        let codes: Vec<_> = tree.diagnostics.iter().map(|d| d.code()).collect();
        assert_eq!(codes, [ErrorCode::MacroRecursionLimit]);
        Ok(())
    });

    it("should report unknown environments", || {
        let tree = get_parsed(r"\begin{tabular}x\end{tabular}", &["ams"])?;
        assert_eq!(tree.diagnostics[0].code(), ErrorCode::UnknownEnvironment);
        Ok(())
    });
}

#[test]
fn a_superscript() {
    it("should attach to the preceding atom", || {
        let tree = get_parsed("x^2", &[])?;
        assert_let!(Node::Row { children, .. } = &tree.root);
        assert_let!([Node::Scripts { base, sup: Some(sup), sub: None, .. }] = children.as_slice());
        assert!(matches!(base.as_ref(), Node::Identifier { text, .. } if text == "x"));
        assert!(matches!(sup.as_ref(), Node::Number { text, .. } if text == "2"));
        Ok(())
    });

    it("should be raised and set at script size", || {
        let built = get_built("x^2", false)?;
        let scripts = &body(&built).children()[0];
        assert_eq!(scripts.kind, BoxKind::Msubsup);
        let sup = &scripts.children()[1];
        assert!(sup.shift > 0.0);
        assert_let!(BoxContent::Text(run) = &sup.content);
        assert_eq!(run.scale, Settings::default().script_ratio);
        Ok(())
    });
}

#[test]
fn a_fraction() {
    it("should put the denominator below a rule as wide as the widest part", || {
        let built = get_built(r"\frac{1}{2}", false)?;
        let frac = &body(&built).children()[0];
        assert_eq!(frac.kind, BoxKind::Mfrac);
        assert_let!([num, rule, den] = frac.children());
        assert_eq!(rule.kind, BoxKind::Line);
        assert_eq!(rule.width, num.width.max(den.width));
        assert!(den.shift + den.height < rule.shift);
        assert!(num.shift - num.depth > rule.shift + rule.height);
        Ok(())
    });

    it("should widen the rule to a longer numerator", || {
        let built = get_built(r"\frac{x+y}{2}", true)?;
        let frac = &body(&built).children()[0];
        assert_let!([num, rule, den] = frac.children());
        assert_eq!(rule.width, num.width);
        assert!(den.width < num.width);
        Ok(())
    });
}

#[test]
fn an_undefined_command() {
    it("should leave exactly one error node at its span", || {
        let tree = get_parsed(r"x+\foo+y", &[])?;
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.diagnostics.len(), 1);
        let diagnostic = &tree.diagnostics[0];
        assert_eq!(diagnostic.code(), ErrorCode::UndefinedControlSequence);
        let span = diagnostic.span.as_ref().expect("diagnostic has a span");
        assert_eq!((span.start, span.end), (2, 6));
        Ok(())
    });

    it("should lay out its siblings normally", || {
        let built = get_built(r"x+\foo+y", false)?;
        let kinds: Vec<_> = body(&built).children().iter().map(|b| b.kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == BoxKind::Mi).count(), 2);
        assert_eq!(kinds.iter().filter(|k| **k == BoxKind::Merror).count(), 1);
        assert_eq!(built.diagnostics.len(), 1);
        Ok(())
    });

    it("should still typeset to markup", || {
        let out = typeset(default_ctx(), r"x+\foo+y", &["ams"], false).unwrap();
        assert_eq!(out.diagnostics.len(), 1);
        let markup = out.output.to_markup();
        assert!(markup.contains("mjx-merror"));
        assert!(markup.contains("#cc0000"));
        Ok(())
    });

    it("should render as text when undefined commands are literal", || {
        let out = typeset(default_ctx(), r"\foo", &["noundefined"], false).unwrap();
        let markup = out.output.to_markup();
        assert!(markup.contains("mjx-mtext"));
        assert!(!markup.contains("mjx-merror"));
        Ok(())
    });
}

#[test]
fn the_output_targets() {
    it("should agree on the total extent", || {
        for source in [
            "x^2",
            r"\frac{1}{2}",
            r"\sqrt[3]{x^2+1}",
            r"\sum_{i=0}^n i",
            r"\left(\begin{matrix}a&b\\c&d\end{matrix}\right)",
            r"\hat{x}+\overline{ab}",
        ] {
            for display in [false, true] {
                let built = get_built(source, display)?;
                let chtml = render(&built, OutputTarget::Chtml);
                let svg = render(&built, OutputTarget::Svg);
                assert_eq!(
                    (chtml.width, chtml.height, chtml.depth),
                    (svg.width, svg.height, svg.depth),
                    "{source}"
                );
            }
        }
        Ok(())
    });

    it("should give sized delimiter glyphs explicit box sizes in CHTML", || {
        let mut sized = 0;
        for source in [
            r"\left(x^2\right)",
            r"\left(\frac{1}{2}\right)",
            r"\left(\frac{x^2}{y_1}\right)",
            r"\left(\begin{matrix}1\\2\end{matrix}\right)",
        ] {
            for display in [false, true] {
                let built = get_built(source, display)?;
                let mut largeop = false;
                built.root.visit(&mut |b| {
                    if let BoxContent::Text(run) = &b.content {
                        largeop |= run
                            .glyphs
                            .iter()
                            .any(|g| g.variant == "largeop" && g.sizing.is_some());
                    }
                });
                if largeop {
                    sized += 1;
                    let markup = render(&built, OutputTarget::Chtml).to_markup();
                    assert!(markup.contains("width:0.597em;"), "{source}");
                    assert!(markup.contains("padding:1.15em 0em 0.649em 0;"), "{source}");
                }
            }
        }
        assert!(sized > 0, "no source reached the largeop size");
        Ok(())
    });

    it("should follow the context's output setting", || {
        let settings = Settings::builder().output(OutputTarget::Svg).build();
        let ctx = TypesetContext::builder().settings(settings).build();
        let out = typeset(&ctx, r"\frac{1}{2}", &["ams"], true).unwrap();
        assert_eq!(out.output.target, OutputTarget::Svg);
        assert!(out.output.to_markup().starts_with("<svg"));
        Ok(())
    });
}

#[test]
fn a_stretchy_assembly() {
    it("should tile extenders to cover the target exactly", || {
        let assembly = fonts().assemble_stretchy(0x28, 3.0)?;
        assert_eq!(assembly.axis, Axis::Vertical);
        let extenders = assembly
            .parts
            .iter()
            .filter(|p| p.role == PartRole::Extender)
            .count();
        assert!(extenders >= 1);
        assert!((assembly.covered() - 3.0).abs() < 1e-6);
        Ok(())
    });

    it("should stretch arrows horizontally", || {
        let assembly = fonts().assemble_stretchy(0x2192, 4.0)?;
        assert_eq!(assembly.axis, Axis::Horizontal);
        assert!((assembly.covered() - 4.0).abs() < 1e-6);
        Ok(())
    });

    it("should refuse targets below the fixed parts", || {
        let err = fonts().assemble_stretchy(0x28, 0.1).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotStretchable);
        Ok(())
    });

    it("should draw its pieces from shared outlines in SVG", || {
        let built = get_built(
            r"\left(\begin{matrix}1\\2\\3\\4\\5\\6\end{matrix}\right)",
            true,
        )?;
        let svg = render(&built, OutputTarget::Svg).to_markup();
        for piece in ["239B", "239C", "239D"] {
            let id = format!("MJX-size4-{piece}");
            assert!(svg.contains(&format!("<path id=\"{id}\"")), "{id} not defined");
            assert!(svg.contains(&format!("href=\"#{id}\"")), "{id} not used");
        }
        assert!(svg.matches("<use").count() > 3);
        assert!(!svg.contains("<text"));
        Ok(())
    });

    it("should refuse characters without a recipe", || {
        let err = fonts().assemble_stretchy(0x41, 2.0).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotStretchable);
        Ok(())
    });
}

#[tokio::test(start_paused = true)]
async fn concurrent_requests_share_one_context() {
    let ctx = Arc::new(TypesetContext::default());
    let handles: Vec<_> = [r"\frac{1}{2}", "x^2", r"\sqrt{y}", r"\foo"]
        .into_iter()
        .enumerate()
        .map(|(i, source)| {
            let ctx = Arc::clone(&ctx);
            tokio::spawn(async move {
                let request = TypesetRequest::new(source, &["ams"], false);
                ctx.typeset_with_retry(&format!("doc-{i}"), &request).await
            })
        })
        .collect();
    for handle in handles {
        let out = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(out.output.width > 0.0);
    }
}

#[test]
fn nesting_at_the_default_limit() {
    let limit = Settings::default().max_nesting;
    let nested = |open: &str, close: &str, levels: usize| {
        format!("{}x{}", open.repeat(levels), close.repeat(levels))
    };
    for (open, close) in [
        ("{", "}"),
        (r"\sqrt{", "}"),
        (r"\frac{1}{", "}"),
        (r"\left(", r"\right)"),
    ] {
        for display in [false, true] {
            let out = typeset(default_ctx(), &nested(open, close, limit), &["ams"], display).unwrap();
            assert!(out.diagnostics.is_empty(), "{open}: {:?}", out.diagnostics);

            let out = typeset(default_ctx(), &nested(open, close, limit + 1), &["ams"], display)
                .unwrap();
            let codes: Vec<_> = out.diagnostics.iter().map(|d| d.code()).collect();
            assert_eq!(codes, [ErrorCode::MacroRecursionLimit], "{open}");
            assert!(out.output.to_markup().contains("mjx-merror"));
        }
    }
}

fn deferred_context() -> Arc<TypesetContext> {
    let mut fonts = FontTables::tex();
    fonts.declare_deferred("double-struck", &["normal"]);
    Arc::new(TypesetContext::builder().fonts(fonts).build())
}

#[tokio::test(start_paused = true)]
async fn a_cancelled_retry_releases_its_document() {
    let ctx = deferred_context();
    let dependency = Dependency::FontVariant("double-struck".to_owned());
    let request = TypesetRequest::new(r"\mathbb{R}", &["ams"], false);

    let waiting = {
        let ctx = Arc::clone(&ctx);
        let request = request.clone();
        tokio::spawn(async move { ctx.typeset_with_retry("doc", &request).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(ctx.active_documents(), 1);
    assert_eq!(ctx.board().waiters(&dependency), 1);

    waiting.abort();
    assert!(waiting.await.unwrap_err().is_cancelled());
    assert_eq!(ctx.active_documents(), 0);
    assert_eq!(ctx.board().waiters(&dependency), 0);

    // The document takes new requests once the font arrives.
    let mut data = FontVariantData::default();
    data.insert(0x52, FontCharRecord::new(0.683, 0.0, 0.722));
    ctx.provide_font_variant("double-struck", data).unwrap();
    let out = tokio::time::timeout(Duration::from_secs(1), ctx.typeset_with_retry("doc", &request))
        .await
        .unwrap()
        .unwrap();
    assert!(out.diagnostics.is_empty());
    assert_eq!(ctx.active_documents(), 0);
}
