//! Process-wide typesetting context.

use alloc::sync::Arc;

use bon::bon;
use tracing::info;

use crate::config::{Package, Registry};
use crate::core::{Typeset, TypesetFailure, typeset};
use crate::font::{FontTables, FontVariantData};
use crate::retry::{Attempt, Dependency, ReadinessBoard, RetryCoordinator};
use crate::types::{Diagnostic, Settings};

/// Everything requests share: the package registry, the font tables, the
/// readiness board for deferred resources and the default settings.
///
/// Set up once, then shared; typesetting only takes `&self`, so the context
/// can sit behind an `Arc` and serve concurrent requests.
#[derive(Debug)]
pub struct TypesetContext {
    registry: Registry,
    fonts: Arc<FontTables>,
    coordinator: RetryCoordinator,
    settings: Settings,
}

/// One typesetting request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesetRequest {
    /// TeX source.
    pub source: String,
    /// Packages to resolve in addition to `base`.
    pub packages: Vec<String>,
    /// Block (true) or inline (false) math.
    pub display_mode: bool,
}

impl TypesetRequest {
    /// A request for `source` with `packages`.
    #[must_use]
    pub fn new<S: AsRef<str>>(source: impl Into<String>, packages: &[S], display_mode: bool) -> Self {
        Self {
            source: source.into(),
            packages: packages.iter().map(|p| p.as_ref().to_owned()).collect(),
            display_mode,
        }
    }
}

#[bon]
impl TypesetContext {
    /// Creates a context.
    ///
    /// # Default Values
    /// - `registry`: every built-in package
    /// - `fonts`: the built-in TeX font
    /// - `settings`: [`Settings::default`]
    #[must_use]
    #[builder]
    pub fn new(
        /// Packages available to requests.
        registry: Option<Registry>,
        /// Font tables, including any deferred variants.
        fonts: Option<FontTables>,
        /// Defaults for every request.
        settings: Option<Settings>,
    ) -> Self {
        let settings = settings.unwrap_or_default();
        let board = Arc::new(ReadinessBoard::default());
        Self {
            registry: registry.unwrap_or_else(Registry::with_builtin_packages),
            fonts: Arc::new(fonts.unwrap_or_default()),
            coordinator: RetryCoordinator::from_settings(board, &settings),
            settings,
        }
    }

    /// The package registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers `package`; see [`Registry::register`].
    pub fn register(&mut self, package: Package) -> Option<Diagnostic> {
        self.registry.register(package)
    }

    /// The font tables.
    #[must_use]
    pub const fn fonts(&self) -> &Arc<FontTables> {
        &self.fonts
    }

    /// The board deferred resources are announced on.
    #[must_use]
    pub const fn board(&self) -> &Arc<ReadinessBoard> {
        self.coordinator.board()
    }

    /// Number of documents with a request in flight.
    #[must_use]
    pub fn active_documents(&self) -> usize {
        self.coordinator.active_documents()
    }

    /// Defaults for every request.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fills the deferred font variant `name` and wakes requests waiting
    /// for it.
    pub fn provide_font_variant(&self, name: &str, data: FontVariantData) -> Result<(), Diagnostic> {
        self.fonts.provide(name, data)?;
        info!(variant = name, "font variant provided");
        self.board()
            .mark_ready(&Dependency::FontVariant(name.to_owned()));
        Ok(())
    }

    /// Typesets `request` for `document`, waiting for deferred resources
    /// and retrying from the start each time one becomes ready.
    ///
    /// Configuration errors fail at once; a dependency that stays missing
    /// fails with `DependencyTimeout`.
    pub async fn typeset_with_retry(
        &self,
        document: &str,
        request: &TypesetRequest,
    ) -> Result<Typeset, Diagnostic> {
        let outcome = self
            .coordinator
            .run(document, || {
                match typeset(self, &request.source, &request.packages, request.display_mode) {
                    Ok(typeset) => Attempt::Ready(Ok(typeset)),
                    Err(TypesetFailure::Pending(dependency)) => Attempt::Pending(dependency),
                    Err(TypesetFailure::Configuration(diagnostic)) => Attempt::Ready(Err(diagnostic)),
                }
            })
            .await?;
        outcome
    }
}

impl Default for TypesetContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;
    use crate::font::FontCharRecord;
    use crate::types::ErrorCode;

    const fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn context_is_shareable() {
        assert_send_sync::<TypesetContext>();
    }

    fn deferred_context(wait: Duration) -> Arc<TypesetContext> {
        let mut fonts = FontTables::tex();
        fonts.declare_deferred("double-struck", &["normal"]);
        let settings = Settings::builder().wait_timeout(wait).max_retries(2).build();
        Arc::new(TypesetContext::builder().fonts(fonts).settings(settings).build())
    }

    fn blackboard() -> FontVariantData {
        let mut data = FontVariantData::default();
        data.insert(0x52, FontCharRecord::new(0.683, 0.0, 0.722));
        data
    }

    #[tokio::test(start_paused = true)]
    async fn retry_completes_once_font_arrives() {
        let ctx = deferred_context(Duration::from_secs(5));
        let request = TypesetRequest::new(r"\mathbb{R}", &["ams"], false);
        let provider = {
            let ctx = Arc::clone(&ctx);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                ctx.provide_font_variant("double-struck", blackboard()).unwrap();
            })
        };
        let out = ctx.typeset_with_retry("doc-1", &request).await.unwrap();
        provider.await.unwrap();
        assert!(out.diagnostics.is_empty());
        assert!((out.output.width - 0.722).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_font_times_out() {
        let ctx = deferred_context(Duration::from_millis(100));
        let request = TypesetRequest::new(r"\mathbb{R}", &["ams"], false);
        let err = ctx.typeset_with_retry("doc-2", &request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DependencyTimeout);
    }

    #[tokio::test]
    async fn configuration_errors_are_not_retried() {
        let ctx = TypesetContext::default();
        let request = TypesetRequest::new("x", &["nope"], false);
        let err = ctx.typeset_with_retry("doc-3", &request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownPackage);
    }

    #[test]
    fn fonts_are_provided_once() {
        let ctx = deferred_context(Duration::from_millis(100));
        ctx.provide_font_variant("double-struck", blackboard()).unwrap();
        let dep = Dependency::FontVariant("double-struck".to_owned());
        assert!(ctx.board().is_ready(&dep));
        let err = ctx.provide_font_variant("double-struck", blackboard()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidFontData);
    }
}
