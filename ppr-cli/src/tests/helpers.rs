//! Test helpers for route CLI scenarios.

use std::cell::RefCell;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ppr_core::test_support::StubRouter;
use ppr_core::{RouteError, Router};
use ppr_http::HttpRouterConfig;
use tempfile::TempDir;

use crate::CliError;
use crate::route::RouterBuilder;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Builder handing out a [`StubRouter`] and remembering the client config.
#[derive(Debug)]
pub(super) struct StubRouterBuilder {
    error: Option<RouteError>,
    pub(super) seen: RefCell<Option<HttpRouterConfig>>,
}

impl StubRouterBuilder {
    pub(super) fn straight_line() -> Self {
        Self {
            error: None,
            seen: RefCell::new(None),
        }
    }

    pub(super) fn failing(error: RouteError) -> Self {
        Self {
            error: Some(error),
            seen: RefCell::new(None),
        }
    }
}

impl RouterBuilder for StubRouterBuilder {
    fn build(&self, config: &HttpRouterConfig) -> Result<Box<dyn Router>, CliError> {
        self.seen.replace(Some(config.clone()));
        let router = match &self.error {
            Some(error) => StubRouter::with_error(error.clone()),
            None => StubRouter::with_straight_line(),
        };
        Ok(Box::new(router))
    }
}
