/*! Integration tests for Shutter.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - authority: Tests for SessionAuthority driven through real stores and registries
 * - session: Tests for the SessionRegistry and its persistence
 * - store: Tests for the file-backed user and config stores
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("shutter=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod context;
mod helpers;
mod session;
mod store;
