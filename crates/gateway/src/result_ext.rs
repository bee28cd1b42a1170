use std::fmt::Display;

use tracing::error;

/// Logs the error side of a `Result` with the caller's location, then hands
/// the `Result` back untouched so it can still be propagated with `?`.
pub trait ResultExt<T, E> {
    fn log<S: ToString>(self, context: S) -> Result<T, E>;
}

impl<T, E: Display> ResultExt<T, E> for Result<T, E> {
    #[track_caller]
    fn log<S: ToString>(self, context: S) -> Result<T, E> {
        if let Err(ref e) = self {
            let location = std::panic::Location::caller();
            error!(
                target: "launchpad_gateway",
                error = %e,
                file = %format!("{}:{}", location.file(), location.line()),
                "{}",
                context.to_string()
            );
        }
        self
    }
}
