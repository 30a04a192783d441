#[doc(hidden)]
pub use tracing;

/// Target used for events that report a completed step to the operator.
///
/// The CLI formatter renders these with a dedicated symbol.
pub const SUCCESS_TARGET: &str = "autoconf::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::macros::tracing::info!(target: $crate::macros::SUCCESS_TARGET, $($arg)*)
    };
}
