//! Macros for common CLI error handling patterns.

/// Write a line to a stream and return the error exit code if writing fails.
///
/// # Examples
///
/// ```ignore
/// write_or_exit!(err, "Error: {}", message);
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}

/// Unwrap an engine result inside the play loop, or beep and continue.
///
/// Rejected commands are part of normal play: the session reports them and
/// waits for the next input instead of failing.
///
/// # Examples
///
/// ```ignore
/// accept_or_beep!(engine.draw(), err);
/// ```
#[macro_export]
macro_rules! accept_or_beep {
    ($result:expr, $err:expr) => {
        if let Err(e) = $result {
            tracing::debug!(error = %e, "input rejected");
            $crate::ui::beep($err)?;
            continue;
        }
    };
}
