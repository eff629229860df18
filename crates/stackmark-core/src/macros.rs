//! Call-site macros.
//!
//! They expand to method calls on the context or frame, so they compile the
//! same way in both diagnostics modes.

/// Enters a routine, recording the current source line.
///
/// ```ignore
/// let frame = stackmark::enters!(cx, "assemble_stiffness");
/// ```
#[macro_export]
macro_rules! enters {
    ($cx:expr, $routine:expr $(,)?) => {
        $cx.enter($routine, ::core::line!())
    };
}

/// Normal exit of a routine entered with [`enters!`].
#[macro_export]
macro_rules! exits {
    ($frame:ident) => {
        $frame.exit()
    };
}

/// Records an error for the frame's routine and returns it from the
/// enclosing function.
#[macro_export]
macro_rules! flag_error {
    ($frame:ident, $($arg:tt)+) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $frame.fail(::std::format!($($arg)+)),
        ))
    };
}

/// Returns early with the fixed error unless the subsystem is built in.
///
/// ```ignore
/// stackmark::assert_with!(frame, Mpi);
/// ```
#[macro_export]
macro_rules! assert_with {
    ($frame:ident, $subsystem:ident) => {
        $frame.require($crate::Subsystem::$subsystem)?
    };
}

/// Runs the block only in builds with pre-condition checks.
#[macro_export]
macro_rules! precheck {
    ($($body:tt)*) => {
        if $crate::PRECHECKS {
            $($body)*
        }
    };
}

/// Runs the block only in builds with post-condition checks.
#[macro_export]
macro_rules! postcheck {
    ($($body:tt)*) => {
        if $crate::POSTCHECKS {
            $($body)*
        }
    };
}
