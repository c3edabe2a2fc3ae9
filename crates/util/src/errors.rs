//! Helpers for error handling

/// Expands a given error type to wrap a stringified version of a given error
///
/// To be used in a map_err() call
#[macro_export]
macro_rules! err_str {
    ($x:expr) => {
        |e| $x(e.to_string())
    };
}

/// Expands a given error to format the string with the given format string and
/// args
///
/// The error should come last in the format string
#[macro_export]
macro_rules! raw_err_str {
    ($fmt:expr $(, $($arg:tt)*)?) => {
        |e| format!($fmt $(, $($arg)*)?, e)
    }
}

#[cfg(test)]
mod tests {
    /// A wrapper error used to exercise the macros
    #[derive(Debug, PartialEq)]
    struct Wrapped(String);

    #[test]
    fn test_err_str_wraps_display() {
        let res: Result<u8, Wrapped> = "300".parse::<u8>().map_err(err_str!(Wrapped));
        assert_eq!(res, Err(Wrapped("number too large to fit in target type".to_string())));
    }

    #[test]
    fn test_raw_err_str_formats() {
        let res: Result<u8, String> =
            "x".parse::<u8>().map_err(raw_err_str!("bad amount {}: {}", "x"));
        assert_eq!(res, Err("bad amount x: invalid digit found in string".to_string()));
    }
}
